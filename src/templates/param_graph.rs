//! Time series chart of a single parameter, drawn by [Plotly](https://plotly.com/javascript/).

use crate::core::series::ParameterMeasurement;
use crate::templates::script_json;
use chrono::{DateTime, Utc};
use serde_json::json;

markup::define! {
    ParamGraph<'a>(title: &'a str, id: u32, data: &'a [ParameterMeasurement]) {
        div."box" {
            h3.title."is-5" { @title }
            @if data.is_empty() {
                p."has-text-grey" { "Ingen målinger" }
            } else {
                div.graph[id = element_id(id.to_owned())] {}
                script { @markup::raw(plot_script(id.to_owned(), title, data)) }
            }
        }
    }
}

fn element_id(id: u32) -> String {
    format!("graph-{}", id)
}

fn plot_script(id: u32, title: &str, data: &[ParameterMeasurement]) -> String {
    let (xs, ys): (Vec<DateTime<Utc>>, Vec<f64>) = data.iter().map(|point| (point.timestamp, point.value)).unzip();
    let trace = json!({
        "x": xs,
        "y": ys,
        "name": title,
        "type": "scatter",
        "mode": "lines+markers",
    });
    let layout = json!({
        "margin": {"t": 8, "r": 8, "b": 40, "l": 48},
        "xaxis": {"type": "date"},
    });
    format!(
        "Plotly.newPlot({}, [{}], {}, {{responsive: true, displaylogo: false}});",
        script_json(&element_id(id)),
        script_json(&trace),
        script_json(&layout),
    )
}
