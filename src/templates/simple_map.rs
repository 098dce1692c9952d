//! Sensor markers on a [Leaflet](https://leafletjs.com/) map.

use crate::prelude::*;
use crate::settings::MapSettings;
use crate::templates::script_json;
use serde_json::json;

markup::define! {
    SimpleMap<'a>(id: &'a str, data: &'a [Sensor], center: Position, settings: &'a MapSettings) {
        div.map[id = id] {}
        script { @markup::raw(map_script(id, data, center.to_owned(), settings)) }
    }
}

fn map_script(id: &str, sensors: &[Sensor], center: Position, settings: &MapSettings) -> String {
    let markers: Vec<_> = sensors
        .iter()
        .map(|sensor| {
            json!({
                "href": sensor.href(),
                "name": sensor.name,
                "position": sensor.position(),
            })
        })
        .collect();
    format!(
        r#"(function () {{
            const map = L.map({id}).setView({center}, {zoom});
            L.tileLayer({tile_url}, {{attribution: {attribution}}}).addTo(map);
            {markers}.forEach(function (marker) {{
                const link = document.createElement("a");
                link.href = marker.href;
                link.textContent = marker.name;
                L.marker(marker.position).addTo(map).bindPopup(link);
            }});
        }})();"#,
        id = script_json(id),
        center = script_json(&center),
        zoom = settings.zoom,
        tile_url = script_json(&settings.tile_url),
        attribution = script_json(&settings.attribution),
        markers = script_json(&markers),
    )
}
