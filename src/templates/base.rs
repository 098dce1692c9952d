//! Page base.

markup::define! {
    Base<Body: markup::Render>(title: String, refresh_secs: Option<u32>, body: Body) {
        @markup::doctype()
        html[lang = "no"] {
            head {
                title { @title " · Sensorkart" }
                meta[charset = "utf-8"];
                meta[name = "viewport", content = "width=device-width, initial-scale=1"];
                @if let Some(refresh_secs) = refresh_secs {
                    meta["http-equiv" = "refresh", content = refresh_secs.to_string()];
                }
                link[rel = "stylesheet", href = "https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css"];
                link[rel = "stylesheet", href = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"];
                link[rel = "stylesheet", href = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"];
                script[src = "https://cdn.plot.ly/plotly-2.27.0.min.js"] {}
                script[src = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"] {}
                style { ".map { height: 400px; } .graph { min-height: 320px; }" }
            }
            body {
                section.section {
                    div.container {
                        @body
                    }
                }
                footer.footer {
                    div.container {
                        p {
                            i.fas."fa-water"."has-text-info" {} " "
                            strong { "Sensorkart " @crate_version() }
                        }
                        p {
                            i.fas."fa-certificate"."has-text-primary" {} " "
                            "Made with " a[href = "https://bulma.io/"] { strong { "Bulma" } } ", "
                            a[href = "https://plotly.com/javascript/"] { strong { "Plotly" } } " and "
                            a[href = "https://leafletjs.com/"] { strong { "Leaflet" } }
                        }
                    }
                }
            }
        }
    }
}

/// Wraps `CARGO_PKG_VERSION` in order to include it in a template.
fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
