//! Page heading with optional title and subtitle.

markup::define! {
    Heading<'a>(title: Option<&'a str>, subtitle: Option<&'a str>) {
        div.block {
            @if let Some(title) = title {
                h1.title."is-3" { @title }
            }
            @if let Some(subtitle) = subtitle {
                h2.subtitle."is-5" { @subtitle }
            }
        }
    }
}
