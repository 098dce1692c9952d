markup::define! {
    BackButton {
        a.button."is-light"[href = "/"] {
            span.icon { i.fas."fa-arrow-left" {} }
            span { "Tilbake til sensorkart" }
        }
    }
}
