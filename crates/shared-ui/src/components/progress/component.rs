use dioxus::prelude::*;

/// Determinate progress bar; `value` is a percentage and is clamped to 0..=100.
#[component]
pub fn Progress(
    value: u8,
    #[props(default)] label: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let value = value.min(100);
    let base = vec![
        Attribute::new("class", "progress", None, false),
        Attribute::new("role", "progressbar", None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            aria_valuemin: "0",
            aria_valuemax: "100",
            aria_valuenow: "{value}",
            aria_label: "{label}",
            ..merged,
            div { class: "progress-indicator", style: "width: {value}%;" }
        }
        if !label.is_empty() {
            p { class: "progress-label", "{label} {value}%" }
        }
    }
}
