#![allow(non_snake_case)]
use dioxus::prelude::*;

/// Embeds the rendered chart document with its caption underneath.
#[component]
pub fn ChartView(svg: String, caption: String) -> Element {
    rsx! {
        figure {
            class: "chart-view",
            style: "margin: 0; overflow-x: auto;",
            div {
                class: "chart-image",
                dangerous_inner_html: "{svg}"
            }
            figcaption {
                style: "text-align: center; font-size: 14px; opacity: 0.8;",
                "{caption}"
            }
        }
    }
}
