// Symbol input and the Analyze action
#![allow(non_snake_case)]
use dioxus::prelude::*;

#[component]
pub fn Toolbar(symbol: String, busy: bool, on_input: EventHandler<String>, on_analyze: EventHandler<()>) -> Element {
    let label = if busy { "Analyzing..." } else { "Analyze" };
    rsx! {
        div {
            class: "toolbar",
            style: "display: flex; gap: 8px; align-items: center; margin-bottom: 16px;",
            label { r#for: "symbol", "Enter Stock Symbol (e.g., EURINR=X):" }
            input {
                id: "symbol",
                r#type: "text",
                value: "{symbol}",
                disabled: busy,
                oninput: move |evt| on_input.call(evt.value())
            }
            button {
                disabled: busy,
                onclick: move |_| on_analyze.call(()),
                "{label}"
            }
        }
    }
}
