#![allow(non_snake_case)]
use std::rc::Rc;

use dioxus::prelude::*;

use crate::components::{ChartView, SignalTable, Toolbar};
use crate::config::theme::ThemePalette;
use crate::config::AppConfig;
use crate::services::engine_client::EngineClient;
use crate::state::app_state::AnalysisState;

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let palette = ThemePalette::by_name(&config.app.theme);

    let client = use_hook(|| EngineClient::from_config(&config).map(Rc::new).map_err(|e| format!("{:#}", e)));
    let mut symbol = use_signal(|| config.app.default_symbol.clone());
    let mut state = use_signal(AnalysisState::default);

    let on_analyze = {
        let client = client.clone();
        move |_: ()| {
            if state.read().is_busy() {
                return;
            }
            let requested = symbol.read().trim().to_string();
            let client = match &client {
                Ok(client) => client.clone(),
                Err(message) => {
                    state.set(AnalysisState::Failed(message.clone()));
                    return;
                }
            };
            tracing::info!(symbol = %requested, "Analyze requested");
            state.set(AnalysisState::Loading { symbol: requested.clone() });
            spawn(async move {
                let result = client.analyze(&requested).await;
                state.set(AnalysisState::from_result(result));
            });
        }
    };

    let current = state.read().clone();
    let busy = current.is_busy();
    let status = current.status_text();
    let body = match current {
        AnalysisState::Ready(report) => rsx! {
            p { style: "opacity: 0.7;", "{status}" }
            ChartView { svg: report.chart.svg().to_string(), caption: "Technical Indicators".to_string() }
            SignalTable { signals: report.signals, palette: palette.clone() }
        },
        AnalysisState::Failed(message) => rsx! {
            div {
                class: "error-banner",
                style: "padding: 10px; border: 1px solid {palette.error}; color: {palette.error};",
                "{message}"
            }
        },
        AnalysisState::Loading { .. } | AnalysisState::Idle => rsx! {
            p { style: "opacity: 0.7;", "{status}" }
        },
    };

    rsx! {
        div {
            class: "app",
            style: "font-family: sans-serif; padding: 16px; min-height: 100vh; background: {palette.background}; color: {palette.foreground};",
            h1 { "{config.app.title}" }
            Toolbar {
                symbol: symbol(),
                busy: busy,
                on_input: move |value: String| symbol.set(value),
                on_analyze: on_analyze,
            }
            {body}
        }
    }
}
