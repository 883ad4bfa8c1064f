// Trading signal matrix as an HTML table
#![allow(non_snake_case)]
use crate::config::theme::ThemePalette;
use dioxus::prelude::*;
use shared::models::SignalMatrix;

#[component]
pub fn SignalTable(signals: SignalMatrix, palette: ThemePalette) -> Element {
    let border = palette.border.clone();
    let rows = signals.rows().into_iter().map(|row| {
        let cells = row.cells().into_iter().enumerate().map(|(i, signal)| {
            let color = palette.signal_color(signal).to_string();
            rsx! {
                td {
                    key: "{i}",
                    style: "padding: 6px 14px; border: 1px solid {border}; color: {color}; font-weight: bold;",
                    "{signal}"
                }
            }
        });
        rsx! {
            tr {
                key: "{row.horizon}",
                th {
                    style: "padding: 6px 14px; border: 1px solid {border}; text-align: left;",
                    "{row.horizon}"
                }
                {cells}
            }
        }
    });

    rsx! {
        section {
            class: "signal-table",
            h2 { "Trading Signals" }
            table {
                style: "border-collapse: collapse;",
                thead {
                    tr {
                        th { style: "border: 1px solid {border};" }
                        for column in SignalMatrix::COLUMNS {
                            th {
                                key: "{column}",
                                style: "padding: 6px 14px; border: 1px solid {border};",
                                "{column}"
                            }
                        }
                    }
                }
                tbody { {rows} }
            }
        }
    }
}
