// Two-panel indicator chart rendered as a standalone SVG document.
//
// Top panel: close, MA20 and both Bollinger bands. Bottom panel: CCI with
// dashed reference lines at +/- the CCI threshold. Values are plotted against
// the bar index; NaN values break the line.
use crate::config::ChartSettings;
use crate::error::EngineError;
use shared::models::{EnrichedBar, EnrichedSeries, IndicatorDescriptor};
use std::fmt::Write;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 45.0;
const Y_TICKS: usize = 5;
const X_TICKS: usize = 8;

/// A rendered chart. The document is SVG text; `bytes()` is the binary artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    svg: String,
}

impl ChartImage {
    pub const MIME_TYPE: &'static str = "image/svg+xml";

    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn bytes(&self) -> &[u8] {
        self.svg.as_bytes()
    }
}

struct Line<'a> {
    label: &'a str,
    color: &'a str,
    value: fn(&EnrichedBar) -> f64,
}

struct Panel {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    y_min: f64,
    y_max: f64,
    count: usize,
}

impl Panel {
    fn x(&self, index: usize) -> f64 {
        let span = self.count.saturating_sub(1).max(1) as f64;
        self.left + self.width * index as f64 / span
    }

    fn y(&self, value: f64) -> f64 {
        self.top + (self.y_max - value) / (self.y_max - self.y_min) * self.height
    }
}

pub struct ChartRenderer {
    settings: ChartSettings,
    cci_threshold: f64,
}

impl ChartRenderer {
    pub fn new(settings: ChartSettings, cci_threshold: f64) -> Self {
        Self { settings, cci_threshold }
    }

    pub fn render(&self, series: &EnrichedSeries, indicators: &[IndicatorDescriptor]) -> Result<ChartImage, EngineError> {
        if series.is_empty() {
            return Err(EngineError::Chart(format!("Nothing to plot for '{}'", series.symbol)));
        }
        let mut svg = String::new();
        self.write_document(&mut svg, series, indicators)
            .map_err(|e| EngineError::Chart(e.to_string()))?;
        tracing::debug!(symbol = %series.symbol, bytes = svg.len(), "Chart rendered");
        Ok(ChartImage { svg })
    }

    fn write_document(
        &self,
        out: &mut String,
        series: &EnrichedSeries,
        indicators: &[IndicatorDescriptor],
    ) -> std::fmt::Result {
        let s = &self.settings;
        let width = s.width as f64;
        let panel_outer = s.panel_height as f64;

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
            w = s.width,
            h = u64::from(s.panel_height) * 2
        )?;
        writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, escape_xml(&s.background))?;

        let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = panel_outer - MARGIN_TOP - MARGIN_BOTTOM;

        let price_lines = [
            Line { label: "Price", color: &s.price_color, value: |b| b.bar.close },
            Line { label: "20-day MA", color: &s.ma_color, value: |b| b.ma20 },
            Line { label: "BB Upper", color: &s.bb_upper_color, value: |b| b.bb_upper },
            Line { label: "BB Lower", color: &s.bb_lower_color, value: |b| b.bb_lower },
        ];
        let (lo, hi) = value_range(series, &price_lines, &[]);
        let price_panel = Panel {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: plot_width,
            height: plot_height,
            y_min: lo,
            y_max: hi,
            count: series.len(),
        };
        self.write_panel(out, series, &price_panel, "Price with MA and Bollinger Bands", &price_lines)?;

        let subtitle = indicators.iter().map(|d| d.name.as_str()).collect::<Vec<_>>().join(" | ");
        if !subtitle.is_empty() {
            writeln!(
                out,
                r#"<text class="indicators" x="{:.1}" y="{:.1}" text-anchor="end" fill="{}">{}</text>"#,
                width - MARGIN_RIGHT,
                MARGIN_TOP - 22.0,
                escape_xml(&s.text_color),
                escape_xml(&subtitle)
            )?;
        }

        let cci_lines = [Line { label: "CCI", color: &s.cci_color, value: |b| b.cci }];
        let t = self.cci_threshold;
        let (lo, hi) = value_range(series, &cci_lines, &[t, -t]);
        let cci_panel = Panel {
            left: MARGIN_LEFT,
            top: panel_outer + MARGIN_TOP,
            width: plot_width,
            height: plot_height,
            y_min: lo,
            y_max: hi,
            count: series.len(),
        };
        self.write_panel(out, series, &cci_panel, "Commodity Channel Index (CCI)", &cci_lines)?;
        self.write_reference_line(out, &cci_panel, t, &s.overbought_color)?;
        self.write_reference_line(out, &cci_panel, -t, &s.oversold_color)?;
        writeln!(out, "</svg>")
    }

    fn write_panel(
        &self,
        out: &mut String,
        series: &EnrichedSeries,
        panel: &Panel,
        title: &str,
        lines: &[Line<'_>],
    ) -> std::fmt::Result {
        let s = &self.settings;
        let text = escape_xml(&s.text_color);
        let grid = escape_xml(&s.grid_color);

        writeln!(
            out,
            r#"<text class="title" x="{:.1}" y="{:.1}" text-anchor="middle" font-size="16" fill="{}">{}</text>"#,
            panel.left + panel.width / 2.0,
            panel.top - 22.0,
            text,
            escape_xml(title)
        )?;

        // Horizontal grid and y labels
        let decimals = if panel.y_max - panel.y_min < 1.0 { 4 } else { 2 };
        for k in 0..=Y_TICKS {
            let value = panel.y_min + (panel.y_max - panel.y_min) * k as f64 / Y_TICKS as f64;
            let y = panel.y(value);
            writeln!(
                out,
                r#"<line class="grid" x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{grid}" stroke-width="1"/>"#,
                panel.left,
                panel.left + panel.width,
            )?;
            writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end" fill="{text}">{:.decimals$}</text>"#,
                panel.left - 6.0,
                y + 4.0,
                value,
            )?;
        }

        // Vertical grid and date labels
        let ticks = X_TICKS.min(series.len());
        for k in 0..ticks {
            let index = if ticks > 1 { k * (series.len() - 1) / (ticks - 1) } else { 0 };
            let x = panel.x(index);
            writeln!(
                out,
                r#"<line class="grid" x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{grid}" stroke-width="1"/>"#,
                panel.top,
                panel.top + panel.height,
            )?;
            writeln!(
                out,
                r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle" fill="{text}">{}</text>"#,
                panel.top + panel.height + 18.0,
                series.bars[index].bar.date.format("%Y-%m-%d"),
            )?;
        }

        writeln!(
            out,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="{text}" stroke-width="1"/>"#,
            panel.left, panel.top, panel.width, panel.height
        )?;

        for line in lines {
            self.write_series(out, series, panel, line)?;
        }
        self.write_legend(out, panel, lines)
    }

    fn write_series(&self, out: &mut String, series: &EnrichedSeries, panel: &Panel, line: &Line<'_>) -> std::fmt::Result {
        writeln!(
            out,
            r#"<g class="series" data-label="{}" stroke="{}" stroke-width="1.5" fill="none" stroke-opacity="0.8">"#,
            escape_xml(line.label),
            escape_xml(line.color)
        )?;
        let mut points = String::new();
        for (i, bar) in series.bars.iter().enumerate() {
            let value = (line.value)(bar);
            if value.is_finite() {
                write!(points, "{:.2},{:.2} ", panel.x(i), panel.y(value))?;
            } else if !points.is_empty() {
                writeln!(out, r#"<polyline points="{}"/>"#, points.trim_end())?;
                points.clear();
            }
        }
        if !points.is_empty() {
            writeln!(out, r#"<polyline points="{}"/>"#, points.trim_end())?;
        }
        writeln!(out, "</g>")
    }

    fn write_reference_line(&self, out: &mut String, panel: &Panel, level: f64, color: &str) -> std::fmt::Result {
        let y = panel.y(level);
        writeln!(
            out,
            r#"<line class="reference" data-level="{level}" x1="{:.1}" y1="{y:.2}" x2="{:.1}" y2="{y:.2}" stroke="{}" stroke-width="1.5" stroke-dasharray="6 4" stroke-opacity="0.5"/>"#,
            panel.left,
            panel.left + panel.width,
            escape_xml(color),
        )
    }

    fn write_legend(&self, out: &mut String, panel: &Panel, lines: &[Line<'_>]) -> std::fmt::Result {
        let x = panel.left + 12.0;
        for (k, line) in lines.iter().enumerate() {
            let y = panel.top + 16.0 + k as f64 * 16.0;
            writeln!(
                out,
                r#"<line class="legend" x1="{x:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{}" stroke-width="2"/>"#,
                x + 20.0,
                escape_xml(line.color),
            )?;
            writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" fill="{}">{}</text>"#,
                x + 26.0,
                y + 4.0,
                escape_xml(&self.settings.text_color),
                escape_xml(line.label),
            )?;
        }
        Ok(())
    }
}

/// Finite min/max over the plotted lines plus any fixed levels, padded by 5%.
fn value_range(series: &EnrichedSeries, lines: &[Line<'_>], levels: &[f64]) -> (f64, f64) {
    let values = series
        .bars
        .iter()
        .flat_map(|bar| lines.iter().map(move |line| (line.value)(bar)))
        .chain(levels.iter().copied())
        .filter(|v| v.is_finite());

    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return (-1.0, 1.0);
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.01 };
        return (lo - pad, hi + pad);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorSettings;
    use crate::indicators::test_support::bar;
    use crate::indicators::IndicatorSet;

    fn sample_series(len: usize) -> EnrichedSeries {
        let bars: Vec<_> = (0..len)
            .map(|i| {
                let c = 1.08 + (i as f64 * 0.3).sin() * 0.01;
                bar(i, c, c + 0.004, c - 0.004, c)
            })
            .collect();
        IndicatorSet::new(&IndicatorSettings::default()).unwrap().enrich("EUR&USD", &bars)
    }

    fn renderer() -> ChartRenderer {
        ChartRenderer::new(ChartSettings::default(), 100.0)
    }

    #[test]
    fn test_chart_contains_all_series() {
        let image = renderer().render(&sample_series(40), &[]).unwrap();
        let svg = image.svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        for label in ["Price", "20-day MA", "BB Upper", "BB Lower", "CCI"] {
            assert!(svg.contains(&format!(r#"data-label="{}""#, label)), "missing series {}", label);
        }
        assert!(svg.contains("Price with MA and Bollinger Bands"));
        assert!(svg.contains("Commodity Channel Index (CCI)"));
    }

    #[test]
    fn test_chart_has_cci_reference_lines() {
        let svg = renderer().render(&sample_series(40), &[]).unwrap().svg().to_string();
        assert!(svg.contains(r#"data-level="100""#));
        assert!(svg.contains(r#"data-level="-100""#));
        assert_eq!(svg.matches(r#"class="reference""#).count(), 2);
    }

    #[test]
    fn test_nan_warmup_is_not_plotted() {
        let series = sample_series(40);
        let svg = renderer().render(&series, &[]).unwrap().svg().to_string();
        assert!(!svg.contains("NaN"));
        // Price has 40 points; MA has 21.
        let ma_group = svg.split(r#"data-label="20-day MA""#).nth(1).unwrap();
        let polyline = ma_group.split("</g>").next().unwrap();
        let points = polyline.split("points=\"").nth(1).unwrap().split('"').next().unwrap();
        assert_eq!(points.split_whitespace().count(), 21);
    }

    #[test]
    fn test_short_series_still_renders() {
        let image = renderer().render(&sample_series(5), &[]).unwrap();
        let cci_group = image.svg().split(r#"data-label="CCI""#).nth(1).unwrap();
        let cci_group = cci_group.split("</g>").next().unwrap();
        assert!(!cci_group.contains("<polyline"));
        assert!(image.svg().contains(r#"data-level="100""#));
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(escape_xml(r#"EUR&USD <"x">"#), "EUR&amp;USD &lt;&quot;x&quot;&gt;");
    }

    #[test]
    fn test_indicator_names_in_legend() {
        let set = IndicatorSet::new(&IndicatorSettings::default()).unwrap();
        let svg = renderer().render(&sample_series(30), &set.descriptors()).unwrap().svg().to_string();
        assert!(svg.contains("SMA(20) | BB(20, 2) | CCI(20)"));
    }

    #[test]
    fn test_document_height_is_both_panels() {
        let settings = ChartSettings { panel_height: crate::config::settings::MAX_CHART_DIMENSION, ..ChartSettings::default() };
        let svg = ChartRenderer::new(settings, 100.0).render(&sample_series(25), &[]).unwrap().svg().to_string();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1500" height="40000""#));
    }

    #[test]
    fn test_empty_series_is_error() {
        let series = EnrichedSeries { symbol: "X".to_string(), bars: Vec::new() };
        assert!(matches!(renderer().render(&series, &[]), Err(EngineError::Chart(_))));
    }

    #[test]
    fn test_image_bytes_and_mime() {
        let image = renderer().render(&sample_series(25), &[]).unwrap();
        assert_eq!(image.bytes(), image.svg().as_bytes());
        assert_eq!(ChartImage::MIME_TYPE, "image/svg+xml");
    }

    #[test]
    fn test_flat_range_is_padded() {
        let series = IndicatorSet::new(&IndicatorSettings::default())
            .unwrap()
            .enrich("FLAT", &crate::indicators::test_support::bars_from_closes(&[50.0; 25]));
        let lines = [Line { label: "Price", color: "#000", value: |b| b.bar.close }];
        let (lo, hi) = value_range(&series, &lines, &[]);
        assert!(lo < 50.0 && hi > 50.0);
    }
}
