//! tmux status-line rendering

use crate::classify::{classify, ColorRule, Palette};
use crate::data::AirQualityReport;

/// Renders `#[fg=<fg>,bg=<bg>] <city> AQI: <n> `
///
/// tmux parses the `#[...]` style block, so the layout must stay byte-stable.
pub fn status_line(city: &str, aqi: i64, colors: &ColorRule) -> String {
    format!("#[fg={},bg={}] {} AQI: {} ", colors.fg, colors.bg, city, aqi)
}

/// Classifies a report and renders its status line
pub fn render(report: &AirQualityReport, palette: &Palette) -> String {
    let aqi = report.aqi_us();
    status_line(report.city(), aqi, classify(aqi, palette))
}
