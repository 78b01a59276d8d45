use crate::locale::Locale;
use crate::models::{Coordinates, LookupReport};

const UNKNOWN: &str = "--";

/// Formats a lookup report into a human-readable string
pub fn format_report(report: &LookupReport, locale: Locale) -> String {
    let labels = locale.labels();
    let weather = &report.weather;

    let mut output = format!("{}\n\n", report.display_name);
    output.push_str(&format!(
        "  {}: {}\n",
        labels.temperature,
        weather
            .temperature_c
            .map_or_else(|| UNKNOWN.to_string(), |t| format!("{:.1}\u{00b0}C", t))
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        labels.humidity,
        weather
            .humidity_pct
            .map_or_else(|| UNKNOWN.to_string(), |h| format!("{}%", h.round()))
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        labels.precipitation,
        weather
            .precipitation_mm
            .map_or_else(|| UNKNOWN.to_string(), |p| format!("{:.1} mm", p))
    ));
    output.push_str(&format!(
        "  {}: {}%\n",
        labels.rain_chance,
        weather.rain_chance_pct.round()
    ));

    if let Some(advice) = report.advice {
        output.push_str(&format!("\n{}\n", advice.message(locale)));
    }

    output.push_str(&format!("\n{}\n", labels.attribution));
    output
}

/// Formats geocoding candidates as a numbered list
pub fn format_candidates(candidates: &[Coordinates]) -> String {
    let mut output = String::from("Matching places:\n\n");
    for (i, place) in candidates.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} ({:.4}, {:.4})\n",
            i + 1,
            place.display_name(),
            place.latitude,
            place.longitude
        ));
    }
    output
}
