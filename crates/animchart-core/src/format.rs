// File: crates/animchart-core/src/format.rs
// Summary: Number formatting, tick-label rounding and tooltip message templates.

use num_format::{CustomFormat, ToFormattedString};

use crate::config::TooltipPattern;

pub const LINE_BREAK: &str = "<br>";

/// Round half-up to `decimals` places.
pub fn round_to(v: f64, decimals: u32) -> f64 {
    let exp = 10f64.powi(decimals as i32);
    (v * exp + 0.5).floor() / exp
}

/// Shortest decimal rendering: `30`, `12.5`, `0.01`.
pub fn format_plain(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/// Fixed decimals, custom decimal separator and thousands grouping.
/// Separators longer than 8 bytes leave the integer part ungrouped.
pub fn format_number(v: f64, decimals: u32, decimal_separator: &str, thousand_separator: &str) -> String {
    let fixed = format!("{:.*}", decimals as usize, v);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", int_part),
    };

    let grouped = match (digits.parse::<u128>(), CustomFormat::builder().separator(thousand_separator).build()) {
        (Ok(n), Ok(format)) => n.to_formatted_string(&format),
        _ => digits.to_string(),
    };

    match frac_part {
        Some(f) => format!("{sign}{grouped}{decimal_separator}{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Value as shown in tooltips (`#val`).
pub fn format_value(v: f64, pattern: Option<&TooltipPattern>) -> String {
    match pattern {
        Some(p) => format_number(v, p.decimals, &p.decimal_separator, &p.thousand_separator),
        None => format_plain(v),
    }
}

/// Y-axis tick label: two decimals, or the pattern's decimals.
pub fn tick_label(v: f64, pattern: Option<&TooltipPattern>) -> String {
    let decimals = pattern.map(|p| p.decimals).unwrap_or(2);
    format_plain(round_to(v, decimals))
}

/// Substitutions for a tooltip template.
#[derive(Clone, Debug, Default)]
pub struct MessageValues {
    pub value: String,
    pub total: Option<String>,
    pub percent: Option<String>,
}

/// Replace every `#val`, `#total` and `#percent` marker.
pub fn expand_message(template: &str, values: &MessageValues) -> String {
    let mut out = template.replace("#percent", values.percent.as_deref().unwrap_or(""));
    out = out.replace("#total", values.total.as_deref().unwrap_or(""));
    out.replace("#val", &values.value)
}

pub fn split_lines(message: &str) -> Vec<&str> {
    message.split(LINE_BREAK).collect()
}
