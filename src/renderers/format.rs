//! Number formatting for tooltips and SVG attributes.

/// Typographic minus used for negative values.
const MINUS: char = '\u{2212}';

/// Format a flow value for display: rounded to an integer, thousands grouped
/// with `,`, followed by ` {units}` when units are given and non-empty.
///
/// ```
/// use sankey_svg::renderers::format::format_value;
/// assert_eq!(format_value(1234.6, Some("TWh")), "1,235 TWh");
/// assert_eq!(format_value(42.0, None), "42");
/// ```
pub fn format_value(value: f64, units: Option<&str>) -> String {
    let number = group_thousands(value);
    match units {
        Some(u) if !u.is_empty() => format!("{number} {u}"),
        _ => number,
    }
}

fn group_thousands(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 {
            "Infinity".to_string()
        } else {
            format!("{MINUS}Infinity")
        };
    }

    let rounded = value.abs().round();
    let digits = format!("{rounded:.0}");
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    // A value that rounds to zero loses its sign.
    if value < 0.0 && rounded != 0.0 {
        out.push(MINUS);
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Compact decimal form for SVG attributes: at most three fractional digits,
/// trailing zeros dropped, never `-0`.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_format.rs"]
mod tests;
