//! Display formatting for monetary amounts and percentages.
//!
//! Amounts are rendered in Indonesian Rupiah style with no fraction digits
//! (`Rp87.688.133`), which is what the journal's users record their
//! portfolios in.

const CURRENCY_PREFIX: &str = "Rp";

/// Formats an amount as whole Rupiah with `.` thousands separators.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    // Avoid rendering "-Rp0" for tiny negative values.
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits, '.');

    if negative {
        format!("-{}{}", CURRENCY_PREFIX, grouped)
    } else {
        format!("{}{}", CURRENCY_PREFIX, grouped)
    }
}

/// Formats a gain or loss, prefixing strictly positive amounts with `+`.
pub fn format_signed_currency(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_currency(value))
    } else {
        format_currency(value)
    }
}

/// Formats an amount in whole millions, as used on chart axes (`88M`).
pub fn format_compact_millions(value: f64) -> String {
    format!("{:.0}M", value / 1_000_000.0)
}

/// Formats an amount with a magnitude suffix (`88M`, `1B`, `1.3B`).
pub fn format_compact_amount(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000_000.0 {
        format!("{}B", trim_one_decimal(value / 1_000_000_000.0))
    } else if magnitude >= 1_000_000.0 {
        format!("{:.0}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

fn trim_one_decimal(value: f64) -> String {
    let formatted = format!("{:.1}", value);
    formatted
        .strip_suffix(".0")
        .map(str::to_string)
        .unwrap_or(formatted)
}

/// Formats a percentage the way it was recorded (`4.74%`, `83.3%`, `0%`).
pub fn format_percentage(value: f64) -> String {
    format!("{}%", value)
}

/// Formats a percentage with an explicit sign for gains (`+4.74%`).
pub fn format_signed_percentage(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_percentage(value))
    } else {
        format_percentage(value)
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
