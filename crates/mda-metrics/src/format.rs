/// Currency with magnitude suffix: `$1.25M` from one million, `$12.3K` from one
/// thousand, whole dollars below that. Negative values get a leading `-`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{}${:.2}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.1}K", sign, abs / 1_000.0)
    } else {
        let whole = abs.round();
        // -0.4 rounds to "$0", not "-$0"
        if whole == 0.0 {
            "$0".to_string()
        } else {
            format!("{}${:.0}", sign, whole)
        }
    }
}

/// Percentage to one decimal.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value)
}

pub fn format_ratio(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, 0.0);
    }
    format!("{:.*}", decimals, value)
}
