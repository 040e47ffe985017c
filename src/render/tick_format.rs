/// Formats an axis tick with thousands separators and just enough decimals for `step`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_tick_label(value: f64, step: f64) -> String {
    let decimals = if step.is_finite() && step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };

    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::format_tick_label;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_tick_label(0.0, 100_000.0), "0");
        assert_eq!(format_tick_label(500_000.0, 100_000.0), "500,000");
        assert_eq!(format_tick_label(1_234_567.0, 1.0), "1,234,567");
    }

    #[test]
    fn keeps_decimals_for_sub_unit_steps() {
        assert_eq!(format_tick_label(0.2, 0.2), "0.2");
        assert_eq!(format_tick_label(0.05, 0.05), "0.05");
        assert_eq!(format_tick_label(-1500.0, 500.0), "-1,500");
    }
}
