/// Format an optional amount as dollars with thousands separators: $1,234,567.
/// Shows up to three fraction digits, trailing zeros dropped. Absent and NaN
/// values render as an empty string.
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("${}", grouped(v)),
        _ => String::new(),
    }
}

/// Format an optional count as the raw number, no grouping and no prefix.
pub fn format_count(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => v.to_string(),
        _ => String::new(),
    }
}

fn grouped(val: f64) -> String {
    if val.is_infinite() {
        return if val < 0.0 { "-\u{221e}".into() } else { "\u{221e}".into() };
    }

    let fixed = format!("{:.3}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let dec_part = dec_part.trim_end_matches('0');

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    // -0 and values that round to zero print unsigned, unlike JS toLocaleString
    let rounds_to_zero = int_part.chars().all(|c| c == '0') && dec_part.is_empty();
    let sign = if val < 0.0 && !rounds_to_zero { "-" } else { "" };

    if dec_part.is_empty() {
        format!("{sign}{with_commas}")
    } else {
        format!("{sign}{with_commas}.{dec_part}")
    }
}
