//! Number layouts shared by the report, the chart labels and the console.

/// Rounds to two decimals and prints the shortest form of the result with at
/// least one decimal digit and comma-grouped thousands:
/// `100.0`, `81.65`, `12,345.6`.
///
/// This is the layout of every amount in the emailed report.
pub fn rounded_amount(value: f64) -> String {
    let rounded = format!("{value:.2}").parse::<f64>().unwrap_or(value);
    let mut text = rounded.to_string();
    if rounded.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }

    group_thousands(&text)
}

/// Two fixed decimals with comma-grouped thousands: `42,000.00`.
pub fn fixed_amount(value: f64) -> String {
    group_thousands(&format!("{value:.2}"))
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(text.len() + integer.len() / 3);
    out.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    out
}
