//! Duration literals such as `"1h30m"`, `"1.5s"` or `"250ms"`.
//!
//! Durations are stored in documents as text; [`format_duration`] produces the
//! canonical form and [`parse_duration`] reads it (and any other valid literal) back.

use std::time::Duration;

use crate::error::DurationParseError;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

fn unit_scale(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(60 * NANOS_PER_SECOND),
        "h" => Some(3_600 * NANOS_PER_SECOND),
        _ => None,
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parses `[+-]? (number unit)+`, or the bare literal `0`.
pub fn parse_duration(literal: &str) -> Result<Duration, DurationParseError> {
    if literal.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let (negative, mut rest) = match literal.as_bytes()[0] {
        b'-' => (true, &literal[1..]),
        b'+' => (false, &literal[1..]),
        _ => (false, literal),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationParseError::InvalidNumber(literal.to_owned()));
    }

    let overflow = || DurationParseError::Overflow(literal.to_owned());
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(DurationParseError::InvalidNumber(literal.to_owned()));
        }

        let unit_end = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, after_unit) = after_number.split_at(unit_end);
        if unit.is_empty() {
            return Err(DurationParseError::MissingUnit(literal.to_owned()));
        }
        let scale = unit_scale(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_owned(),
            literal: literal.to_owned(),
        })?;

        let whole_value = if whole.is_empty() {
            0
        } else {
            whole.parse::<u128>().map_err(|_| overflow())?
        };
        let mut nanos = whole_value.checked_mul(scale).ok_or_else(overflow)?;

        // Digits past the 19th cannot move the result by a full nanosecond.
        let fraction = &fraction[..fraction.len().min(19)];
        if !fraction.is_empty() {
            let numerator = fraction.parse::<u128>().map_err(|_| overflow())?;
            let denominator = 10u128.pow(fraction.len() as u32);
            nanos = nanos.checked_add(numerator * scale / denominator).ok_or_else(overflow)?;
        }

        total = total.checked_add(nanos).ok_or_else(overflow)?;
        rest = after_unit;
    }

    if negative && total != 0 {
        return Err(DurationParseError::Negative(literal.to_owned()));
    }

    let seconds = u64::try_from(total / NANOS_PER_SECOND).map_err(|_| overflow())?;
    Ok(Duration::new(seconds, (total % NANOS_PER_SECOND) as u32))
}

/// `value / 10^precision` as decimal text with trailing fraction zeros trimmed.
fn format_scaled(value: u128, precision: u32) -> String {
    let scale = 10u128.pow(precision);
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }

    let digits = format!("{:0width$}", fraction, width = precision as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Canonical text for a duration: `0s`, `40ns`, `1.5µs`, `250ms`, `32s`, `1m30s`, `1h0m0s`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return String::from("0s");
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}µs", format_scaled(nanos, 3));
    }
    if nanos < NANOS_PER_SECOND {
        return format!("{}ms", format_scaled(nanos, 6));
    }

    let total_seconds = nanos / NANOS_PER_SECOND;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = format_scaled(nanos % (60 * NANOS_PER_SECOND), 9);

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    out.push_str(&seconds);
    out.push('s');
    out
}
