//! Flight duration strings.
//!
//! Two notations reach the pipeline: the display form (`"2h 30m"`, `"45min"`)
//! and ISO-8601 durations from the upstream API (`"PT2H30M"`). Both parse to
//! whole minutes, and malformed input never fails: unreadable fragments simply
//! contribute nothing.

const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Total minutes for a display or ISO-8601 duration. Empty input yields 0.
pub fn parse_minutes(input: &str) -> u32 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Some(minutes) = parse_iso(trimmed) {
        return minutes;
    }
    scan_display(trimmed)
}

/// Strict ISO-8601 parse (`P[nD][T[nH][nM][nS]]`). Seconds are dropped.
pub fn parse_iso(input: &str) -> Option<u32> {
    let rest = input.strip_prefix(['P', 'p'])?;
    let (date_part, time_part) = match rest.find(['T', 't']) {
        Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
        None => (rest, None),
    };

    let mut minutes = 0u32;
    let mut matched = false;

    for (value, unit) in designators(date_part)? {
        match unit.to_ascii_uppercase() {
            'D' => minutes = minutes.saturating_add(value.saturating_mul(MINUTES_PER_DAY)),
            _ => return None,
        }
        matched = true;
    }

    if let Some(time_part) = time_part {
        for (value, unit) in designators(time_part)? {
            match unit.to_ascii_uppercase() {
                'H' => minutes = minutes.saturating_add(value.saturating_mul(MINUTES_PER_HOUR)),
                'M' => minutes = minutes.saturating_add(value),
                'S' => {}
                _ => return None,
            }
            matched = true;
        }
    }

    matched.then_some(minutes)
}

/// Rewrites an ISO-8601 duration into the display form ("PT2H30M" -> "2h 30m").
///
/// Input that is not an ISO duration is returned unchanged.
pub fn format_iso(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match parse_iso(trimmed) {
        Some(minutes) => format_minutes(minutes),
        None => trimmed.to_string(),
    }
}

/// Display form of a minute count: "2h 30m", "3h", "45m".
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / MINUTES_PER_HOUR;
    let rest = minutes % MINUTES_PER_HOUR;
    match (hours, rest) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Splits "1D" / "2H30M" into (value, unit) pairs; None on a dangling number.
fn designators(part: &str) -> Option<Vec<(u32, char)>> {
    let mut out = Vec::new();
    let mut digits = String::new();
    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c.is_ascii_alphabetic() {
            if digits.is_empty() {
                return None;
            }
            out.push((digits.parse().unwrap_or(0), c));
            digits.clear();
        } else {
            return None;
        }
    }
    digits.is_empty().then_some(out)
}

/// Reads `<N>h` / `<N>m` / `<N>min` runs, tolerating missing spaces.
fn scan_display(input: &str) -> u32 {
    let mut total = 0u32;
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            chars.next();
            continue;
        }

        let mut digits = String::new();
        while let Some(&d) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }

        let mut unit = String::new();
        while let Some(&u) = chars.peek() {
            if !u.is_ascii_alphabetic() {
                break;
            }
            unit.push(u.to_ascii_lowercase());
            chars.next();
        }

        let value: u32 = digits.parse().unwrap_or(0);
        let contribution = if unit.starts_with('h') {
            value.saturating_mul(MINUTES_PER_HOUR)
        } else if unit.starts_with('m') {
            value
        } else {
            0
        };
        total = total.saturating_add(contribution);
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(parse_minutes("2h 30m"), 150);
        assert_eq!(parse_minutes("45m"), 45);
        assert_eq!(parse_minutes("45min"), 45);
        assert_eq!(parse_minutes("3h"), 180);
        assert_eq!(parse_minutes("2h30m"), 150);
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_eq!(parse_minutes(""), 0);
        assert_eq!(parse_minutes("   "), 0);
        assert_eq!(parse_minutes("soon"), 0);
        assert_eq!(parse_minutes("xh 20m"), 20);
        assert_eq!(parse_minutes("5"), 0);
        assert_eq!(parse_minutes("99999999999h 5m"), 5);
    }

    #[test]
    fn test_iso_forms() {
        assert_eq!(parse_minutes("PT2H30M"), 150);
        assert_eq!(parse_minutes("PT45M"), 45);
        assert_eq!(parse_minutes("PT3H"), 180);
        assert_eq!(parse_minutes("P1DT2H"), 1560);
        assert_eq!(parse_iso("PT"), None);
        assert_eq!(parse_iso("2h 30m"), None);
    }

    #[test]
    fn test_display_and_iso_agree() {
        for h in 0..30u32 {
            for m in 0..60u32 {
                let expected = h * 60 + m;
                assert_eq!(parse_minutes(&format!("{}h {}m", h, m)), expected);
                assert_eq!(parse_minutes(&format!("PT{}H{}M", h, m)), expected);
            }
        }
    }

    #[test]
    fn test_format_iso() {
        assert_eq!(format_iso("PT2H30M"), "2h 30m");
        assert_eq!(format_iso("PT2H"), "2h");
        assert_eq!(format_iso("PT55M"), "55m");
        assert_eq!(format_iso("P1DT1H"), "25h");
        assert_eq!(format_iso(""), "");
        assert_eq!(format_iso("about two hours"), "about two hours");
        assert_eq!(parse_minutes(&format_iso("PT7H05M")), 425);
    }
}
