use super::clip_error::ClipError;

/// Parse `hh:mm:ss[.fff]` or `mm:ss[.fff]` into milliseconds.
///
/// The fraction is read as digits of a millisecond field: `"1.5"` is 1500ms
/// and `"1.05"` is 1050ms. Digits beyond the third are dropped.
pub fn parse_time(text: &str) -> Result<u64, ClipError> {
    let invalid = || ClipError::InvalidTimeFormat(text.to_string());
    let trimmed = text.trim();

    let mut parts: Vec<&str> = trimmed.split(':').collect();
    let last = parts.pop().ok_or_else(invalid)?;
    let (seconds, millis) = match last.split_once('.') {
        Some((seconds, fraction)) => (seconds, parse_fraction(fraction).ok_or_else(invalid)?),
        None => (last, 0),
    };
    parts.push(seconds);

    let fields = parts
        .iter()
        .map(|part| parse_field(part))
        .collect::<Option<Vec<u64>>>()
        .ok_or_else(invalid)?;

    let (hours, minutes, seconds) = match fields.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => (0, *m, *s),
        _ => return Err(invalid()),
    };

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|total| total.checked_add(seconds))
        .and_then(|total| total.checked_mul(1000))
        .and_then(|total| total.checked_add(millis))
        .ok_or_else(invalid)
}

fn parse_field(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn parse_fraction(fraction: &str) -> Option<u64> {
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits: String = fraction.chars().take(3).collect();
    format!("{digits:0<3}").parse().ok()
}

/// Render milliseconds as `hh:mm:ss.fff`.
pub fn format_time(millis: u64) -> String {
    let total_secs = millis / 1000;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60,
        millis % 1000
    )
}
