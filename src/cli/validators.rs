//! CLI argument validators.

/// Shortest synthetic run that still has warm-up, interval and cool-down.
const MIN_MOCK_DURATION_SECS: u32 = 400;

/// Longest synthetic run (six hours).
const MAX_MOCK_DURATION_SECS: u32 = 6 * 3600;

/// Parse and validate a mock run duration in seconds.
pub fn parse_duration_secs(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number of seconds"))?;

    if !(MIN_MOCK_DURATION_SECS..=MAX_MOCK_DURATION_SECS).contains(&value) {
        return Err(format!(
            "duration must be between {MIN_MOCK_DURATION_SECS} and {MAX_MOCK_DURATION_SECS} seconds, got {value}"
        ));
    }

    Ok(value)
}
