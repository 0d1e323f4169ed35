//! Duration formatting for log lines.

/// Format a duration in seconds as a compact human-readable string.
///
/// Shows the two most significant units: `45s`, `30m 0s`, `23h 59m`, `2d 1h`.
pub fn format_duration(secs: u64) -> String {
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3_599 => format!("{}m {}s", secs / 60, secs % 60),
        3_600..=86_399 => format!("{}h {}m", secs / 3_600, (secs % 3_600) / 60),
        _ => format!("{}d {}h", secs / 86_400, (secs % 86_400) / 3_600),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_unit() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(1_800), "30m 0s");
        assert_eq!(format_duration(86_390), "23h 59m");
        assert_eq!(format_duration(86_400), "1d 0h");
        assert_eq!(format_duration(176_400), "2d 1h");
    }
}
