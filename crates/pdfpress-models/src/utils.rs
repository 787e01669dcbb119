//! Small shared helpers.

/// Format a byte count as megabytes with two decimals, e.g. `4.87 MB`.
///
/// Matches the summary format the front-end shows after a finished resize.
pub fn format_megabytes(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    format!("{:.2} MB", bytes as f64 / MB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(0), "0.00 MB");
        assert_eq!(format_megabytes(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_megabytes(1_572_864), "1.50 MB");
    }
}
