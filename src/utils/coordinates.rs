use crate::error::{ProcessingError, Result};
use crate::utils::constants::NA_TOKENS;

/// True when a cell counts as missing: empty, whitespace-only, or a recognised NA token
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || NA_TOKENS.contains(&trimmed)
}

/// Parse a coordinate cell as a finite decimal number
///
/// `column` and `row` are only used to build the error.
///
/// # Examples
/// ```
/// use datamap::utils::coordinates::parse_coordinate;
///
/// let value = parse_coordinate(" 51.5074 ", "latitude", 0).unwrap();
/// assert!((value - 51.5074).abs() < 0.000001);
/// assert!(parse_coordinate("51:30:26", "latitude", 0).is_err());
/// ```
pub fn parse_coordinate(value: &str, column: &str, row: usize) -> Result<f64> {
    let conversion_error = || ProcessingError::Conversion {
        column: column.to_string(),
        row,
        value: value.to_string(),
    };

    let parsed = value.trim().parse::<f64>().map_err(|_| conversion_error())?;

    // f64::from_str accepts "inf" and "NaN"
    if !parsed.is_finite() {
        return Err(conversion_error());
    }

    Ok(parsed)
}

/// Median of a set of values; the mean of the two middle values for even counts
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_values() {
        assert!(is_null_value(""));
        assert!(is_null_value("   "));
        assert!(is_null_value("NA"));
        assert!(is_null_value(" NaN "));
        assert!(is_null_value(" NA "));
        assert!(is_null_value("\tN/A\t"));
        assert!(is_null_value("\t"));
        assert!(is_null_value("null"));
        assert!(!is_null_value("0"));
        assert!(!is_null_value("abc"));
    }

    #[test]
    fn test_parse_coordinate() {
        assert!((parse_coordinate("51.5074", "latitude", 0).unwrap() - 51.5074).abs() < 0.000001);
        assert!((parse_coordinate(" -0.1278 ", "longitude", 0).unwrap() - -0.1278).abs() < 0.000001);
        assert_eq!(parse_coordinate("1e2", "latitude", 0).unwrap(), 100.0);
    }

    #[test]
    fn test_parse_coordinate_rejects_non_finite() {
        for bad in ["abc", "inf", "-inf", "NaN", "12,5", "51:30:26"] {
            let err = parse_coordinate(bad, "latitude", 3).unwrap_err();
            match err {
                ProcessingError::Conversion { column, row, value } => {
                    assert_eq!(column, "latitude");
                    assert_eq!(row, 3);
                    assert_eq!(value, bad);
                }
                other => panic!("unexpected error for {}: {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        // Robust to an outlier, unlike the mean
        assert_eq!(median(&[1.0, 2.0, 1000.0]), Some(2.0));
    }
}
