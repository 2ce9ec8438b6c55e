use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default Parquet filename with format: datamap-points-{YYMMDD}.parquet
pub fn generate_default_points_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("datamap-points-{:02}{:02}{:02}.parquet", year, month, day);
    PathBuf::from("output").join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_points_filename() {
        let filename = generate_default_points_filename();
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output/"));
        assert!(filename_str.ends_with(".parquet"));

        let parts: Vec<&str> = filename_str.split('/').collect();
        assert_eq!(parts.len(), 2);

        let file_part = parts[1];
        assert!(file_part.starts_with("datamap-points-"));
        // datamap-points- + YYMMDD + .parquet
        assert_eq!(file_part.len(), "datamap-points-".len() + 6 + ".parquet".len());
    }
}
