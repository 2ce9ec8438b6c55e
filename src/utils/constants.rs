/// Canonical coordinate column names
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// Substrings that mark a column as a coordinate column
pub const LATITUDE_PATTERN: &str = "lat";
pub const LONGITUDE_PATTERN: &str = "lon";

/// Cell values treated as missing, in addition to empty cells
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Session defaults
pub const DEFAULT_SUBSET_SIZE: usize = 10_000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
/// Distinct subset sizes whose points are kept per session
pub const GEOMETRY_CACHE_CAPACITY: usize = 8;
pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_USER_AGENT: &str = concat!("datamap/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_CONFIG_FILE: &str = "datamap.toml";
pub const ENV_PREFIX: &str = "DATAMAP";

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
