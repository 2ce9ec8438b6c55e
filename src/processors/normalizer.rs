use crate::error::Result;
use crate::models::{CanonicalTable, Cell, RawTable};
use crate::readers::CsvTableReader;
use crate::utils::constants::{LATITUDE, LATITUDE_PATTERN, LONGITUDE, LONGITUDE_PATTERN};
use tracing::{info, warn};

/// Which source column feeds each canonical coordinate column
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnMapping {
    /// Lower-cased source column names, in source order
    pub names: Vec<String>,
    pub latitude: Option<usize>,
    pub longitude: Option<usize>,
    /// Coordinate-like columns replaced by a later match
    pub superseded: Vec<usize>,
}

impl ColumnMapping {
    /// Lower-case every name and pick the coordinate columns by substring.
    ///
    /// "lon" is tested before "lat", and a column renamed to `longitude` is
    /// never also taken as `latitude`. When several columns match the same
    /// substring the last one wins. Substring matching is loose on purpose:
    /// `latency` or `platform` will be read as latitude.
    pub fn from_headers(headers: &[String]) -> Self {
        let names: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
        let mut latitude = None;
        let mut longitude = None;
        let mut superseded = Vec::new();

        for (idx, name) in names.iter().enumerate() {
            if name.contains(LONGITUDE_PATTERN) {
                if let Some(previous) = longitude.replace(idx) {
                    superseded.push(previous);
                }
            } else if name.contains(LATITUDE_PATTERN) {
                if let Some(previous) = latitude.replace(idx) {
                    superseded.push(previous);
                }
            }
        }
        superseded.sort_unstable();

        Self {
            names,
            latitude,
            longitude,
            superseded,
        }
    }

    /// Output name for a source column, `None` when the column is dropped
    fn output_name(&self, idx: usize) -> Option<&str> {
        if self.latitude == Some(idx) {
            Some(LATITUDE)
        } else if self.longitude == Some(idx) {
            Some(LONGITUDE)
        } else if self.superseded.contains(&idx) {
            None
        } else {
            Some(self.names[idx].as_str())
        }
    }
}

/// Result of normalizing one input
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub table: CanonicalTable,
    /// Data rows before filtering
    pub original_row_count: usize,
}

impl NormalizedTable {
    pub fn dropped_row_count(&self) -> usize {
        self.original_row_count - self.table.row_count()
    }
}

pub struct Normalizer {
    reader: CsvTableReader,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            reader: CsvTableReader::new(),
        }
    }

    pub fn with_reader(reader: CsvTableReader) -> Self {
        Self { reader }
    }

    /// Parse raw bytes and canonicalize them
    pub fn normalize(&self, input: &[u8]) -> Result<NormalizedTable> {
        let raw = self.reader.read_bytes(input)?;
        Ok(self.canonicalize(raw))
    }

    /// Rename the coordinate columns, then drop rows missing either coordinate.
    /// A coordinate column that does not exist at all filters nothing.
    pub fn canonicalize(&self, raw: RawTable) -> NormalizedTable {
        let original_row_count = raw.row_count();
        let mapping = ColumnMapping::from_headers(&raw.columns);

        for &idx in &mapping.superseded {
            warn!(
                "column '{}' is superseded by a later coordinate column and was removed",
                raw.columns[idx]
            );
        }

        let kept: Vec<usize> = (0..mapping.names.len())
            .filter(|&idx| mapping.output_name(idx).is_some())
            .collect();
        let columns: Vec<String> = kept
            .iter()
            .filter_map(|&idx| mapping.output_name(idx).map(str::to_string))
            .collect();

        let width = mapping.names.len();
        let rows: Vec<Vec<Cell>> = raw
            .rows
            .into_iter()
            // Rows built by hand may be ragged
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, None);
                }
                row
            })
            .filter(|row| {
                let present = |col: Option<usize>| col.map_or(true, |idx| row[idx].is_some());
                present(mapping.latitude) && present(mapping.longitude)
            })
            .map(|mut row| kept.iter().map(|&idx| row[idx].take()).collect::<Vec<Cell>>())
            .collect();

        let table = CanonicalTable::new(columns, rows);
        let dropped = original_row_count - table.row_count();
        if dropped > 0 {
            warn!(
                "{} rows with missing latitude/longitude values were removed",
                dropped
            );
        }
        info!(
            "normalized {} of {} rows ({} columns)",
            table.row_count(),
            original_row_count,
            table.columns().len()
        );

        NormalizedTable {
            table,
            original_row_count,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
