use crate::error::{ProcessingError, Result};
use crate::models::{Cell, RawTable};
use crate::utils::constants::DEFAULT_DELIMITER;
use crate::utils::coordinates::is_null_value;
use csv::ReaderBuilder;
use encoding_rs::UTF_8;

/// Parses delimited text with a header row into a [`RawTable`]
pub struct CsvTableReader {
    delimiter: u8,
}

impl CsvTableReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    pub fn with_delimiter(delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(ProcessingError::Config(format!(
                "Delimiter must be a single ASCII character, got: '{}'",
                delimiter
            )));
        }
        Ok(Self {
            delimiter: delimiter as u8,
        })
    }

    /// Decode and parse raw bytes. A leading UTF-8 BOM is ignored.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<RawTable> {
        let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(ProcessingError::Parse(
                "Input is not valid UTF-8 text".to_string(),
            ));
        }
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<RawTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| ProcessingError::Parse(format!("Invalid header row: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        if columns.is_empty() || columns.iter().all(|c| c.trim().is_empty()) {
            return Err(ProcessingError::Parse("No header row found".to_string()));
        }

        let mut rows = Vec::new();
        for (line_count, record_result) in reader.records().enumerate() {
            let record = record_result
                .map_err(|e| ProcessingError::Parse(format!("Malformed record: {}", e)))?;

            // Data rows start on line 2
            let line = line_count + 2;
            if record.len() > columns.len() {
                return Err(ProcessingError::Parse(format!(
                    "Expected {} fields on line {}, saw {}",
                    columns.len(),
                    line,
                    record.len()
                )));
            }

            let mut row: Vec<Cell> = record.iter().map(parse_cell).collect();
            // Short rows are padded with missing values
            row.resize(columns.len(), None);
            rows.push(row);
        }

        Ok(RawTable::new(columns, rows))
    }
}

impl Default for CsvTableReader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_cell(value: &str) -> Cell {
    if is_null_value(value) {
        None
    } else {
        Some(value.to_string())
    }
}
