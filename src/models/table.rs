use crate::utils::constants::{LATITUDE, LONGITUDE};
use serde::Serialize;

/// A single cell; `None` is a missing value
pub type Cell = Option<String>;

/// Header plus data rows exactly as parsed, before any renaming or filtering
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Table with lower-cased column names and at most one `latitude` and one
/// `longitude` column, neither of which holds a missing value.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl CanonicalTable {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let latitude = columns.iter().position(|c| c == LATITUDE);
        let longitude = columns.iter().position(|c| c == LONGITUDE);
        Self {
            columns,
            rows,
            latitude,
            longitude,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn latitude_index(&self) -> Option<usize> {
        self.latitude
    }

    pub fn longitude_index(&self) -> Option<usize> {
        self.longitude
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Values of one column, in row order
    pub fn column_values(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).and_then(|c| c.as_deref()))
                .collect(),
        )
    }

    /// The leading `n` rows, clamped to the table length
    pub fn head(&self, n: usize) -> TableSlice<'_> {
        TableSlice {
            table: self,
            len: n.min(self.rows.len()),
        }
    }

    pub fn all(&self) -> TableSlice<'_> {
        self.head(self.rows.len())
    }
}

/// Borrowed view over the leading rows of a [`CanonicalTable`]
#[derive(Debug, Clone, Copy)]
pub struct TableSlice<'a> {
    table: &'a CanonicalTable,
    len: usize,
}

impl<'a> TableSlice<'a> {
    pub fn table(&self) -> &'a CanonicalTable {
        self.table
    }

    pub fn columns(&self) -> &'a [String] {
        &self.table.columns
    }

    pub fn rows(&self) -> &'a [Vec<Cell>] {
        &self.table.rows[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Plain-text rendering for terminal previews
    pub fn render(&self) -> String {
        let mut out = self.columns().join("\t");
        for row in self.rows() {
            out.push('\n');
            let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("NA")).collect();
            out.push_str(&cells.join("\t"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(value: &str) -> Cell {
        Some(value.to_string())
    }

    fn sample_table() -> CanonicalTable {
        CanonicalTable::new(
            vec!["name".to_string(), "latitude".to_string(), "longitude".to_string()],
            vec![
                vec![cell("a"), cell("1.0"), cell("10.0")],
                vec![None, cell("2.0"), cell("20.0")],
                vec![cell("c"), cell("3.0"), cell("30.0")],
            ],
        )
    }

    #[test]
    fn test_coordinate_indices() {
        let table = sample_table();
        assert_eq!(table.latitude_index(), Some(1));
        assert_eq!(table.longitude_index(), Some(2));
        assert!(table.has_coordinates());
        assert_eq!(table.column_index("name"), Some(0));
        assert_eq!(table.column_index("missing"), None);
    }

    #[test]
    fn test_head_clamps_to_length() {
        let table = sample_table();
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(100).len(), 3);
        assert!(table.head(0).is_empty());
        assert_eq!(table.head(1).rows()[0][0].as_deref(), Some("a"));
    }

    #[test]
    fn test_column_values() {
        let table = sample_table();
        assert_eq!(
            table.column_values("name"),
            Some(vec![Some("a"), None, Some("c")])
        );
        assert_eq!(table.column_values("nope"), None);
    }

    #[test]
    fn test_render_marks_missing_cells() {
        let table = sample_table();
        let rendered = table.head(2).render();
        assert_eq!(
            rendered,
            "name\tlatitude\tlongitude\na\t1.0\t10.0\nNA\t2.0\t20.0"
        );
    }
}
