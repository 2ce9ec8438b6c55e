use crate::error::{ProcessingError, Result};
use crate::models::{Point, PointGeometry, TableSlice};
use crate::utils::constants::{LATITUDE, LONGITUDE};
use crate::utils::coordinates::{median, parse_coordinate};
use tracing::debug;

/// Turns canonical rows into ordered points and a median centroid
pub struct GeometryDeriver;

impl GeometryDeriver {
    pub fn new() -> Self {
        Self
    }

    pub fn derive(&self, slice: TableSlice<'_>) -> Result<PointGeometry> {
        let table = slice.table();
        let lat_idx = table
            .latitude_index()
            .ok_or_else(|| ProcessingError::MissingColumn(LATITUDE.to_string()))?;
        let lon_idx = table
            .longitude_index()
            .ok_or_else(|| ProcessingError::MissingColumn(LONGITUDE.to_string()))?;

        let points = slice
            .rows()
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                let latitude = coordinate(cells[lat_idx].as_deref(), LATITUDE, row)?;
                let longitude = coordinate(cells[lon_idx].as_deref(), LONGITUDE, row)?;
                Ok(Point::new(latitude, longitude))
            })
            .collect::<Result<Vec<Point>>>()?;

        let latitudes: Vec<f64> = points.iter().map(|p| p.latitude).collect();
        let longitudes: Vec<f64> = points.iter().map(|p| p.longitude).collect();
        let centroid = match (median(&latitudes), median(&longitudes)) {
            (Some(lat), Some(lon)) => Some(Point::new(lat, lon)),
            _ => None,
        };

        debug!("derived {} points", points.len());
        Ok(PointGeometry { points, centroid })
    }
}

impl Default for GeometryDeriver {
    fn default() -> Self {
        Self::new()
    }
}

fn coordinate(value: Option<&str>, column: &str, row: usize) -> Result<f64> {
    match value {
        Some(v) => parse_coordinate(v, column, row),
        None => Err(ProcessingError::Conversion {
            column: column.to_string(),
            row,
            value: String::new(),
        }),
    }
}
