use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `[latitude, longitude]`, the order heatmap and cluster layers expect
    pub fn to_pair(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Ordered points plus the per-axis median used to center a map view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    pub points: Vec<Point>,
    /// `None` when there are no points
    pub centroid: Option<Point>,
}

impl PointGeometry {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(Point::to_pair).collect()
    }

    pub fn bounds(&self) -> Option<GeographicBounds> {
        let first = self.points.first()?;
        let init = GeographicBounds {
            min_lat: first.latitude,
            max_lat: first.latitude,
            min_lon: first.longitude,
            max_lon: first.longitude,
        };

        Some(self.points.iter().fold(init, |b, p| GeographicBounds {
            min_lat: b.min_lat.min(p.latitude),
            max_lat: b.max_lat.max(p.latitude),
            min_lon: b.min_lon.min(p.longitude),
            max_lon: b.max_lon.max(p.longitude),
        }))
    }

    pub fn summary(&self) -> String {
        let mut summary = format!("Points: {}", self.points.len());
        match self.centroid {
            Some(c) => summary.push_str(&format!(
                "\nCentroid (median): {:.6}, {:.6}",
                c.latitude, c.longitude
            )),
            None => summary.push_str("\nCentroid (median): n/a"),
        }
        if let Some(b) = self.bounds() {
            summary.push_str(&format!(
                "\nBounds: lat [{:.6}, {:.6}], lon [{:.6}, {:.6}]",
                b.min_lat, b.max_lat, b.min_lon, b.max_lon
            ));
        }
        summary
    }
}
