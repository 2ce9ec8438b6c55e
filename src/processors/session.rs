use crate::config::Settings;
use crate::error::Result;
use crate::models::{CanonicalTable, PointGeometry};
use crate::processors::cache::{content_digest, MemoCache};
use crate::processors::geometry::GeometryDeriver;
use crate::processors::normalizer::Normalizer;
use crate::readers::{CsvTableReader, DataSource, UrlFetcher};
use crate::utils::constants::GEOMETRY_CACHE_CAPACITY;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// A normalized input and its row counts
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub table: CanonicalTable,
    pub original_row_count: usize,
    /// SHA-256 of the raw input
    pub digest: String,
}

impl LoadedDataset {
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn dropped_row_count(&self) -> usize {
        self.original_row_count - self.table.row_count()
    }

    /// User-facing note about removed rows, `None` when nothing was removed
    pub fn dropped_rows_message(&self) -> Option<String> {
        match self.dropped_row_count() {
            0 => None,
            n => Some(format!(
                "{} rows with NA values in the Latitude/Longitude column were removed.",
                n
            )),
        }
    }
}

/// Runs the load → normalize → derive pipeline for one user session and
/// memoizes both steps by content identity.
pub struct Session {
    settings: Settings,
    fetcher: UrlFetcher,
    normalizer: Normalizer,
    deriver: GeometryDeriver,
    datasets: MemoCache<String, LoadedDataset>,
    geometries: MemoCache<(String, usize), PointGeometry>,
}

impl Session {
    pub fn new(settings: Settings) -> Result<Self> {
        let fetcher = UrlFetcher::with_options(
            Duration::from_secs(settings.fetch_timeout_secs),
            &settings.user_agent,
        )?;
        let normalizer = Normalizer::with_reader(CsvTableReader::with_delimiter(settings.delimiter)?);

        Ok(Self {
            settings,
            fetcher,
            normalizer,
            deriver: GeometryDeriver::new(),
            datasets: MemoCache::new(),
            geometries: MemoCache::bounded(GEOMETRY_CACHE_CAPACITY),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read and normalize a source. Identical bytes are parsed only once.
    pub fn load(&mut self, source: &DataSource) -> Result<Arc<LoadedDataset>> {
        info!("loading {}", source.describe());
        let Self {
            settings,
            fetcher,
            normalizer,
            datasets,
            ..
        } = self;
        source.with_bytes(fetcher, settings.use_mmap, |bytes| {
            load_cached(datasets, normalizer, bytes)
        })
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Arc<LoadedDataset>> {
        load_cached(&mut self.datasets, &self.normalizer, bytes)
    }

    /// Leading-row count shown when the user has not picked one
    pub fn default_subset_size(&self, dataset: &LoadedDataset) -> usize {
        dataset.row_count().min(self.settings.default_subset_size)
    }

    /// Points for the first `subset_size` rows of the dataset
    pub fn geometry(
        &mut self,
        dataset: &LoadedDataset,
        subset_size: usize,
    ) -> Result<Arc<PointGeometry>> {
        let slice = dataset.table.head(subset_size);
        let key = (dataset.digest.clone(), slice.len());
        let deriver = &self.deriver;
        self.geometries
            .get_or_try_insert_with(&key, || deriver.derive(slice))
    }

    pub fn cached_datasets(&self) -> usize {
        self.datasets.len()
    }

    pub fn cached_geometries(&self) -> usize {
        self.geometries.len()
    }
}

fn load_cached(
    datasets: &mut MemoCache<String, LoadedDataset>,
    normalizer: &Normalizer,
    bytes: &[u8],
) -> Result<Arc<LoadedDataset>> {
    let digest = content_digest(bytes);
    datasets.get_or_try_insert_with(&digest, || {
        let normalized = normalizer.normalize(bytes)?;
        Ok(LoadedDataset {
            table: normalized.table,
            original_row_count: normalized.original_row_count,
            digest: digest.clone(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::models::Point;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session::new(Settings::default()).unwrap()
    }

    #[test]
    fn test_load_reports_dropped_rows() -> Result<()> {
        let mut session = session();
        let dataset = session.load(&DataSource::Bytes(b"lat,lon\n1.0,\n2.0,3.0".to_vec()))?;

        assert_eq!(dataset.original_row_count, 2);
        assert_eq!(dataset.row_count(), 1);
        assert_eq!(dataset.dropped_row_count(), 1);
        assert_eq!(
            dataset.dropped_rows_message().as_deref(),
            Some("1 rows with NA values in the Latitude/Longitude column were removed.")
        );
        Ok(())
    }

    #[test]
    fn test_no_message_when_nothing_dropped() -> Result<()> {
        let mut session = session();
        let dataset = session.load_bytes(b"lat,lon\n1,2\n")?;
        assert_eq!(dataset.dropped_rows_message(), None);
        Ok(())
    }

    #[test]
    fn test_identical_content_is_loaded_once() -> Result<()> {
        let mut session = session();
        let first = session.load_bytes(b"lat,lon\n1,2\n")?;
        let second = session.load(&DataSource::Bytes(b"lat,lon\n1,2\n".to_vec()))?;
        let third = session.load_bytes(b"lat,lon\n3,4\n")?;

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(session.cached_datasets(), 2);
        Ok(())
    }

    #[test]
    fn test_geometry_follows_subset_size() -> Result<()> {
        let mut session = session();
        let dataset = session.load_bytes(b"lat,lon\n1,10\n2,20\n3,30\n")?;

        let head = session.geometry(&dataset, 2)?;
        assert_eq!(head.points, vec![Point::new(1.0, 10.0), Point::new(2.0, 20.0)]);

        let all = session.geometry(&dataset, 3)?;
        assert_eq!(all.centroid, Some(Point::new(2.0, 20.0)));

        // Oversized subsets clamp to the row count and share the cache entry
        let clamped = session.geometry(&dataset, 500)?;
        assert!(Arc::ptr_eq(&all, &clamped));
        assert_eq!(session.cached_geometries(), 2);
        Ok(())
    }

    #[test]
    fn test_geometry_cache_is_bounded() -> Result<()> {
        let mut session = session();
        let mut csv = String::from("lat,lon\n");
        for i in 0..50 {
            csv.push_str(&format!("{},{}\n", i, i * 2));
        }
        let dataset = session.load_bytes(csv.as_bytes())?;

        // Sweeping the subset size like a slider
        for size in 1..=50 {
            let geometry = session.geometry(&dataset, size)?;
            assert_eq!(geometry.len(), size);
        }
        assert_eq!(session.cached_geometries(), GEOMETRY_CACHE_CAPACITY);

        // Evicted sizes are derived again with the same result
        let again = session.geometry(&dataset, 1)?;
        assert_eq!(again.points, vec![Point::new(0.0, 0.0)]);
        Ok(())
    }

    #[test]
    fn test_mmap_load_matches_buffered_load() -> Result<()> {
        use std::io::Write;

        let mut temp_file = tempfile::NamedTempFile::new()?;
        write!(temp_file, "Lat,Lon\n1,2\n,3\n4,5\n")?;
        let source = DataSource::File(temp_file.path().to_path_buf());

        let mut mapped = Session::new(Settings {
            use_mmap: true,
            ..Settings::default()
        })?;
        let dataset = mapped.load(&source)?;
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.digest, content_digest(b"Lat,Lon\n1,2\n,3\n4,5\n"));

        // Same bytes through the in-memory path hit the cache
        let cached = mapped.load_bytes(b"Lat,Lon\n1,2\n,3\n4,5\n")?;
        assert!(Arc::ptr_eq(&dataset, &cached));
        Ok(())
    }

    #[test]
    fn test_default_subset_size() -> Result<()> {
        let settings = Settings {
            default_subset_size: 2,
            ..Settings::default()
        };
        let mut session = Session::new(settings)?;
        let dataset = session.load_bytes(b"lat,lon\n1,1\n2,2\n3,3\n")?;
        assert_eq!(session.default_subset_size(&dataset), 2);

        let small = session.load_bytes(b"lat,lon\n1,1\n")?;
        assert_eq!(session.default_subset_size(&small), 1);
        Ok(())
    }

    #[test]
    fn test_parse_failure_produces_nothing() {
        let mut session = session();
        let err = session.load_bytes(b"").unwrap_err();
        assert!(matches!(err, ProcessingError::Parse(_)));
        assert!(err.is_load_failure());
        assert_eq!(session.cached_datasets(), 0);
    }
}
