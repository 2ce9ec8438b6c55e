use crate::error::{ProcessingError, Result};
use crate::models::{Point, PointGeometry};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE, LATITUDE, LONGITUDE,
};
use arrow::array::{Array, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Writes derived points as a two-column (latitude, longitude) Parquet file
pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write the points of a geometry in their original order
    pub fn write_geometry(&self, geometry: &PointGeometry, path: &Path) -> Result<()> {
        self.write_points(&geometry.points, path)
    }

    pub fn write_points(&self, points: &[Point], path: &Path) -> Result<()> {
        let schema = Self::create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        // An empty point set still produces a valid file with the schema
        for chunk in points.chunks(self.row_group_size.max(1)) {
            let batch = Self::points_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        info!("wrote {} points to {}", points.len(), path.display());
        Ok(())
    }

    fn create_schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new(LATITUDE, DataType::Float64, false),
            Field::new(LONGITUDE, DataType::Float64, false),
        ]))
    }

    fn points_to_batch(points: &[Point], schema: Arc<Schema>) -> Result<RecordBatch> {
        let latitudes: Vec<f64> = points.iter().map(|p| p.latitude).collect();
        let longitudes: Vec<f64> = points.iter().map(|p| p.longitude).collect();

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(latitudes)),
                Arc::new(Float64Array::from(longitudes)),
            ],
        )?;

        Ok(batch)
    }

    /// Read up to `limit` points back from a file written by this writer
    pub fn read_points(&self, path: &Path, limit: usize) -> Result<Vec<Point>> {
        let file = File::open(path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(limit.clamp(1, 8192))
            .build()?;

        let mut points = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;
            let latitudes = float_column(&batch, 0, LATITUDE)?;
            let longitudes = float_column(&batch, 1, LONGITUDE)?;

            for i in 0..batch.num_rows() {
                if points.len() >= limit {
                    return Ok(points);
                }
                points.push(Point::new(latitudes.value(i), longitudes.value(i)));
            }
        }

        Ok(points)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let row_group_sizes = (0..row_groups)
            .map(|i| metadata.row_group(i).num_rows())
            .collect();

        // Compression as recorded in the file, not this writer's setting
        let compression = if row_groups > 0 && metadata.row_group(0).num_columns() > 0 {
            metadata.row_group(0).column(0).compression()
        } else {
            self.compression
        };

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn float_column<'a>(batch: &'a RecordBatch, idx: usize, name: &str) -> Result<&'a Float64Array> {
    if batch.num_columns() <= idx {
        return Err(ProcessingError::MissingColumn(name.to_string()));
    }
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<Float64Array>()
        .filter(|array| array.null_count() == 0)
        .ok_or_else(|| ProcessingError::Config(format!("Invalid {} column type", name)))
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        let avg_rows = if self.row_groups > 0 {
            self.total_rows as f64 / self.row_groups as f64
        } else {
            0.0
        };
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0, // Convert to MB
            self.compression,
            avg_rows
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn sample_geometry() -> PointGeometry {
        PointGeometry {
            points: vec![
                Point::new(51.5074, -0.1278),
                Point::new(55.9533, -3.1883),
                Point::new(48.8566, 2.3522),
            ],
            centroid: Some(Point::new(51.5074, -0.1278)),
        }
    }

    #[test]
    fn test_write_and_read_back() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;
        let geometry = sample_geometry();

        writer.write_geometry(&geometry, temp_file.path())?;
        let points = writer.read_points(temp_file.path(), 10)?;
        assert_eq!(points, geometry.points);

        let limited = writer.read_points(temp_file.path(), 2)?;
        assert_eq!(limited.len(), 2);
        Ok(())
    }

    #[test]
    fn test_write_empty_points() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;

        writer.write_points(&[], temp_file.path())?;
        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 0);
        Ok(())
    }

    #[test]
    fn test_row_groups() -> Result<()> {
        let writer = ParquetWriter::new().with_row_group_size(2);
        let temp_file = NamedTempFile::new()?;

        writer.write_geometry(&sample_geometry(), temp_file.path())?;
        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 3);
        assert_eq!(info.row_groups, 2);
        assert_eq!(info.row_group_sizes, vec![2, 1]);
        assert!(info.summary().contains("Total rows: 3"));
        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        let compressions = ["snappy", "gzip", "lz4", "zstd", "none"];

        for compression in &compressions {
            let writer = ParquetWriter::new().with_compression(compression)?;
            let temp_file = NamedTempFile::new()?;

            let result = writer.write_geometry(&sample_geometry(), temp_file.path());
            assert!(result.is_ok(), "Failed with compression: {}", compression);
        }

        assert!(ParquetWriter::new().with_compression("brotli-ish").is_err());
        Ok(())
    }
}
