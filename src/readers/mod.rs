pub mod csv_reader;
pub mod fetcher;
pub mod source;

pub use csv_reader::CsvTableReader;
pub use fetcher::UrlFetcher;
pub use source::DataSource;
