use crate::error::Result;
use crate::readers::fetcher::UrlFetcher;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Where one load reads its bytes from. File and URL input are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
    Bytes(Vec<u8>),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Url(url) => url.clone(),
            DataSource::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }

    /// Run `process` over the full content of the source. Memory-mapped files
    /// are handed over as the mapped slice without copying.
    pub fn with_bytes<T, F>(&self, fetcher: &UrlFetcher, use_mmap: bool, process: F) -> Result<T>
    where
        F: FnOnce(&[u8]) -> Result<T>,
    {
        match self {
            DataSource::File(path) if use_mmap => match map_file(path)? {
                Some(mmap) => process(&mmap[..]),
                None => process(&[]),
            },
            DataSource::File(path) => process(&std::fs::read(path)?),
            DataSource::Url(url) => process(&fetcher.fetch(url)?),
            DataSource::Bytes(bytes) => process(bytes),
        }
    }
}

/// `None` for an empty file
fn map_file(path: &Path) -> Result<Option<Mmap>> {
    let file = File::open(path)?;
    // Mapping a zero-length file fails on some platforms
    if file.metadata()?.len() == 0 {
        return Ok(None);
    }
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(Some(mmap))
}
