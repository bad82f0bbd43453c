use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Could not open {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Could not parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_error(path: &Path) -> impl FnOnce(serde_json::Error) -> LoadError + '_ {
    move |source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension().map(|ext| ext == "gz").unwrap_or(false)
}

/// Open `path` for reading, decompressing transparently when it ends in `.gz`.
pub fn open_reader(path: &Path) -> Result<Box<dyn Read>, LoadError> {
    let file = File::open(path).map_err(io_error(path))?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn read_serialized<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let reader = open_reader(path)?;
    serde_json::from_reader(reader).map_err(json_error(path))
}

pub fn write_serialized<T: Serialize>(path: &Path, value: &T) -> Result<(), LoadError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_error(path))?;
        }
    }
    let file = File::create(path).map_err(io_error(path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(json_error(path))
}

/// Hex SHA-1 of the raw file bytes.
pub fn file_sha1(path: &Path) -> Result<String, LoadError> {
    let mut file = File::open(path).map_err(io_error(path))?;
    let mut hasher = Sha1::new();
    io::copy(&mut file, &mut hasher).map_err(io_error(path))?;
    Ok(format!("{:x}", hasher.finalize()))
}
