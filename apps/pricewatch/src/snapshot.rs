use pricewatch_chart::ChartError;
use pricewatch_shared_models::SampleSeries;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl PersistenceError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Writes every sample of the run as a JSON array, creating parent
/// directories as needed.
pub fn save_snapshot(path: &Path, series: &SampleSeries) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(PersistenceError::io(parent))?;
    }

    let file = File::create(path).map_err(PersistenceError::io(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, series.samples())?;
    writer.flush().map_err(PersistenceError::io(path))?;

    info!(path = %path.display(), samples = series.len(), "snapshot saved");
    Ok(())
}
