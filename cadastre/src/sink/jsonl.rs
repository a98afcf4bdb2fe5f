use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::{CadastreResult, ErrorKind};
use crate::sink::base::RecordSink;
use crate::types::EnrichedRecord;

/// [`RecordSink`] appending records to a JSONL file.
///
/// Each record is serialized as a single JSON object per line, so the log
/// stays independently parseable line by line. The file is opened in append
/// mode on every write, which keeps resumed runs appending after prior
/// output instead of truncating it.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Creates a sink appending to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the output log.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for JsonlSink {
    async fn write_records(&self, records: Vec<EnrichedRecord>) -> CadastreResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                crate::cadastre_error!(
                    ErrorKind::SinkIoError,
                    "Failed to create the output directory",
                    self.path.display(),
                    source: err
                )
            })?;
        }

        let mut buffer = String::new();
        for record in &records {
            let line = serde_json::to_string(record).map_err(|err| {
                crate::cadastre_error!(
                    ErrorKind::SerializationError,
                    "Failed to serialize an enriched record",
                    source: err
                )
            })?;
            buffer.push_str(&line);
            buffer.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|err| {
                crate::cadastre_error!(
                    ErrorKind::SinkIoError,
                    "Failed to open the output log",
                    self.path.display(),
                    source: err
                )
            })?;

        file.write_all(buffer.as_bytes()).await.map_err(|err| {
            crate::cadastre_error!(
                ErrorKind::SinkIoError,
                "Failed to append to the output log",
                self.path.display(),
                source: err
            )
        })?;

        info!(records = records.len(), path = %self.path.display(), "appended records");

        Ok(())
    }
}
