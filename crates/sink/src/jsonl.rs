//! JSON-lines file sink.
//!
//! Writes one JSON object per accepted trigger to an append-only log file.
//! Appends are serialized through an async mutex so concurrent requests
//! never interleave lines.

use std::path::PathBuf;

use async_trait::async_trait;
use telemetry::health;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use trigger_core::{Error, Result, TriggerLogEntry};

use crate::config::SinkConfig;
use crate::TriggerSink;

/// File-backed trigger log.
pub struct JsonlSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlSink {
    /// Open (or create) the log file in append mode.
    ///
    /// Failure here is a startup error; the service does not run without a
    /// writable log.
    pub async fn open(config: SinkConfig) -> Result<Self> {
        let path = PathBuf::from(&config.log_file);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        health().sink.set_healthy();
        debug!(path = %path.display(), "Opened trigger log");

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl TriggerSink for JsonlSink {
    async fn append(&self, entry: &TriggerLogEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = self.file.lock().await;
        let written = async {
            file.write_all(line.as_bytes()).await?;
            file.flush().await
        }
        .await;

        match written {
            Ok(()) => {
                health().sink.set_healthy();
                Ok(())
            }
            Err(e) => {
                health().sink.set_unhealthy(e.to_string());
                Err(Error::sink(format!(
                    "failed to append to {}: {}",
                    self.path.display(),
                    e
                )))
            }
        }
    }

    fn is_healthy(&self) -> bool {
        health().sink.is_healthy()
    }
}
