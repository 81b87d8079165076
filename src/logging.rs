use std::fs::{self, File, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Hands every event the same append-mode file handle
struct FileMakeWriter(File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = &'a File;

    fn make_writer(&'a self) -> Self::Writer {
        &self.0
    }
}

/// Plain-text layer appending to `path`, creating parent directories.
pub fn file_layer<S>(path: &Path) -> Result<impl Layer<S>>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Ok(fmt::layer()
        .with_writer(FileMakeWriter(file))
        .with_ansi(false))
}

/// Install the global subscriber: stdout always, plus `log_file` when set.
///
/// `RUST_LOG` selects the filter; the default is `info`.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_sink = log_file.map(|path| file_layer(path)).transpose()?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(file_sink)
        .init();

    if let Some(path) = log_file {
        tracing::info!("Logging to file {}", path.display());
    }
    Ok(())
}
