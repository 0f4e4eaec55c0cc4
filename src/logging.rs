use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn filter(debug: bool) -> EnvFilter {
    // Without debug logging the level is pinned to `info`, so a stray
    // `RUST_LOG` in the user's environment cannot make the output verbose.
    if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    }
}

fn file_appender(path: &Path) -> Option<RollingFileAppender> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = path.file_name()?.to_string_lossy().into_owned();
    match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
    {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!("failed to open log file {}: {e}", path.display());
            None
        }
    }
}

/// Initialise logging. The default level is `info`; `debug` raises it and
/// lets `RUST_LOG` override the level. When `log_file` is given, output is
/// also appended to that file.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let file_layer = log_file
        .as_deref()
        .and_then(file_appender)
        .map(|appender| fmt::layer().with_writer(appender).with_ansi(false));

    let _ = tracing_subscriber::registry()
        .with(filter(debug))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
}
