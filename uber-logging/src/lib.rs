use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter, Layer, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

/// Logging settings, read from `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT` and
/// `LOG_FILE_PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub output: LogOutput,
    pub format: LogFormat,
    pub file_path: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            output: LogOutput::Console,
            format: LogFormat::Human,
            file_path: PathBuf::from("/tmp/uberstead.log"),
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let output = match lookup("LOG_OUTPUT").as_deref() {
            Some("file") => LogOutput::File,
            Some("both") => LogOutput::Both,
            Some("none") | Some("off") => LogOutput::Off,
            _ => LogOutput::Console,
        };
        let format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Human,
        };

        Self {
            level: lookup("LOG_LEVEL").unwrap_or(defaults.level),
            output,
            format,
            file_path: lookup("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
        }
    }

    /// Raise the level to `debug` (the `--debug` flag).
    pub fn with_debug(mut self, debug: bool) -> Self {
        if debug {
            self.level = "debug".to_string();
        }
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global tracing subscriber.
///
/// Console logs go to stderr. The returned guard flushes the file writer and
/// must live until the process exits.
pub fn init_subscriber(settings: &LogSettings) -> Option<WorkerGuard> {
    if settings.output == LogOutput::Off {
        return None;
    }

    let (layers, guard) = output_layers(settings);

    // `try_init` so a second call (tests, embedded use) is harmless.
    let _ = registry()
        .with(layers)
        .with(settings.env_filter())
        .try_init();

    guard
}

/// One formatting layer per configured output.
fn output_layers(settings: &LogSettings) -> (Vec<BoxedLayer>, Option<WorkerGuard>) {
    let is_json = settings.format == LogFormat::Json;
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    if matches!(settings.output, LogOutput::Console | LogOutput::Both) {
        let fmt_layer = fmt::layer().with_writer(std::io::stderr);
        if is_json {
            layers.push(fmt_layer.json().boxed());
        } else {
            layers.push(fmt_layer.compact().boxed());
        }
    }

    if matches!(settings.output, LogOutput::File | LogOutput::Both) {
        let log_dir = settings
            .file_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("/tmp"));
        let log_filename = settings
            .file_path
            .file_name()
            .unwrap_or_else(|| "uberstead.log".as_ref());
        let appender = tracing_appender::rolling::daily(log_dir, log_filename);
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        guard = Some(file_guard);

        let fmt_layer = fmt::layer().with_writer(writer).with_ansi(false);
        if is_json {
            layers.push(fmt_layer.json().boxed());
        } else {
            layers.push(fmt_layer.compact().boxed());
        }
    }

    (layers, guard)
}
