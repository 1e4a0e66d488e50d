use crate::config::{LoggingConfig, Section};
use std::{
    collections::HashMap,
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::{filter::Targets, fmt};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

// -------- level helpers --------
fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

fn level_filter(s: &str) -> LevelFilter {
    parse_tracing_level(s)
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::OFF)
}

/// Returns true if target == crate_name or target starts with "crate_name::"
fn matches_crate_prefix(target: &str, crate_name: &str) -> bool {
    target == crate_name
        || (target.starts_with(crate_name) && target[crate_name.len()..].starts_with("::"))
}

/// Build per-target filters: every named subsystem gets its own level,
/// everything else falls back to the "default" section.
fn build_targets(cfg: &LoggingConfig, pick: impl Fn(&Section) -> &str) -> Targets {
    let default = cfg
        .get("default")
        .map(|s| level_filter(pick(s)))
        .unwrap_or(LevelFilter::INFO);

    cfg.iter()
        .filter(|(name, _)| name.as_str() != "default")
        .fold(Targets::new().with_default(default), |targets, (name, section)| {
            targets.with_target(name.clone(), level_filter(pick(section)))
        })
}

// -------- rotating file writers --------
type SharedRotate = Arc<Mutex<FileRotate<AppendTimestamp>>>;

#[derive(Clone)]
struct RotWriterHandle(Option<SharedRotate>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &self.0 {
            Some(rot) => rot
                .lock()
                .map_err(|_| std::io::Error::other("log writer poisoned"))?
                .write(buf),
            // No file for this target: drop silently.
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &self.0 {
            Some(rot) => rot
                .lock()
                .map_err(|_| std::io::Error::other("log writer poisoned"))?
                .flush(),
            None => Ok(()),
        }
    }
}

/// Routes records to per-subsystem files by target prefix, falling back to the default file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<SharedRotate>,
    by_prefix: HashMap<String, SharedRotate>,
}

impl FileRouter {
    fn resolve_for(&self, target: &str) -> Option<SharedRotate> {
        self.by_prefix
            .iter()
            .find(|(name, _)| matches_crate_prefix(target, name))
            .map(|(_, w)| w.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = RotWriterHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        RotWriterHandle(self.resolve_for(meta.target()))
    }
}

/// Resolve a log file path against `base_dir` (home_dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn create_rotating_writer_at_path(
    log_path: &Path,
    max_bytes: usize,
    max_backups: usize,
) -> std::io::Result<SharedRotate> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_backups)),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    Ok(Arc::new(Mutex::new(rot)))
}

fn writer_for_section(name: &str, section: &Section, base_dir: &Path) -> Option<SharedRotate> {
    if section.file.trim().is_empty() {
        return None;
    }
    let max_bytes = section.max_size_mb.unwrap_or(100) * 1024 * 1024;
    let log_path = resolve_log_path(&section.file, base_dir);

    match create_rotating_writer_at_path(
        &log_path,
        max_bytes as usize,
        section.max_backups.unwrap_or(3),
    ) {
        Ok(w) => Some(w),
        Err(e) => {
            eprintln!(
                "Failed to init log file for subsystem '{}': {} ({})",
                name,
                log_path.display(),
                e
            );
            None
        }
    }
}

fn build_file_router(cfg: &LoggingConfig, base_dir: &Path) -> FileRouter {
    let mut router = FileRouter::default();
    for (name, section) in cfg {
        let Some(writer) = writer_for_section(name, section, base_dir) else {
            continue;
        };
        if name == "default" {
            router.default = Some(writer);
        } else {
            router.by_prefix.insert(name.clone(), writer);
        }
    }
    router
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: LoggingConfig containing the logging sections
/// - `base_dir`: base directory used to resolve relative log file paths (usually server.home_dir)
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, prelude::*, Registry};

    // Bridge `log` → `tracing` before installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        let _ = tracing_subscriber::fmt()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .try_init();
        return;
    }

    let console_layer = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(build_targets(cfg, |s| s.console_level.as_str()));

    let router = build_file_router(cfg, base_dir);
    if router.is_empty() {
        let _ = Registry::default().with(console_layer).try_init();
        return;
    }

    let file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(router)
        .with_filter(build_targets(cfg, |s| s.file_level.as_str()));

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

// =================== tests ===================
