use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeDirError {
    #[error("cannot determine the user's home directory")]
    NoHome,
    #[error("failed to create directory '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve the server home directory.
///
/// - `None` => `<platform home>/<default_subdir>`
/// - `~` or `~/...` => expanded against the platform home
/// - relative paths are made absolute against the current directory
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let resolved = match configured {
        None => platform_home()?.join(default_subdir),
        Some(raw) => expand(&raw)?,
    };

    let absolute = if resolved.is_absolute() {
        resolved
    } else {
        std::env::current_dir()
            .map_err(|source| HomeDirError::Create {
                path: resolved.clone(),
                source,
            })?
            .join(resolved)
    };

    if create {
        std::fs::create_dir_all(&absolute).map_err(|source| HomeDirError::Create {
            path: absolute.clone(),
            source,
        })?;
    }
    Ok(absolute)
}

fn expand(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return platform_home();
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        return Ok(platform_home()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

fn platform_home() -> Result<PathBuf, HomeDirError> {
    // HOME wins so tests and containers can redirect it.
    #[cfg(not(target_os = "windows"))]
    if let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    #[cfg(target_os = "windows")]
    if let Some(appdata) = std::env::var_os("APPDATA").filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(appdata));
    }
    dirs::home_dir().ok_or(HomeDirError::NoHome)
}
