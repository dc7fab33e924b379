use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::WHISPER_MODEL_BASE_URL;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("download failed for {url}: server answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("download of {url} was interrupted: {source}")]
    Interrupted {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// File name whisper.cpp uses for a model, e.g. `medium.en` -> `ggml-medium.en.bin`.
pub fn whisper_model_filename(model: &str) -> String {
    format!("ggml-{model}.bin")
}

pub fn whisper_model_url(model: &str) -> String {
    format!("{WHISPER_MODEL_BASE_URL}/{}", whisper_model_filename(model))
}

/// Resolve a whisper.cpp model by its short name (`tiny.en`, `medium.en`, ...).
pub fn resolve_whisper_model(
    model: &str,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    resolve(
        &whisper_model_filename(model),
        &whisper_model_url(model),
        progress,
    )
}

/// Resolve a model file by name from the user cache, downloading it there
/// when it is missing.
pub fn resolve(
    name: &str,
    url: &str,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cache_dir = model_cache_dir()?;
    if let Some(found) = find_existing(name, &cache_dir) {
        return Ok(found);
    }

    fs::create_dir_all(&cache_dir).map_err(ModelResolveError::CacheDir)?;
    let cached_path = cache_dir.join(name);
    log::info!("Downloading {name} from {url}");
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

fn find_existing(name: &str, cache_dir: &Path) -> Option<PathBuf> {
    Some(cache_dir.join(name)).filter(|path| path.exists())
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/YouClipper/models/`
/// - Linux: `$XDG_CACHE_HOME/YouClipper/models/` or `~/.cache/YouClipper/models/`
/// - Windows: `%LOCALAPPDATA%/YouClipper/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("YouClipper").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("YouClipper").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url).map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;
    if !response.status().is_success() {
        return Err(ModelResolveError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    // Write to a temp file first, then rename for atomicity
    let temp_path = dest.with_extension("part");
    let mut file = fs::File::create(&temp_path).map_err(|e| ModelResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;

    // Whisper models run to gigabytes, so stream instead of buffering the body
    let mut response = response;
    let mut buf = vec![0u8; 1024 * 1024];
    loop {
        let n = response
            .read(&mut buf)
            .map_err(|e| ModelResolveError::Interrupted {
                url: url.to_string(),
                source: e,
            })?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])
            .map_err(|e| ModelResolveError::Write {
                path: temp_path.clone(),
                source: e,
            })?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(|e| ModelResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(|e| ModelResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_whisper_model_filename() {
        assert_eq!(whisper_model_filename("medium.en"), "ggml-medium.en.bin");
    }

    #[test]
    fn test_whisper_model_url_points_at_ggml_file() {
        let url = whisper_model_url("tiny.en");
        assert!(url.starts_with("https://"));
        assert!(url.ends_with("/ggml-tiny.en.bin"));
    }

    #[test]
    fn test_find_existing_in_cache() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("m.bin"), b"cached").unwrap();

        let found = find_existing("m.bin", tmp.path()).unwrap();
        assert_eq!(found, tmp.path().join("m.bin"));
    }

    #[test]
    fn test_find_existing_none_when_missing() {
        let tmp = TempDir::new().unwrap();
        assert!(find_existing("m.bin", tmp.path()).is_none());
    }

    #[test]
    fn test_model_cache_dir_returns_path() {
        let path = model_cache_dir().unwrap();
        assert!(path.to_string_lossy().contains("YouClipper"));
        assert!(path.to_string_lossy().contains("models"));
    }

    #[test]
    #[ignore] // Requires network access
    fn test_download_to_file() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("robots.txt");

        let progress_called = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = progress_called.clone();

        download(
            "https://www.google.com/robots.txt",
            &dest,
            Some(Box::new(move |_downloaded, _total| {
                flag.store(true, std::sync::atomic::Ordering::Relaxed);
            })),
        )
        .unwrap();

        assert!(dest.exists());
        assert!(!dest.with_extension("part").exists());
        assert!(progress_called.load(std::sync::atomic::Ordering::Relaxed));
    }
}
