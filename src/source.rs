use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crate::error::{BoardError, Result};
use crate::models::Dataset;
use crate::normalizer::normalize_str;

/// Where the board data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Source::Url(trimmed.to_string())
        } else {
            Source::File(PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the raw response body. Non-2xx responses are errors.
pub fn fetch_body(source: &Source, timeout: Option<Duration>) -> Result<String> {
    match source {
        Source::Url(url) => {
            let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
            let response = client
                .get(url)
                .header("Accept", "application/json")
                .send()?;
            let status = response.status();
            tracing::debug!("GET {url} -> {status}");
            if !status.is_success() {
                return Err(BoardError::Status(status.as_u16()));
            }
            Ok(response.text()?)
        }
        Source::File(path) => Ok(std::fs::read_to_string(path)?),
    }
}

pub fn fetch_dataset(source: &Source, timeout: Option<Duration>) -> Result<Dataset> {
    normalize_str(&fetch_body(source, timeout)?)
}

/// One-shot load. Failures are logged and swallowed: the caller keeps
/// whatever state it already had.
pub fn load_dataset(source: &Source, timeout: Option<Duration>) -> Option<Dataset> {
    match fetch_dataset(source, timeout) {
        Ok(data) => {
            if data.is_empty() {
                tracing::warn!("payload from {source} has no table or total rows");
            }
            tracing::info!(
                managers = data.managers.len(),
                total = data.total.len(),
                "loaded board data from {source}"
            );
            Some(data)
        }
        Err(e) => {
            tracing::error!("Error fetching data from {source}: {e}");
            None
        }
    }
}

/// Run [`load_dataset`] on a helper thread. The receiver yields exactly one
/// message, or none if the request never returns.
pub fn spawn_load(source: Source, timeout: Option<Duration>) -> mpsc::Receiver<Option<Dataset>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        // Receiver may be gone if the user quit before the load finished.
        let _ = tx.send(load_dataset(&source, timeout));
    });
    rx
}
