//! Where directory resources live.

use std::path::PathBuf;

use crate::error::LoaderError;

/// Base that resource paths resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRoot {
    /// `http://` or `https://` base URL, without a trailing slash.
    Http(String),
    /// Local directory holding the JSON files.
    Dir(PathBuf),
}

impl DataRoot {
    /// Interpret a configured root. URLs need a host; anything without a
    /// scheme is a directory path.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidRoot`] for an empty root, a URL with no
    /// host, or a non-HTTP scheme.
    pub fn parse(root: &str) -> Result<Self, LoaderError> {
        let trimmed = root.trim();
        if trimmed.is_empty() {
            return Err(LoaderError::InvalidRoot {
                root: root.to_string(),
                reason: "data root must be non-empty".to_string(),
            });
        }

        if let Some((scheme, rest)) = trimmed.split_once("://") {
            if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
                return Err(LoaderError::InvalidRoot {
                    root: root.to_string(),
                    reason: format!("unsupported scheme '{scheme}'"),
                });
            }
            let host = rest.split('/').next().unwrap_or_default();
            if host.is_empty() {
                return Err(LoaderError::InvalidRoot {
                    root: root.to_string(),
                    reason: "URL has no host".to_string(),
                });
            }
            return Ok(DataRoot::Http(trimmed.trim_end_matches('/').to_string()));
        }

        Ok(DataRoot::Dir(PathBuf::from(trimmed)))
    }

    /// Human-readable location of `resource`, used for requests and logs.
    ///
    /// Absolute `http(s)` resource URLs are used as-is regardless of root.
    #[must_use]
    pub fn locate(&self, resource: &str) -> String {
        if is_absolute_url(resource) {
            return resource.to_string();
        }
        let relative = resource.trim_start_matches('/');
        match self {
            DataRoot::Http(base) => format!("{base}/{relative}"),
            DataRoot::Dir(dir) => dir.join(relative).display().to_string(),
        }
    }
}

pub(crate) fn is_absolute_url(resource: &str) -> bool {
    let lower = resource.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
