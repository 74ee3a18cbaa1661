use std::path::PathBuf;

use crate::foundation::error::{RampError, RampResult};

/// Resolves a media locator into a readable local file.
pub trait MediaSource {
    /// Return the local path for `locator`, or a source error.
    fn resolve(&self, locator: &str) -> RampResult<PathBuf>;
}

/// Source for files already on the local filesystem.
///
/// Accepts plain paths and `file://` URIs. Locators relative to `root` are joined onto it.
#[derive(Clone, Debug, Default)]
pub struct LocalFileSource {
    root: Option<PathBuf>,
}

impl LocalFileSource {
    /// Source resolving relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source resolving relative paths against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl MediaSource for LocalFileSource {
    fn resolve(&self, locator: &str) -> RampResult<PathBuf> {
        let locator = locator.trim();
        if locator.is_empty() {
            return Err(RampError::source("empty media locator"));
        }

        let raw = match locator.split_once("://") {
            Some(("file", rest)) => rest,
            Some((scheme, _)) => {
                return Err(RampError::source(format!(
                    "unsupported locator scheme '{scheme}' (only local paths and file:// are handled)"
                )));
            }
            None => locator,
        };

        let mut path = PathBuf::from(raw);
        if path.is_relative()
            && let Some(root) = &self.root
        {
            path = root.join(path);
        }

        if !path.is_file() {
            return Err(RampError::source(format!(
                "input file not found: {}",
                path.display()
            )));
        }
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/source.rs"]
mod tests;
