// Error types for loading the knowledge base.

use std::path::PathBuf;

/// Result type alias using the crate's [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;

/// Failure to build an analyzer from its lexicon and emoji sources.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be read
    #[error("io error reading {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    /// A line does not follow the `key<TAB>value` layout
    #[error("{source_name}:{line}: {reason}")]
    Malformed {
        source_name: String,
        line: usize,
        reason: String,
    },

    /// The analyzer configuration file is unusable
    #[error("config error in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn io(source_name: impl Into<String>, error: std::io::Error) -> Self {
        Self::Io {
            source_name: source_name.into(),
            error,
        }
    }

    pub fn malformed(source_name: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            source_name: source_name.into(),
            line,
            reason: reason.into(),
        }
    }

    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = LoadError::malformed("vader_lexicon.txt", 12, "missing valence field");
        assert_eq!(err.to_string(), "vader_lexicon.txt:12: missing valence field");
    }

    #[test]
    fn test_io_keeps_source() {
        use std::error::Error as _;
        let err = LoadError::io("emoji.txt", std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.to_string().starts_with("io error reading emoji.txt"));
        assert!(err.source().is_some());
    }
}
