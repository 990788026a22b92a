// src/config.rs
use crate::error::{LoadError, Result};
use crate::nlp::lexicon::LoadMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_lexicon() -> PathBuf {
    PathBuf::from("vader_lexicon.txt")
}
fn default_emoji() -> PathBuf {
    PathBuf::from("emoji_utf8_lexicon.txt")
}

/// Where the knowledge base tables live and how strictly to read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_lexicon")]
    pub lexicon: PathBuf,
    #[serde(default = "default_emoji")]
    pub emoji: PathBuf,
    /// "strict" | "lenient"
    #[serde(default)]
    pub mode: LoadMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            lexicon: default_lexicon(),
            emoji: default_emoji(),
            mode: LoadMode::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Reads a JSON config. Relative table paths are taken relative to the
    /// directory holding the config file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| LoadError::io(path.display().to_string(), e))?;
        let mut cfg: AnalyzerConfig =
            serde_json::from_str(&data).map_err(|e| LoadError::config(path, e.to_string()))?;

        if let Some(base) = path.parent() {
            if cfg.lexicon.is_relative() {
                cfg.lexicon = base.join(&cfg.lexicon);
            }
            if cfg.emoji.is_relative() {
                cfg.emoji = base.join(&cfg.emoji);
            }
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_fill_missing_fields() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("vaders.json");
        fs::write(&path, r#"{ "mode": "lenient" }"#)?;

        let cfg = AnalyzerConfig::load_from_file(&path)?;
        assert_eq!(cfg.mode, LoadMode::Lenient);
        assert_eq!(cfg.lexicon, dir.path().join("vader_lexicon.txt"));
        assert_eq!(cfg.emoji, dir.path().join("emoji_utf8_lexicon.txt"));
        Ok(())
    }

    #[test]
    fn test_absolute_paths_are_kept() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("vaders.json");
        fs::write(&path, r#"{ "lexicon": "/opt/vader/lex.txt", "emoji": "emoji.txt" }"#)?;

        let cfg = AnalyzerConfig::load_from_file(&path)?;
        assert_eq!(cfg.lexicon, PathBuf::from("/opt/vader/lex.txt"));
        assert_eq!(cfg.emoji, dir.path().join("emoji.txt"));
        assert_eq!(cfg.mode, LoadMode::Strict);
        Ok(())
    }

    #[test]
    fn test_invalid_json_is_config_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("vaders.json");
        fs::write(&path, "{ not json")?;

        let err = AnalyzerConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Config { .. }));
        Ok(())
    }

    #[test]
    fn test_unknown_mode_is_rejected() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("vaders.json");
        fs::write(&path, r#"{ "mode": "sloppy" }"#)?;
        assert!(AnalyzerConfig::load_from_file(&path).is_err());
        Ok(())
    }
}
