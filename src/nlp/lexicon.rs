// Knowledge base tables: word -> valence lexicon and emoji -> description map.
// Both are tab-separated text, loaded once and read-only afterwards.
use crate::error::{LoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// How to treat a line that does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// First malformed line aborts the load.
    #[default]
    Strict,
    /// Malformed lines are skipped with a warning.
    Lenient,
}

/// Outcome of reading one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub source: String,
    pub entries: usize,
    pub skipped: usize,
}

/// Word -> base valence. Keys are kept as written; callers look up the
/// lower-cased token, so upper-case-only entries never match.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: HashMap<String, f64>,
    report: LoadReport,
}

impl Lexicon {
    /// Reads `word<TAB>valence<TAB>...` lines; columns after the valence are ignored.
    pub fn from_reader<R: BufRead>(reader: R, source_name: &str, mode: LoadMode) -> Result<Self> {
        let mut words: HashMap<String, f64> = HashMap::new();
        let report = read_table(reader, source_name, mode, |line| {
            let mut cols = line.split('\t');
            let word = cols.next().unwrap_or_default();
            if word.is_empty() {
                return Err("empty word".to_string());
            }
            let raw = cols
                .next()
                .ok_or_else(|| "missing valence field".to_string())?;
            let valence = parse_valence(raw)?;
            words.insert(word.to_string(), valence);
            Ok(())
        })?;
        Ok(Self { words, report })
    }

    pub fn from_path(path: &Path, mode: LoadMode) -> Result<Self> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| LoadError::io(&name, e))?;
        Self::from_reader(BufReader::new(file), &name, mode)
    }

    pub fn parse(text: &str, mode: LoadMode) -> Result<Self> {
        Self::from_reader(text.as_bytes(), "<memory>", mode)
    }

    #[inline]
    pub fn get(&self, word_lower: &str) -> Option<f64> {
        self.words.get(word_lower).copied()
    }

    #[inline]
    pub fn contains(&self, word_lower: &str) -> bool {
        self.words.contains_key(word_lower)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let words: HashMap<String, f64> = iter
            .into_iter()
            .map(|(word, valence)| (word.as_ref().to_string(), valence))
            .collect();
        let report = LoadReport {
            source: "<memory>".to_string(),
            entries: words.len(),
            skipped: 0,
        };
        Self { words, report }
    }
}

// f64's parser takes "NaN" and "inf"; neither is a valence.
fn parse_valence(raw: &str) -> std::result::Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid valence {:?}", raw))
}

/// Emoji (one or more code points) -> textual description.
#[derive(Debug, Clone, Default)]
pub struct EmojiMap {
    descriptions: HashMap<String, String>,
    longest_key: usize,
    report: LoadReport,
}

impl EmojiMap {
    /// Reads `emoji<TAB>description` lines.
    pub fn from_reader<R: BufRead>(reader: R, source_name: &str, mode: LoadMode) -> Result<Self> {
        let mut descriptions: HashMap<String, String> = HashMap::new();
        let report = read_table(reader, source_name, mode, |line| {
            let (emoji, rest) = line
                .split_once('\t')
                .ok_or_else(|| "missing description field".to_string())?;
            if emoji.is_empty() {
                return Err("empty emoji".to_string());
            }
            let description = rest.split('\t').next().unwrap_or_default().trim();
            if description.is_empty() {
                return Err("empty description".to_string());
            }
            descriptions.insert(emoji.to_string(), description.to_string());
            Ok(())
        })?;
        Ok(Self::with_report(descriptions, report))
    }

    pub fn from_path(path: &Path, mode: LoadMode) -> Result<Self> {
        let name = path.display().to_string();
        let file = File::open(path).map_err(|e| LoadError::io(&name, e))?;
        Self::from_reader(BufReader::new(file), &name, mode)
    }

    pub fn parse(text: &str, mode: LoadMode) -> Result<Self> {
        Self::from_reader(text.as_bytes(), "<memory>", mode)
    }

    fn with_report(descriptions: HashMap<String, String>, report: LoadReport) -> Self {
        let longest_key = descriptions
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        Self {
            descriptions,
            longest_key,
            report,
        }
    }

    #[inline]
    pub fn get(&self, emoji: &str) -> Option<&str> {
        self.descriptions.get(emoji).map(String::as_str)
    }

    /// Length in code points of the longest emoji key.
    pub fn longest_key(&self) -> usize {
        self.longest_key
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EmojiMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let descriptions: HashMap<String, String> =
            iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        let report = LoadReport {
            source: "<memory>".to_string(),
            entries: descriptions.len(),
            skipped: 0,
        };
        Self::with_report(descriptions, report)
    }
}

fn read_table<R, F>(reader: R, source_name: &str, mode: LoadMode, mut parse_line: F) -> Result<LoadReport>
where
    R: BufRead,
    F: FnMut(&str) -> std::result::Result<(), String>,
{
    let mut report = LoadReport {
        source: source_name.to_string(),
        ..LoadReport::default()
    };
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| LoadError::io(source_name, e))?;
        let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(()) => report.entries += 1,
            Err(reason) => match mode {
                LoadMode::Strict => return Err(LoadError::malformed(source_name, idx + 1, reason)),
                LoadMode::Lenient => {
                    warn!(source = source_name, line = idx + 1, %reason, "skipping malformed line");
                    report.skipped += 1;
                }
            },
        }
    }
    debug!(
        source = source_name,
        entries = report.entries,
        skipped = report.skipped,
        "loaded table"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_lexicon_ignores_trailing_columns() -> Result<()> {
        let lex = Lexicon::parse("good\t1.9\t0.9434\t[2, 1, 1, 3, 2, 4, 2, 2, 1, 2]\nbad\t-2.5\t0.67082\n", LoadMode::Strict)?;
        assert_eq!(lex.len(), 2);
        assert_eq!(lex.get("good"), Some(1.9));
        assert_eq!(lex.get("bad"), Some(-2.5));
        assert_eq!(lex.get("ugly"), None);
        Ok(())
    }

    #[test]
    fn test_lexicon_keys_are_kept_as_written() -> Result<()> {
        let lex = Lexicon::parse(":D\t2.3\n:d\t1.0\nD:\t-2.9\n", LoadMode::Strict)?;
        assert_eq!(lex.get(":d"), Some(1.0));
        assert_eq!(lex.get(":D"), Some(2.3));
        // upper-case-only entry is unreachable through a lower-cased token
        assert!(!lex.contains("d:"));
        Ok(())
    }

    #[test]
    fn test_lexicon_strict_rejects_missing_field() {
        let err = Lexicon::parse("good\t1.9\nbroken\n", LoadMode::Strict).unwrap_err();
        match err {
            LoadError::Malformed { line, reason, .. } => {
                assert_eq!(line, 2);
                assert_eq!(reason, "missing valence field");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lexicon_strict_rejects_non_numeric() {
        let err = Lexicon::parse("good\tvery\n", LoadMode::Strict).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_lexicon_strict_rejects_non_finite() {
        for text in ["good\tNaN\t0.1\n", "bad\tinf\n", "bad\t-infinity\n", "good\tnan\n"] {
            let err = Lexicon::parse(text, LoadMode::Strict).unwrap_err();
            assert!(matches!(err, LoadError::Malformed { line: 1, .. }), "{text:?} loaded");
        }
    }

    #[test]
    fn test_lexicon_lenient_skips_non_finite() -> Result<()> {
        let lex = Lexicon::parse("good\tNaN\t0.1\nbad\tinf\nsad\t-2.1\n", LoadMode::Lenient)?;
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.get("good"), None);
        assert_eq!(lex.report().skipped, 2);
        Ok(())
    }

    #[test]
    fn test_lexicon_lenient_skips_bad_lines() -> Result<()> {
        let lex = Lexicon::parse("good\t1.9\nbroken\nworse\tnan-ish\n\nbad\t-2.5\n", LoadMode::Lenient)?;
        assert_eq!(lex.len(), 2);
        assert_eq!(lex.report().entries, 2);
        assert_eq!(lex.report().skipped, 2);
        Ok(())
    }

    #[test]
    fn test_lexicon_handles_crlf() -> Result<()> {
        let lex = Lexicon::parse("good\t1.9\r\nbad\t-2.5\r\n", LoadMode::Strict)?;
        assert_eq!(lex.get("bad"), Some(-2.5));
        Ok(())
    }

    #[test]
    fn test_lexicon_from_missing_path() {
        let err = Lexicon::from_path(Path::new("/nonexistent/vader_lexicon.txt"), LoadMode::Lenient).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_lexicon_from_path() -> Result<()> {
        let mut file = NamedTempFile::new().map_err(|e| LoadError::io("tmp", e))?;
        writeln!(file, "love\t3.2\t0.4\t[3, 3, 4]").map_err(|e| LoadError::io("tmp", e))?;
        let lex = Lexicon::from_path(file.path(), LoadMode::Strict)?;
        assert_eq!(lex.get("love"), Some(3.2));
        Ok(())
    }

    #[test]
    fn test_lexicon_from_iter() {
        let lex: Lexicon = [("Good", 1.9), ("bad", -2.5)].into_iter().collect();
        assert_eq!(lex.get("Good"), Some(1.9));
        assert_eq!(lex.get("good"), None);
        assert_eq!(lex.report().entries, 2);
    }

    #[test]
    fn test_emoji_map_parse() -> Result<()> {
        let map = EmojiMap::parse("😁\tbeaming face with smiling eyes\n👍🏽\tthumbs up: medium skin tone\n", LoadMode::Strict)?;
        assert_eq!(map.get("😁"), Some("beaming face with smiling eyes"));
        assert_eq!(map.longest_key(), 2);
        Ok(())
    }

    #[test]
    fn test_emoji_map_strict_rejects_missing_description() {
        let err = EmojiMap::parse("😁\n", LoadMode::Strict).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_emoji_map_lenient() -> Result<()> {
        let map = EmojiMap::parse("😁\n💋\tkiss mark\n", LoadMode::Lenient)?;
        assert_eq!(map.len(), 1);
        assert_eq!(map.report().skipped, 1);
        Ok(())
    }
}
