// Sentiment intensity analysis using the VADER lexicon and rule set.
// The analyzer owns its lexicon and emoji tables; scoring never mutates them,
// so one instance can be shared across threads.
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::nlp::lexicon::{EmojiMap, Lexicon, LoadMode};
use crate::nlp::scoring::{but_check, score_valence};
use crate::nlp::sentitext::SentiText;
use crate::nlp::valence::sentiment_valences;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

/// Compound scores at or beyond this magnitude count as polar.
pub const COMPOUND_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    #[serde(rename = "neg")]
    pub negative: f64,
    #[serde(rename = "neu")]
    pub neutral: f64,
    #[serde(rename = "pos")]
    pub positive: f64,
    pub compound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Label::Positive => "Positive",
            Label::Negative => "Negative",
            Label::Neutral => "Neutral",
        };
        f.pad(s)
    }
}

impl Sentiment {
    pub fn label(&self) -> Label {
        if self.compound >= COMPOUND_THRESHOLD {
            Label::Positive
        } else if self.compound <= -COMPOUND_THRESHOLD {
            Label::Negative
        } else {
            Label::Neutral
        }
    }

    /// Proportions to 3 decimals and compound to 4, the customary display precision.
    pub fn rounded(&self) -> Self {
        fn round_to(v: f64, places: i32) -> f64 {
            let p = 10f64.powi(places);
            (v * p).round() / p
        }
        Self {
            negative: round_to(self.negative, 3),
            neutral: round_to(self.neutral, 3),
            positive: round_to(self.positive, 3),
            compound: round_to(self.compound, 4),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentimentIntensityAnalyzer {
    lexicon: Lexicon,
    emojis: EmojiMap,
}

impl SentimentIntensityAnalyzer {
    /// Builds an analyzer from a lexicon source and an emoji source, rejecting
    /// any malformed line.
    pub fn new<L: BufRead, E: BufRead>(lexicon_source: L, emoji_source: E) -> Result<Self> {
        Self::with_mode(lexicon_source, emoji_source, LoadMode::Strict)
    }

    pub fn with_mode<L: BufRead, E: BufRead>(lexicon_source: L, emoji_source: E, mode: LoadMode) -> Result<Self> {
        let lexicon = Lexicon::from_reader(lexicon_source, "lexicon", mode)?;
        let emojis = EmojiMap::from_reader(emoji_source, "emoji", mode)?;
        Ok(Self::from_parts(lexicon, emojis))
    }

    pub fn from_paths(lexicon: &Path, emoji: &Path, mode: LoadMode) -> Result<Self> {
        let lexicon = Lexicon::from_path(lexicon, mode)?;
        let emojis = EmojiMap::from_path(emoji, mode)?;
        Ok(Self::from_parts(lexicon, emojis))
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        Self::from_paths(&config.lexicon, &config.emoji, config.mode)
    }

    pub fn from_parts(lexicon: Lexicon, emojis: EmojiMap) -> Self {
        info!(
            lexicon_entries = lexicon.len(),
            emoji_entries = emojis.len(),
            "sentiment analyzer ready"
        );
        Self { lexicon, emojis }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn emojis(&self) -> &EmojiMap {
        &self.emojis
    }

    /// Scores one text. Pure: the same text always yields the same result.
    pub fn polarity_scores(&self, text: &str) -> Sentiment {
        let sentitext = SentiText::prepare(text, &self.emojis);
        let mut sentiments = sentiment_valences(&self.lexicon, &sentitext);
        but_check(&sentitext.words_and_emoticons_lower, &mut sentiments);
        let sentiment = score_valence(&sentiments, &sentitext.text);
        debug!(tokens = sentitext.len(), compound = sentiment.compound, "scored text");
        sentiment
    }

    /// Scores many texts in parallel, preserving input order.
    pub fn polarity_scores_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Sentiment> {
        texts
            .par_iter()
            .map(|t| self.polarity_scores(t.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEXICON: &str = "good\t1.9\t0.9434\t[2, 1, 1, 3, 2, 4, 2, 2, 1, 2]\n\
                           bad\t-2.5\t0.67082\t[-3, -3, -2, -2, -3, -2, -3, -2, -3, -2]\n\
                           kiss\t1.8\t0.6\t[2, 2, 1, 2, 3, 2, 1, 2, 1, 2]\n";
    const EMOJI: &str = "💋\tkiss mark\n";

    fn analyzer() -> SentimentIntensityAnalyzer {
        SentimentIntensityAnalyzer::new(LEXICON.as_bytes(), EMOJI.as_bytes()).unwrap()
    }

    #[test]
    fn test_analyze_positive() {
        let s = analyzer().polarity_scores("The book was good.");
        assert!((s.compound - 0.4404).abs() < 5e-4);
        assert_eq!(s.label(), Label::Positive);
    }

    #[test]
    fn test_analyze_negative() {
        let s = analyzer().polarity_scores("That was bad");
        assert!(s.compound < 0.0);
        assert_eq!(s.label(), Label::Negative);
    }

    #[test]
    fn test_analyze_neutral() {
        let s = analyzer().polarity_scores("The sky is blue. The grass is green.");
        assert_eq!(s.compound, 0.0);
        assert_eq!(s.neutral, 1.0);
        assert_eq!(s.label(), Label::Neutral);
    }

    #[test]
    fn test_empty_text_is_all_zero() {
        assert_eq!(analyzer().polarity_scores(""), Sentiment::default());
        assert_eq!(analyzer().polarity_scores("   "), Sentiment::default());
    }

    #[test]
    fn test_emoji_is_scored_through_description() {
        let s = analyzer().polarity_scores("💋");
        assert!(s.compound > 0.0);
    }

    #[test]
    fn test_batch_preserves_order() {
        let a = analyzer();
        let texts = ["good", "bad", "blue"];
        let batch = a.polarity_scores_batch(&texts);
        let single: Vec<Sentiment> = texts.iter().map(|t| a.polarity_scores(t)).collect();
        assert_eq!(batch, single);
    }

    #[test]
    fn test_upper_case_only_entry_is_not_scored() {
        let a = SentimentIntensityAnalyzer::new("D:\t-2.9\n".as_bytes(), EMOJI.as_bytes()).unwrap();
        assert_eq!(a.polarity_scores("today D:"), Sentiment { neutral: 1.0, ..Sentiment::default() });
    }

    #[test]
    fn test_non_finite_valence_is_rejected() {
        assert!(SentimentIntensityAnalyzer::new("good\tNaN\n".as_bytes(), EMOJI.as_bytes()).is_err());
        assert!(SentimentIntensityAnalyzer::new("bad\tinf\n".as_bytes(), EMOJI.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_malformed_lexicon() {
        let err = SentimentIntensityAnalyzer::new("good 1.9\n".as_bytes(), EMOJI.as_bytes());
        assert!(err.is_err());
    }

    #[test]
    fn test_lenient_mode_skips_malformed() {
        let a = SentimentIntensityAnalyzer::with_mode(
            "good 1.9\nbad\t-2.5\n".as_bytes(),
            EMOJI.as_bytes(),
            LoadMode::Lenient,
        )
        .unwrap();
        assert_eq!(a.lexicon().len(), 1);
        assert_eq!(a.lexicon().report().skipped, 1);
    }

    #[test]
    fn test_rounded() {
        let s = Sentiment {
            negative: 0.0,
            neutral: 0.25423,
            positive: 0.74577,
            compound: 0.831_58,
        };
        let r = s.rounded();
        assert_eq!(r.neutral, 0.254);
        assert_eq!(r.positive, 0.746);
        assert_eq!(r.compound, 0.8316);
    }

    #[test]
    fn test_serialization_field_names() {
        let json = serde_json::to_value(Sentiment {
            negative: 0.1,
            neutral: 0.2,
            positive: 0.7,
            compound: 0.5,
        })
        .unwrap();
        assert_eq!(json["neg"], 0.1);
        assert_eq!(json["neu"], 0.2);
        assert_eq!(json["pos"], 0.7);
        assert_eq!(json["compound"], 0.5);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Positive.to_string(), "Positive");
        assert_eq!(Label::Neutral.to_string(), "Neutral");
    }
}
