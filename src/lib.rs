// Public library surface for the CLI and integration tests.
pub mod config;
pub mod error;
pub mod nlp;

pub use config::AnalyzerConfig;
pub use error::{LoadError, Result};
pub use nlp::{EmojiMap, Label, Lexicon, LoadMode, Sentiment, SentimentIntensityAnalyzer};
