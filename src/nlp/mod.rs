// NLP module for vaders: rule-based sentiment intensity scoring
pub mod constants;
pub mod lexicon;
pub mod scoring;
pub mod sentiment;
pub mod sentitext;
pub mod valence;

pub use lexicon::{EmojiMap, Lexicon, LoadMode, LoadReport};
pub use sentiment::{Label, Sentiment, SentimentIntensityAnalyzer};
pub use sentitext::SentiText;
