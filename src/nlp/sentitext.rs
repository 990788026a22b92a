// Text preparation: emoji expansion, tokenization and the whole-text
// capitalization signal consumed by the valence scorer.
use crate::nlp::lexicon::EmojiMap;
use once_cell::sync::Lazy;
use regex::Regex;

// Leading or trailing ASCII punctuation
static PUNCT_EDGES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[[:punct:]]+|[[:punct:]]+$").unwrap());

// At least one upper-case letter and no lower-case letter anywhere
static ALL_CAPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\p{Ll}]*\p{Lu}[^\p{Ll}]*$").unwrap());

/// True for "GOOD", "SUX", ":D"; false for "Good", ":)" and "123".
pub fn is_all_caps(token: &str) -> bool {
    ALL_CAPS.is_match(token)
}

/// Mixed-case signal: some multi-character token is all-caps while another is not.
pub fn allcap_differential<S: AsRef<str>>(tokens: &[S]) -> bool {
    let allcaps = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| t.chars().count() > 1 && is_all_caps(t))
        .count();
    allcaps > 0 && allcaps < tokens.len()
}

/// Replaces every emoji with its description, longest key first so that
/// skin-tone and flag sequences resolve as a unit.
pub fn replace_emojis(text: &str, emojis: &EmojiMap) -> String {
    if emojis.is_empty() {
        return text.trim().to_string();
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let longest = emojis.longest_key().max(1);
    let mut out = String::with_capacity(text.len());
    let mut prev_space = true;
    let mut i = 0;

    while i < chars.len() {
        let start = chars[i].0;
        let matched = (1..=longest.min(chars.len() - i)).rev().find_map(|n| {
            let end = chars.get(i + n).map_or(text.len(), |(b, _)| *b);
            emojis.get(&text[start..end]).map(|d| (n, d))
        });

        match matched {
            Some((n, description)) => {
                if !prev_space {
                    out.push(' ');
                }
                out.push_str(description);
                prev_space = false;
                i += n;
            }
            None => {
                let c = chars[i].1;
                out.push(c);
                prev_space = c == ' ';
                i += 1;
            }
        }
    }

    out.trim().to_string()
}

/// Splits on whitespace and strips edge punctuation from words. Pieces that
/// would shrink to two characters or fewer are kept whole, which preserves
/// emoticons such as ":)" and "<3".
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|piece| {
            let stripped = PUNCT_EDGES.replace_all(piece, "");
            if stripped.chars().count() <= 2 {
                piece.to_string()
            } else {
                stripped.into_owned()
            }
        })
        .collect()
}

/// Tokens of one input text, with their lower-case view and the mixed-case flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentiText {
    /// Emoji-expanded, trimmed text; the source of punctuation counts.
    pub text: String,
    pub words_and_emoticons: Vec<String>,
    pub words_and_emoticons_lower: Vec<String>,
    pub is_cap_diff: bool,
}

impl SentiText {
    pub fn prepare(raw: &str, emojis: &EmojiMap) -> Self {
        let text = replace_emojis(raw, emojis);
        let words_and_emoticons = tokenize(&text);
        let words_and_emoticons_lower = words_and_emoticons.iter().map(|w| w.to_lowercase()).collect();
        // the capitalization signal is taken from the text as written, before
        // emoji descriptions are spliced in
        let is_cap_diff = allcap_differential(&tokenize(raw));
        Self {
            text,
            words_and_emoticons,
            words_and_emoticons_lower,
            is_cap_diff,
        }
    }

    pub fn len(&self) -> usize {
        self.words_and_emoticons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words_and_emoticons.is_empty()
    }
}
