// Fixed rule tables and empirically derived constants for the VADER heuristics.
// These never change at runtime, so they live in lazily built read-only statics.
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Increment applied by an intensifier ("very", "extremely").
pub const B_INCR: f64 = 0.293;
/// Increment applied by a dampener ("kind of", "barely").
pub const B_DECR: f64 = -0.293;
/// Emphasis added to an ALL-CAPS sentiment word in mixed-case text.
pub const C_INCR: f64 = 0.733;
/// Negation dampens and inverts rather than mirroring.
pub const N_SCALAR: f64 = -0.74;

/// Per-mark amplifier for "!".
pub const EXCLAMATION_INCR: f64 = 0.292;
pub const EXCLAMATION_CAP: usize = 4;
/// Per-mark amplifier for "?" when two or three are present.
pub const QUESTION_INCR: f64 = 0.18;
pub const QUESTION_CAP_AMPLIFIER: f64 = 0.96;

/// Approximate maximum expected value of the summed valences.
pub const NORMALIZE_ALPHA: f64 = 15.0;

pub const BUT_BEFORE_SCALAR: f64 = 0.5;
pub const BUT_AFTER_SCALAR: f64 = 1.5;

// Look-back decay for boosters two and three tokens away.
pub const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

pub const NEVER_SO_SCALAR: f64 = 1.25;

// Negation words
pub static NEGATE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt",
        "ain't", "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't",
        "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither",
        "don't", "hadn't", "hasn't", "haven't", "isn't", "mightn't", "mustn't",
        "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing", "nowhere",
        "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
        "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't",
        "without", "wont", "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
    ]
    .iter()
    .copied()
    .collect()
});

// Intensifiers and dampeners, including the multi-word ones matched as n-grams
pub static BOOSTER_DICT: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let incr = [
        "absolutely", "amazingly", "awfully", "completely", "considerable", "considerably",
        "decidedly", "deeply", "effing", "enormous", "enormously", "entirely", "especially",
        "exceptional", "exceptionally", "extreme", "extremely", "fabulously", "flipping",
        "flippin", "frackin", "fracking", "fricking", "frickin", "frigging", "friggin",
        "fully", "fuckin", "fucking", "fuggin", "fugging", "greatly", "hella", "highly",
        "hugely", "incredible", "incredibly", "intensely", "major", "majorly", "more", "most",
        "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
        "thoroughly", "total", "totally", "tremendous", "tremendously", "uber",
        "unbelievably", "unusually", "utter", "utterly", "very",
    ];
    let decr = [
        "almost", "barely", "hardly", "just enough", "kind of", "kinda", "kindof", "kind-of",
        "less", "little", "marginal", "marginally", "occasional", "occasionally", "partly",
        "scarce", "scarcely", "slight", "slightly", "somewhat", "sort of", "sorta", "sortof",
        "sort-of",
    ];
    incr.iter()
        .map(|w| (*w, B_INCR))
        .chain(decr.iter().map(|w| (*w, B_DECR)))
        .collect()
});

// Phrases whose sentiment overrides that of their constituent words
pub static SPECIAL_CASES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("the shit", 3.0),
        ("the bomb", 3.0),
        ("bad ass", 1.5),
        ("badass", 1.5),
        ("bus stop", 0.0),
        ("yeah right", -2.0),
        ("kiss of death", -1.5),
        ("to die for", 3.0),
        ("beating heart", 3.1),
        ("broken heart", -2.9),
    ]
    .iter()
    .copied()
    .collect()
});

/// True when the word is a negator, including any "n't" contraction.
pub fn is_negated(word_lower: &str) -> bool {
    NEGATE.contains(word_lower) || word_lower.contains("n't")
}
