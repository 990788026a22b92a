// Per-token valence scoring.
//
// Every token gets one float. Modifiers (boosters, negators, "kind of") score
// zero themselves and act on the sentiment words after them through a
// three-token look-back window.
use crate::nlp::constants::{
    is_negated, BOOSTER_DECAY, BOOSTER_DICT, C_INCR, NEVER_SO_SCALAR, N_SCALAR, SPECIAL_CASES,
};
use crate::nlp::lexicon::Lexicon;
use crate::nlp::sentitext::{is_all_caps, SentiText};

/// One valence per token, index-aligned with `st.words_and_emoticons`.
pub fn sentiment_valences(lexicon: &Lexicon, st: &SentiText) -> Vec<f64> {
    let lower = &st.words_and_emoticons_lower;
    (0..st.len())
        .map(|i| {
            let item_lower = lower[i].as_str();
            if BOOSTER_DICT.contains_key(item_lower) {
                return 0.0;
            }
            if item_lower == "kind" && lower.get(i + 1).map(String::as_str) == Some("of") {
                return 0.0;
            }
            token_valence(lexicon, st, i)
        })
        .collect()
}

fn token_valence(lexicon: &Lexicon, st: &SentiText, i: usize) -> f64 {
    let words = &st.words_and_emoticons;
    let lower = &st.words_and_emoticons_lower;
    let item_lower = lower[i].as_str();

    let Some(base) = lexicon.get(item_lower) else {
        return 0.0;
    };
    let mut valence = base;

    let back = |n: usize| i.checked_sub(n).map(|j| lower[j].as_str());

    // "no" directly before another sentiment word neutralises itself
    if item_lower == "no" && lower.get(i + 1).is_some_and(|next| lexicon.contains(next)) {
        valence = 0.0;
    }
    if back(1) == Some("no")
        || back(2) == Some("no")
        || (back(3) == Some("no") && matches!(back(1), Some("or" | "nor")))
    {
        valence = base * N_SCALAR;
    }

    if st.is_cap_diff && is_all_caps(&words[i]) {
        valence += if valence > 0.0 { C_INCR } else { -C_INCR };
    }

    for start_i in 0..3 {
        let j = match i.checked_sub(start_i + 1) {
            Some(j) => j,
            None => break,
        };
        if lexicon.contains(&lower[j]) {
            continue;
        }
        let s = scalar_inc_dec(&words[j], &lower[j], valence, st.is_cap_diff);
        valence += s * BOOSTER_DECAY[start_i];
        valence = negation_check(valence, lower, start_i, i);
        if start_i == 2 {
            valence = special_idioms_check(valence, lower, i);
        }
    }

    least_check(valence, lexicon, lower, i)
}

/// Booster/dampener contribution of `word` toward a sentiment word of the
/// given valence. Pushes away from zero, more so for an ALL-CAPS booster.
fn scalar_inc_dec(word: &str, word_lower: &str, valence: f64, is_cap_diff: bool) -> f64 {
    let Some(&incr) = BOOSTER_DICT.get(word_lower) else {
        return 0.0;
    };
    let mut scalar = if valence < 0.0 { -incr } else { incr };
    if is_cap_diff && is_all_caps(word) {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

// Caller guarantees i > start_i.
fn negation_check(valence: f64, lower: &[String], start_i: usize, i: usize) -> f64 {
    let w = |n: usize| lower[i - n].as_str();
    match start_i {
        0 => {
            if is_negated(w(1)) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
        1 => {
            if w(2) == "never" && matches!(w(1), "so" | "this") {
                valence * NEVER_SO_SCALAR
            } else if w(2) == "without" && w(1) == "doubt" {
                valence
            } else if is_negated(w(2)) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
        2 => {
            // "so"/"this" right before the word boosts even without "never"
            if (w(3) == "never" && matches!(w(2), "so" | "this")) || matches!(w(1), "so" | "this") {
                valence * NEVER_SO_SCALAR
            } else if w(3) == "without" && (w(2) == "doubt" || w(1) == "doubt") {
                valence
            } else if is_negated(w(3)) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
        _ => valence,
    }
}

// Only reached with i >= 3.
fn special_idioms_check(mut valence: f64, lower: &[String], i: usize) -> f64 {
    let w = |j: usize| lower[j].as_str();
    let onezero = format!("{} {}", w(i - 1), w(i));
    let twoonezero = format!("{} {} {}", w(i - 2), w(i - 1), w(i));
    let twoone = format!("{} {}", w(i - 2), w(i - 1));
    let threetwoone = format!("{} {} {}", w(i - 3), w(i - 2), w(i - 1));
    let threetwo = format!("{} {}", w(i - 3), w(i - 2));

    if let Some(&v) = [&onezero, &twoonezero, &twoone, &threetwoone, &threetwo]
        .iter()
        .find_map(|seq| SPECIAL_CASES.get(seq.as_str()))
    {
        valence = v;
    }

    // look-ahead phrases starting at the current word win over look-back ones
    if let Some(next) = lower.get(i + 1) {
        let zeroone = format!("{} {}", w(i), next);
        if let Some(&v) = SPECIAL_CASES.get(zeroone.as_str()) {
            valence = v;
        }
    }
    if let Some(next2) = lower.get(i + 2) {
        let zeroonetwo = format!("{} {} {}", w(i), w(i + 1), next2);
        if let Some(&v) = SPECIAL_CASES.get(zeroonetwo.as_str()) {
            valence = v;
        }
    }

    // multi-word dampeners such as "kind of" and "sort of"
    for ngram in [&threetwoone, &threetwo, &twoone] {
        if let Some(&incr) = BOOSTER_DICT.get(ngram.as_str()) {
            valence += incr;
        }
    }
    valence
}

/// "least" before a word negates it, except in "at least" and "very least".
fn least_check(valence: f64, lexicon: &Lexicon, lower: &[String], i: usize) -> f64 {
    if i == 0 {
        return valence;
    }
    let prev = lower[i - 1].as_str();
    if prev != "least" || lexicon.contains(prev) {
        return valence;
    }
    match i.checked_sub(2).map(|j| lower[j].as_str()) {
        Some("at" | "very") => valence,
        _ => valence * N_SCALAR,
    }
}
