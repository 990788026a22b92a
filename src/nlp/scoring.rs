// Aggregation of per-token valences into neg/neu/pos proportions and the
// normalized compound score.
use crate::nlp::constants::{
    BUT_AFTER_SCALAR, BUT_BEFORE_SCALAR, EXCLAMATION_CAP, EXCLAMATION_INCR, NORMALIZE_ALPHA,
    QUESTION_CAP_AMPLIFIER, QUESTION_INCR,
};
use crate::nlp::sentiment::Sentiment;

/// The clause after the first "but" dominates: halve what precedes it and
/// boost what follows.
pub fn but_check(words_lower: &[String], sentiments: &mut [f64]) {
    let Some(bi) = words_lower.iter().position(|w| w == "but") else {
        return;
    };
    for (si, s) in sentiments.iter_mut().enumerate() {
        if si < bi {
            *s *= BUT_BEFORE_SCALAR;
        } else if si > bi {
            *s *= BUT_AFTER_SCALAR;
        }
    }
}

/// Squashes an unbounded sum into [-1, 1].
pub fn normalize(score: f64, alpha: f64) -> f64 {
    let norm = score / (score * score + alpha).sqrt();
    norm.clamp(-1.0, 1.0)
}

fn amplify_ep(text: &str) -> f64 {
    let count = text.matches('!').count().min(EXCLAMATION_CAP);
    count as f64 * EXCLAMATION_INCR
}

fn amplify_qm(text: &str) -> f64 {
    match text.matches('?').count() {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * QUESTION_INCR,
        _ => QUESTION_CAP_AMPLIFIER,
    }
}

/// Combined "!" and "?" emphasis; always non-negative.
pub fn punctuation_emphasis(text: &str) -> f64 {
    amplify_ep(text) + amplify_qm(text)
}

/// Positive sum, negative sum and neutral count. Each signed entry is pushed
/// one unit further from zero to weigh it against the neutral tokens.
pub fn sift_sentiment_scores(sentiments: &[f64]) -> (f64, f64, usize) {
    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1;
        }
    }
    (pos_sum, neg_sum, neu_count)
}

pub fn score_valence(sentiments: &[f64], text: &str) -> Sentiment {
    if sentiments.is_empty() {
        return Sentiment::default();
    }

    let punct_emph_amplifier = punctuation_emphasis(text);

    let mut sum_s: f64 = sentiments.iter().sum();
    if sum_s > 0.0 {
        sum_s += punct_emph_amplifier;
    } else if sum_s < 0.0 {
        sum_s -= punct_emph_amplifier;
    }
    let compound = normalize(sum_s, NORMALIZE_ALPHA);

    let (mut pos_sum, mut neg_sum, neu_count) = sift_sentiment_scores(sentiments);
    if pos_sum > neg_sum.abs() {
        pos_sum += punct_emph_amplifier;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= punct_emph_amplifier;
    }

    let total = pos_sum + neg_sum.abs() + neu_count as f64;
    if total == 0.0 {
        return Sentiment::default();
    }

    Sentiment {
        negative: (neg_sum / total).abs(),
        neutral: (neu_count as f64 / total).abs(),
        positive: (pos_sum / total).abs(),
        compound,
    }
}
