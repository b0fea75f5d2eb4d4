//! Trigram shingling for coarse similarity pre-filtering.

use ahash::AHashSet;

/// Three consecutive characters of a lowercased name.
pub type Trigram = [char; 3];

pub type TrigramSet = AHashSet<Trigram>;

/// Build the trigram set of `text`.
///
/// The text is lowercased and spaces become underscores before every
/// contiguous 3-character window is collected. Text shorter than three
/// characters yields an empty set.
pub fn build_trigrams(text: &str) -> TrigramSet {
    let chars: Vec<char> = text
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();

    chars.windows(3).map(|w| [w[0], w[1], w[2]]).collect()
}

/// Whether two trigram sets have at least one element in common.
pub fn shares_trigram(a: &TrigramSet, b: &TrigramSet) -> bool {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().any(|t| large.contains(t))
}
