//! Band-limited Levenshtein distance.

/// Largest edit distance still considered a fuzzy match for a query of
/// `query_len` characters: half the query length, at least 1 and at most 3.
pub fn max_allowed_edits(query_len: usize) -> usize {
    (query_len / 2).clamp(1, 3)
}

/// Insert/delete/substitute distance between `a` and `b`, or `None` once it
/// is certain to exceed `max`.
///
/// Gives up before touching the matrix when the length difference alone is
/// over the bound, and abandons the computation as soon as every cell of a
/// row is over it.
pub fn bounded_levenshtein(a: &[char], b: &[char], max: usize) -> Option<usize> {
    if a == b {
        return Some(0);
    }
    if a.len().abs_diff(b.len()) > max {
        return None;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        let mut row_min = cur[0];

        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j + 1] + 1) // deletion
                .min(cur[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
            row_min = row_min.min(cur[j + 1]);
        }

        if row_min > max {
            return None;
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    let distance = prev[b.len()];
    (distance <= max).then_some(distance)
}
