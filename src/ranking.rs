//! Edit-distance scoring and the fuzzy fallback ranking.
//!
//! The distance function is the classic Levenshtein DP, computed over a
//! rolling single row. It is only ever used as a fallback scorer when the
//! exact-prefix walk leaves the result set under its limit.

use rayon::prelude::*;

/// Levenshtein distance between `a` and `b` over characters, with each
/// compared pair case-folded defensively (callers normalize first).
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut dp: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        for (j, &bc) in b_chars.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(!chars_eq_fold(ac, bc));
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
        }
    }
    dp[b_chars.len()]
}

fn chars_eq_fold(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Edit budget for a query of `query_len` characters. Short queries
/// tolerate fewer edits before becoming a different word; longer queries
/// absorb more typos.
pub fn max_distance(query_len: usize) -> usize {
    const BASE: usize = 2;
    if query_len <= 4 {
        BASE
    } else if query_len <= 8 {
        BASE + 1
    } else {
        BASE + 2
    }
}

/// Score every stored key against a normalized query and rank the
/// survivors.
///
/// Keys within `max_distance(query_len)` are kept and sorted ascending by
/// distance, with lexicographic key order breaking ties so the ranking is
/// deterministic regardless of corpus-map iteration order.
pub(crate) fn fuzzy_rank<'a>(query: &str, keys: &[&'a str]) -> Vec<(&'a str, usize)> {
    let budget = max_distance(query.chars().count());
    let mut survivors: Vec<(&str, usize)> = keys
        .par_iter()
        .filter_map(|key| {
            let dist = edit_distance(query, key);
            (dist <= budget).then_some((*key, dist))
        })
        .collect();
    survivors.sort_unstable_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    survivors
}
