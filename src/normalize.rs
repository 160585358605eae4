//! Input canonicalization for index keys and queries.
//!
//! Insertion and lookup both go through [`normalize`], so the trie and the
//! fuzzy corpus only ever see comparable keys. Normalization is total over
//! any string and idempotent.

/// Ordered misspelling corrections for the supplement vocabulary.
/// Applied after case folding and whitespace stripping; order matters.
const VITAMIN_CORRECTIONS: &[(&str, &str)] = &[
    ("vitamiin", "vitamin"),
    ("vitmin", "vitamin"),
    ("vitamen", "vitamin"),
    ("vitemin", "vitamin"),
];

/// Lower-case, strip all whitespace, and correct known "vitamin"
/// misspellings, including collapsing repeated letters in `vit(a)+min`
/// patterns ("vitaaamin" -> "vitamin").
pub fn normalize(input: &str) -> String {
    let mut out: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    for (from, to) in VITAMIN_CORRECTIONS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }

    // Any run of repeated 'a's before "min" collapses one step per pass.
    while out.contains("aamin") {
        out = out.replace("aamin", "amin");
    }

    out
}
