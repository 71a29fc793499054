//! Edit distance between texts.

/// Levenshtein distance between two strings, counted in characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Whether `distance` is accepted by an optional upper bound (inclusive).
pub fn within(distance: usize, max_distance: Option<usize>) -> bool {
    max_distance.map_or(true, |max| distance <= max)
}
