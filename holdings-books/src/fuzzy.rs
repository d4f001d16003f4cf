//! Substring-tolerant string similarity.

use strsim::normalized_levenshtein;

/// Similarity of the shorter string to its best-matching window in the longer
/// one, on a 0-100 scale. Comparison ignores case.
///
/// ```
/// use holdings_books::partial_ratio;
///
/// assert_eq!(partial_ratio("Clean Code", "clean code: a handbook of agile craftsmanship"), 100);
/// assert_eq!(partial_ratio("", "anything"), 0);
/// ```
pub fn partial_ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return 0;
    }

    let needle: String = short.iter().collect();
    let best = long
        .windows(short.len())
        .map(|w| normalized_levenshtein(&needle, &w.iter().collect::<String>()))
        .fold(0.0_f64, f64::max);

    (best * 100.0).round() as u32
}
