//! Glob-style matching for cache keys.
//!
//! Patterns support `*` as a wildcard matching any sequence of characters,
//! including the empty one. Keys contain no wildcard characters themselves.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use practika_core::cache::pattern_matches;
///
/// assert!(pattern_matches("entries:*", "entries:1:50:-:createdAt"));
/// assert!(pattern_matches("routine:*", "routine:abc"));
/// assert!(!pattern_matches("entry:*", "entries:1:50:-:createdAt"));
/// assert!(pattern_matches("selected_routine", "selected_routine"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let k: Vec<char> = key.chars().collect();

    // Classic iterative wildcard match with single-level backtracking: on a
    // mismatch, retry from the most recent `*` consuming one more key char.
    let (mut pi, mut ki) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut star_ki = 0usize;

    while ki < k.len() {
        if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            star_ki = ki;
            pi += 1;
        } else if pi < p.len() && p[pi] == k[ki] {
            pi += 1;
            ki += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            star_ki += 1;
            ki = star_ki;
        } else {
            return false;
        }
    }

    // Key exhausted: any remaining pattern chars must all be wildcards.
    p[pi..].iter().all(|c| *c == '*')
}
