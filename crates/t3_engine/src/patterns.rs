//! Winning line generation.
//!
//! A pattern is an ordered list of cell indices that wins when every cell
//! holds the same symbol. Patterns depend only on `(board_size, match_size)`
//! and are cached for the life of the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, instrument};

/// One candidate winning line (row-major cell indices).
pub type Pattern = Vec<usize>;

type PatternCache = Mutex<HashMap<(usize, usize), Arc<[Pattern]>>>;

static CACHE: OnceLock<PatternCache> = OnceLock::new();

/// Number of windows of length `match_size` along a line of `board_size`.
fn windows(board_size: usize, match_size: usize) -> usize {
    if match_size == 0 || match_size > board_size {
        0
    } else {
        board_size - match_size + 1
    }
}

/// Expected number of patterns: `2n(n-m+1) + 2(n-m+1)²`.
pub fn pattern_count(board_size: usize, match_size: usize) -> usize {
    let w = windows(board_size, match_size);
    2 * board_size * w + 2 * w * w
}

/// Returns every winning pattern for the given sizes, cached.
///
/// Order is fixed: rows, columns, down-right diagonals, down-left diagonals.
#[instrument]
pub fn winning_patterns(board_size: usize, match_size: usize) -> Arc<[Pattern]> {
    let cache = CACHE.get_or_init(PatternCache::default);
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
    cache
        .entry((board_size, match_size))
        .or_insert_with(|| {
            debug!(board_size, match_size, "Generating winning patterns");
            generate_patterns(board_size, match_size).into()
        })
        .clone()
}

/// Computes the winning patterns without touching the cache.
pub fn generate_patterns(board_size: usize, match_size: usize) -> Vec<Pattern> {
    let n = board_size;
    let m = match_size;
    let w = windows(n, m);
    let mut patterns = Vec::with_capacity(pattern_count(n, m));
    if w == 0 {
        return patterns;
    }

    // Rows
    for row in 0..n {
        for col in 0..w {
            patterns.push((0..m).map(|k| row * n + col + k).collect());
        }
    }

    // Columns
    for col in 0..n {
        for row in 0..w {
            patterns.push((0..m).map(|k| (row + k) * n + col).collect());
        }
    }

    // Diagonals (down-right)
    for row in 0..w {
        for col in 0..w {
            patterns.push((0..m).map(|k| (row + k) * n + col + k).collect());
        }
    }

    // Anti-diagonals (down-left)
    for row in 0..w {
        for col in (m - 1)..n {
            patterns.push((0..m).map(|k| (row + k) * n + col - k).collect());
        }
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_classic_board_has_eight_lines() {
        let patterns = winning_patterns(3, 3);
        assert_eq!(patterns.len(), 8);
        assert_eq!(
            patterns.to_vec(),
            vec![
                vec![0, 1, 2],
                vec![3, 4, 5],
                vec![6, 7, 8],
                vec![0, 3, 6],
                vec![1, 4, 7],
                vec![2, 5, 8],
                vec![0, 4, 8],
                vec![2, 4, 6],
            ]
        );
    }

    #[test]
    fn test_count_matches_formula() {
        for n in 3..=12 {
            for m in 3..=n {
                let patterns = generate_patterns(n, m);
                assert_eq!(patterns.len(), pattern_count(n, m), "n={n} m={m}");
            }
        }
        assert_eq!(pattern_count(5, 4), 28);
    }

    #[test]
    fn test_patterns_unique_and_in_bounds() {
        let (n, m) = (6, 4);
        let patterns = generate_patterns(n, m);
        let unique: HashSet<&Pattern> = patterns.iter().collect();
        assert_eq!(unique.len(), patterns.len());
        for pattern in &patterns {
            assert_eq!(pattern.len(), m);
            assert!(pattern.iter().all(|&i| i < n * n));
        }
    }

    #[test]
    fn test_anti_diagonal_steps_down_left() {
        let patterns = generate_patterns(5, 4);
        let last = patterns.last().unwrap();
        // Starts at row 1, col 4 and walks to row 4, col 1.
        assert_eq!(last, &vec![9, 13, 17, 21]);
    }

    #[test]
    fn test_cache_returns_shared_slice() {
        let first = winning_patterns(7, 5);
        let second = winning_patterns(7, 5);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_match_larger_than_board_yields_nothing() {
        assert!(generate_patterns(3, 4).is_empty());
        assert_eq!(pattern_count(3, 4), 0);
    }
}
