//! Longest increasing subsequence
//!
//! Used by the keyed children diff to find the matched nodes that are
//! already in relative order and can stay where they are.
//!
//! # Algorithm
//!
//! Patience-sorting formulation: `tails[k]` holds the index of the smallest
//! tail value of any increasing run of length `k + 1` seen so far, located
//! by binary search. Each index records its predecessor in the run it
//! extended, so one longest run is rebuilt by walking back from the last
//! tail.
//!
//! # Complexity
//!
//! - Time: O(n log n)
//! - Space: O(n)

/// Compute one longest strictly increasing subsequence.
///
/// Zero entries mean "no value here": they are skipped but keep their
/// position. Returns indices into `seq`, in ascending order.
///
/// ```
/// use tola_reconcile::algo::longest_increasing_subsequence;
///
/// assert_eq!(longest_increasing_subsequence(&[3, 1, 2]), vec![1, 2]);
/// assert_eq!(longest_increasing_subsequence(&[0, 5, 0, 6]), vec![1, 3]);
/// ```
pub fn longest_increasing_subsequence(seq: &[usize]) -> Vec<usize> {
    let mut tails: Vec<usize> = Vec::with_capacity(seq.len());
    let mut predecessor: Vec<Option<usize>> = vec![None; seq.len()];

    for (i, &value) in seq.iter().enumerate() {
        if value == 0 {
            continue;
        }

        // First tail that is not smaller than `value`.
        let pos = tails.partition_point(|&t| seq[t] < value);
        if pos > 0 {
            predecessor[i] = Some(tails[pos - 1]);
        }

        if pos == tails.len() {
            tails.push(i);
        } else {
            tails[pos] = i;
        }
    }

    let mut result = vec![0; tails.len()];
    let mut cursor = tails.last().copied();
    for slot in result.iter_mut().rev() {
        let Some(i) = cursor else {
            break;
        };
        *slot = i;
        cursor = predecessor[i];
    }

    result
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn values(seq: &[usize], indices: &[usize]) -> Vec<usize> {
        indices.iter().map(|&i| seq[i]).collect()
    }

    #[test]
    fn test_empty() {
        assert!(longest_increasing_subsequence(&[]).is_empty());
    }

    #[test]
    fn test_all_zero() {
        assert!(longest_increasing_subsequence(&[0, 0, 0]).is_empty());
    }

    #[test]
    fn test_already_sorted() {
        assert_eq!(longest_increasing_subsequence(&[1, 2, 3, 4]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reversed() {
        let lis = longest_increasing_subsequence(&[4, 3, 2, 1]);
        assert_eq!(lis.len(), 1);
    }

    #[test]
    fn test_rotation() {
        // [3, 1, 2]: 1 and 2 stay, 3 moves
        assert_eq!(longest_increasing_subsequence(&[3, 1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_zeros_keep_position() {
        let seq = [0, 4, 0, 2, 3, 0, 5];
        let lis = longest_increasing_subsequence(&seq);
        assert_eq!(lis, vec![3, 4, 6]);
        assert_eq!(values(&seq, &lis), vec![2, 3, 5]);
    }

    #[test]
    fn test_strictly_increasing() {
        let seq = [2, 2, 2];
        assert_eq!(longest_increasing_subsequence(&seq).len(), 1);
    }

    #[test]
    fn test_classic_sequence() {
        let seq = [10, 9, 2, 5, 3, 7, 101, 18];
        let lis = longest_increasing_subsequence(&seq);
        assert_eq!(lis.len(), 4);

        let picked = values(&seq, &lis);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
        assert!(lis.windows(2).all(|w| w[0] < w[1]));
    }
}
