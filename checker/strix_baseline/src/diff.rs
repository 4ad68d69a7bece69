//! Pure sequence alignment with an injectable equality predicate.
//!
//! Classic longest-common-subsequence matching over two ordered sequences,
//! independent of any persistence concern so reconciliation logic stays
//! unit-testable without filesystem fixtures.

/// Align `old` against `new`, returning matched index pairs in increasing
/// order on both sides.
///
/// The predicate decides equality; elements left unmatched on the old side
/// were removed, on the new side added. Quadratic table fill — per-file
/// diagnostic lists are short.
pub fn sequence_matches<A, B>(
    old: &[A],
    new: &[B],
    eq: impl Fn(&A, &B) -> bool,
) -> Vec<(usize, usize)> {
    let rows = old.len();
    let cols = new.len();
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    // lengths[i][j] = LCS length of old[i..] vs new[j..], flattened
    let mut lengths = vec![0u32; (rows + 1) * (cols + 1)];
    let at = |i: usize, j: usize| i * (cols + 1) + j;
    for i in (0..rows).rev() {
        for j in (0..cols).rev() {
            lengths[at(i, j)] = if eq(&old[i], &new[j]) {
                lengths[at(i + 1, j + 1)] + 1
            } else {
                lengths[at(i + 1, j)].max(lengths[at(i, j + 1)])
            };
        }
    }

    let mut matched = Vec::with_capacity(lengths[at(0, 0)] as usize);
    let (mut i, mut j) = (0, 0);
    while i < rows && j < cols {
        if eq(&old[i], &new[j]) {
            matched.push((i, j));
            i += 1;
            j += 1;
        } else if lengths[at(i + 1, j)] >= lengths[at(i, j + 1)] {
            i += 1;
        } else {
            j += 1;
        }
    }
    matched
}
