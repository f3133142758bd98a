//! Input generators shared by the comparator benchmarks.

/// `(observed, reference)` where every position differs.
#[must_use]
pub fn dense_mismatch(len: usize) -> (Vec<u64>, Vec<u64>) {
    let reference: Vec<u64> = (0..len as u64).collect();
    let observed = reference.iter().map(|v| v + 1).collect();
    (observed, reference)
}

/// `(observed, reference)` differing at every `stride`-th position.
#[must_use]
pub fn sparse_mismatch(len: usize, stride: usize) -> (Vec<u64>, Vec<u64>) {
    let reference: Vec<u64> = (0..len as u64).collect();
    let observed = reference
        .iter()
        .enumerate()
        .map(|(i, &v)| if stride != 0 && i % stride == 0 { v + 1 } else { v })
        .collect();
    (observed, reference)
}

/// Float samples with a small drift that stays inside the default tolerance.
#[must_use]
pub fn drifted_samples(len: usize) -> (Vec<f64>, Vec<f64>) {
    let reference: Vec<f64> = (0..len).map(|i| (i as f64).sin() * 100.0).collect();
    let observed = reference.iter().map(|v| v + 1e-6).collect();
    (observed, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_produce_expected_mismatch_counts() {
        let (a, b) = dense_mismatch(10);
        assert_eq!(a.iter().zip(&b).filter(|(x, y)| x != y).count(), 10);

        let (a, b) = sparse_mismatch(10, 4);
        assert_eq!(a.iter().zip(&b).filter(|(x, y)| x != y).count(), 3);

        let (a, b) = sparse_mismatch(5, 0);
        assert_eq!(a, b);

        let (a, b) = drifted_samples(100);
        let location = veracity_core::LocationTag::unknown();
        assert!(veracity_core::assert_almost_equal_ranges(&a, &b, &location).is_ok());
    }
}
