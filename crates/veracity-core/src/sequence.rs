//! Element-wise sequence comparison with a capped diagnostic listing.
//!
//! The comparator always walks the whole of `range1`, even after the first mismatch,
//! so the report can state the total mismatch count. Only the first `sample_cap`
//! mismatching positions are rendered; the rest are summarized by an
//! `(output limit reached)` marker.

use std::any::type_name;
use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

use crate::config::{self, AssertConfig, DEFAULT_MAX_OUTPUT_LINES};
use crate::outcome::{AssertResult, FailureOutcome, LocationTag};
use crate::tolerance::{ComparisonTolerance, TolerancePredicate};

/// Phrase raised as a precondition error when sequence lengths disagree.
pub const DIFFERENT_SIZES: &str = "Sequences have different sizes";

const SEPARATOR: &str = "--------------------------------";
const LIMIT_MARKER: &str = "  (output limit reached)";

/// A binary predicate over one element from each sequence.
///
/// Implemented by closures `Fn(&A, &B) -> bool`, [`ExactEquality`], and
/// [`TolerancePredicate`].
pub trait ElementPredicate<A: ?Sized, B: ?Sized = A> {
    fn test(&self, a: &A, b: &B) -> bool;
}

impl<A, B, F> ElementPredicate<A, B> for F
where
    A: ?Sized,
    B: ?Sized,
    F: Fn(&A, &B) -> bool,
{
    fn test(&self, a: &A, b: &B) -> bool {
        self(a, b)
    }
}

/// `a == b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactEquality;

impl<A, B> ElementPredicate<A, B> for ExactEquality
where
    A: PartialEq<B> + ?Sized,
    B: ?Sized,
{
    fn test(&self, a: &A, b: &B) -> bool {
        a == b
    }
}

/// Diagnostics accumulated during one sequence scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchReport {
    element_type: String,
    total_compared: usize,
    mismatch_count: usize,
    sample_lines: Vec<String>,
    sample_cap: usize,
}

impl MismatchReport {
    #[must_use]
    pub fn new(element_type: impl Into<String>, sample_cap: usize) -> Self {
        Self {
            element_type: element_type.into(),
            total_compared: 0,
            mismatch_count: 0,
            sample_lines: Vec::new(),
            sample_cap,
        }
    }

    /// Record one position. Lines are rendered only while under the cap.
    pub fn observe<A, B>(&mut self, matched: bool, a: &A, b: &B)
    where
        A: Debug + ?Sized,
        B: Debug + ?Sized,
    {
        let index = self.total_compared;
        self.total_compared += 1;
        if matched {
            return;
        }
        self.mismatch_count += 1;
        if self.mismatch_count <= self.sample_cap {
            self.sample_lines.push(format!("  [{index}] {a:?}  {b:?}"));
        }
    }

    #[must_use]
    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    #[must_use]
    pub fn total_compared(&self) -> usize {
        self.total_compared
    }

    #[must_use]
    pub fn mismatch_count(&self) -> usize {
        self.mismatch_count
    }

    #[must_use]
    pub fn sample_lines(&self) -> &[String] {
        &self.sample_lines
    }

    #[must_use]
    pub fn sample_cap(&self) -> usize {
        self.sample_cap
    }

    /// More mismatches were seen than could be listed.
    #[must_use]
    pub fn limit_reached(&self) -> bool {
        self.mismatch_count > self.sample_cap
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.mismatch_count == 0
    }

    /// Turn the finished scan into an outcome; `None` when nothing mismatched.
    #[must_use]
    pub fn into_outcome(self, location: &LocationTag) -> Option<FailureOutcome> {
        if self.is_clean() {
            return None;
        }
        let body = self.to_string();
        Some(FailureOutcome::mismatch(location, body).with_report(self))
    }
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sequences are not equal [type='{}']", self.element_type)?;
        writeln!(f, "{SEPARATOR}")?;
        for line in &self.sample_lines {
            writeln!(f, "{line}")?;
        }
        if self.limit_reached() {
            writeln!(f, "{LIMIT_MARKER}")?;
        }
        writeln!(f, "{SEPARATOR}")?;
        write!(
            f,
            "Sequences differ at {} of {} positions",
            self.mismatch_count, self.total_compared
        )
    }
}

/// Full-pass sequence comparator with an explicit sample cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceComparator {
    sample_cap: usize,
}

impl Default for SequenceComparator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OUTPUT_LINES)
    }
}

impl SequenceComparator {
    #[must_use]
    pub const fn new(sample_cap: usize) -> Self {
        Self { sample_cap }
    }

    #[must_use]
    pub const fn from_config(config: &AssertConfig) -> Self {
        Self::new(config.max_output_lines)
    }

    #[must_use]
    pub const fn sample_cap(&self) -> usize {
        self.sample_cap
    }

    /// Compare `range1` against the leading `range1.len()` elements of `range2`.
    ///
    /// Trailing elements of `range2` are not inspected. A `range2` shorter than
    /// `range1` is rejected as a precondition error before any comparison runs.
    pub fn compare<A, B, P>(
        &self,
        range1: &[A],
        range2: &[B],
        predicate: &P,
        location: &LocationTag,
    ) -> AssertResult
    where
        A: Debug,
        B: Debug,
        P: ElementPredicate<A, B> + ?Sized,
    {
        if range2.len() < range1.len() {
            return Err(FailureOutcome::precondition(location, DIFFERENT_SIZES));
        }

        let mut report = MismatchReport::new(type_name::<A>(), self.sample_cap);
        for (a, b) in range1.iter().zip(range2) {
            report.observe(predicate.test(a, b), a, b);
        }

        match report.into_outcome(location) {
            None => Ok(()),
            Some(failure) => Err(failure),
        }
    }
}

/// Compare two ranges with a caller-supplied predicate.
pub fn assert_equal_ranges_by<A, B, P>(
    range1: &[A],
    range2: &[B],
    predicate: &P,
    location: &LocationTag,
) -> AssertResult
where
    A: Debug,
    B: Debug,
    P: ElementPredicate<A, B> + ?Sized,
{
    SequenceComparator::from_config(config::config()).compare(range1, range2, predicate, location)
}

/// Compare two ranges for exact element equality.
pub fn assert_equal_ranges<A, B>(range1: &[A], range2: &[B], location: &LocationTag) -> AssertResult
where
    A: PartialEq<B> + Debug,
    B: Debug,
{
    assert_equal_ranges_by(range1, range2, &ExactEquality, location)
}

/// Compare two numeric ranges under the configured default tolerance.
pub fn assert_almost_equal_ranges<A, B>(
    range1: &[A],
    range2: &[B],
    location: &LocationTag,
) -> AssertResult
where
    A: num_traits::AsPrimitive<f64> + Debug,
    B: num_traits::AsPrimitive<f64> + Debug,
{
    assert_almost_equal_ranges_tol(range1, range2, location, &config::config().tolerance)
}

/// Compare two numeric ranges under an explicit tolerance.
pub fn assert_almost_equal_ranges_tol<A, B>(
    range1: &[A],
    range2: &[B],
    location: &LocationTag,
    tol: &ComparisonTolerance,
) -> AssertResult
where
    A: num_traits::AsPrimitive<f64> + Debug,
    B: num_traits::AsPrimitive<f64> + Debug,
{
    assert_equal_ranges_by(range1, range2, &TolerancePredicate::new(*tol), location)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> LocationTag {
        LocationTag::new("seq.rs", 7)
    }

    #[test]
    fn identical_sequences_pass() {
        assert!(assert_equal_ranges(&[1, 2, 3], &[1, 2, 3], &loc()).is_ok());
        assert!(assert_equal_ranges::<i32, i32>(&[], &[], &loc()).is_ok());
    }

    #[test]
    fn mismatches_are_counted_and_sampled() {
        let err = SequenceComparator::new(10)
            .compare(&[1, 2, 3, 4], &[1, 9, 3, 9], &ExactEquality, &loc())
            .unwrap_err();
        assert!(err.is_mismatch());
        let report = err.report().expect("sequence report attached");
        assert_eq!(report.mismatch_count(), 2);
        assert_eq!(report.total_compared(), 4);
        assert_eq!(report.sample_lines(), ["  [1] 2  9", "  [3] 4  9"]);
        assert!(!report.limit_reached());
    }

    #[test]
    fn rendered_message_layout() {
        let err = SequenceComparator::new(10)
            .compare(&[1, 2, 3, 4], &[1, 9, 3, 9], &ExactEquality, &loc())
            .unwrap_err();
        let expected = "[seq.rs:7] Sequences are not equal [type='i32']\n\
                        --------------------------------\n  \
                        [1] 2  9\n  \
                        [3] 4  9\n\
                        --------------------------------\n\
                        Sequences differ at 2 of 4 positions";
        assert_eq!(err.message(), expected);
    }

    #[test]
    fn sample_list_is_capped_but_count_is_total() {
        let a: Vec<u32> = (0..50).collect();
        let b: Vec<u32> = (0..50).map(|x| x + 1).collect();
        let err = SequenceComparator::new(3)
            .compare(&a, &b, &ExactEquality, &loc())
            .unwrap_err();
        let report = err.report().unwrap();
        assert_eq!(report.mismatch_count(), 50);
        assert_eq!(report.sample_lines().len(), 3);
        assert!(report.limit_reached());
        assert!(err.message().contains("(output limit reached)"));
        assert!(err.message().ends_with("Sequences differ at 50 of 50 positions"));
    }

    #[test]
    fn exactly_cap_mismatches_has_no_marker() {
        let err = SequenceComparator::new(2)
            .compare(&[0, 0], &[1, 1], &ExactEquality, &loc())
            .unwrap_err();
        assert!(!err.message().contains("output limit"));
        assert_eq!(err.report().unwrap().sample_lines().len(), 2);
    }

    #[test]
    fn closure_predicate_is_accepted() {
        let same_parity = |a: &i32, b: &i32| a % 2 == b % 2;
        assert!(assert_equal_ranges_by(&[1, 2, 3], &[5, 8, 7], &same_parity, &loc()).is_ok());
        let err = assert_equal_ranges_by(&[1, 2], &[2, 2], &same_parity, &loc()).unwrap_err();
        assert_eq!(err.report().unwrap().mismatch_count(), 1);
    }

    #[test]
    fn tolerance_path_uses_predicate() {
        let a = [1.0_f64, 2.0, 3.0];
        let b = [1.00001_f64, 2.5, 3.0];
        let err = assert_almost_equal_ranges(&a, &b, &loc()).unwrap_err();
        let report = err.report().unwrap();
        assert_eq!(report.mismatch_count(), 1);
        assert_eq!(report.sample_lines(), ["  [1] 2.0  2.5"]);

        let loose = ComparisonTolerance::new(1.0, 0.0).unwrap();
        assert!(assert_almost_equal_ranges_tol(&a, &b, &loc(), &loose).is_ok());
    }

    #[test]
    fn longer_second_range_reads_only_leading_elements() {
        assert!(assert_equal_ranges(&[1, 2], &[1, 2, 99], &loc()).is_ok());
    }

    #[test]
    fn shorter_second_range_is_a_precondition_error() {
        let err = assert_equal_ranges(&[1, 2, 3], &[1, 2], &loc()).unwrap_err();
        assert!(err.is_precondition_error());
        assert_eq!(err.message(), DIFFERENT_SIZES);
    }

    #[test]
    fn repeated_comparison_is_deterministic() {
        let first = assert_equal_ranges(&[1, 2, 3], &[3, 2, 1], &loc()).unwrap_err();
        let second = assert_equal_ranges(&[1, 2, 3], &[3, 2, 1], &loc()).unwrap_err();
        assert_eq!(first, second);
    }
}
