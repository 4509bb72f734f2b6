//! Agreement between a predicted subset and a reference subset
//!
//! Undefined ratios (empty denominators) are `None` rather than NaN.

use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// Overlap statistics of a predicted subset against a reference subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsetMetrics {
    pub jaccard: Option<f64>,
    pub recall: Option<f64>,
    pub precision: Option<f64>,
    pub f_measure: Option<f64>,
    pub fdr: Option<f64>,
}

impl SubsetMetrics {
    pub fn compute<T: Eq + Hash>(predicted: &[T], reference: &[T]) -> Self {
        let (recall, precision) = recall_precision(predicted, reference).unzip();
        Self {
            jaccard: jaccard_index(predicted, reference),
            recall,
            precision,
            f_measure: f_measure(predicted, reference),
            fdr: false_discovery_rate(predicted, reference),
        }
    }

    /// Tab-separated `metric\tvalue` lines; undefined values print as `nan`
    pub fn to_report_string(&self) -> String {
        let fmt = |v: Option<f64>| v.map_or_else(|| "nan".to_string(), |v| v.to_string());
        format!(
            "jaccard\t{}\nrecall\t{}\nprecision\t{}\nf_measure\t{}\nfdr\t{}",
            fmt(self.jaccard),
            fmt(self.recall),
            fmt(self.precision),
            fmt(self.f_measure),
            fmt(self.fdr)
        )
    }
}

/// |X ∩ Y| / |X ∪ Y|
pub fn jaccard_index<T: Eq + Hash>(x: &[T], y: &[T]) -> Option<f64> {
    let x: HashSet<&T> = x.iter().collect();
    let y: HashSet<&T> = y.iter().collect();
    let union = x.union(&y).count();
    if union == 0 {
        return None;
    }
    Some(x.intersection(&y).count() as f64 / union as f64)
}

/// (recall, precision) of `predicted` against `reference`
///
/// Defined only when both sets are non-empty.
pub fn recall_precision<T: Eq + Hash>(predicted: &[T], reference: &[T]) -> Option<(f64, f64)> {
    let predicted: HashSet<&T> = predicted.iter().collect();
    let reference: HashSet<&T> = reference.iter().collect();
    if predicted.is_empty() || reference.is_empty() {
        return None;
    }
    let hits = predicted.intersection(&reference).count() as f64;
    Some((hits / reference.len() as f64, hits / predicted.len() as f64))
}

/// Harmonic mean of recall and precision
pub fn f_measure<T: Eq + Hash>(predicted: &[T], reference: &[T]) -> Option<f64> {
    let (recall, precision) = recall_precision(predicted, reference)?;
    if recall + precision == 0.0 {
        return None;
    }
    Some(2.0 * recall * precision / (recall + precision))
}

/// |P \ T| / |P|
pub fn false_discovery_rate<T: Eq + Hash>(predicted: &[T], reference: &[T]) -> Option<f64> {
    let predicted: HashSet<&T> = predicted.iter().collect();
    if predicted.is_empty() {
        return None;
    }
    let reference: HashSet<&T> = reference.iter().collect();
    let false_positives = predicted.difference(&reference).count();
    Some(false_positives as f64 / predicted.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard_index(&["a", "b", "c"], &["b", "c", "d"]), Some(0.5));
        assert_eq!(jaccard_index::<&str>(&[], &[]), None);
        assert_eq!(jaccard_index(&["a"], &[]), Some(0.0));
    }

    #[test]
    fn test_recall_precision() {
        let (recall, precision) =
            recall_precision(&["a", "b", "c", "d"], &["a", "b", "e"]).unwrap();
        assert!((recall - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(precision, 0.5);
        assert_eq!(recall_precision(&["a"], &[]), None);
    }

    #[test]
    fn test_f_measure() {
        assert_eq!(f_measure(&["a", "b"], &["a", "b"]), Some(1.0));
        assert_eq!(f_measure(&["a"], &["b"]), None);
        let f = f_measure(&["a", "b", "c", "d"], &["a", "b"]).unwrap();
        assert!((f - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_false_discovery_rate() {
        assert_eq!(false_discovery_rate(&["a", "b", "c", "d"], &["a"]), Some(0.75));
        assert_eq!(false_discovery_rate::<&str>(&[], &["a"]), None);
    }

    #[test]
    fn test_duplicates_are_counted_once() {
        assert_eq!(jaccard_index(&["a", "a"], &["a"]), Some(1.0));
        assert_eq!(false_discovery_rate(&["a", "a", "b"], &["a"]), Some(0.5));
    }

    #[test]
    fn test_report_string() {
        let metrics = SubsetMetrics::compute(&["a", "b"], &["b"]);
        let report = metrics.to_report_string();
        assert!(report.contains("jaccard\t0.5"));
        assert!(report.contains("recall\t1"));
        assert!(report.contains("fdr\t0.5"));

        let empty = SubsetMetrics::compute::<&str>(&[], &[]);
        assert!(empty.to_report_string().contains("precision\tnan"));
    }
}
