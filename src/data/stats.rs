use crate::predict::Label;

/// Number of equal-width buckets in the feature histogram.
pub const HISTOGRAM_BINS: usize = 20;

// ---------------------------------------------------------------------------
// Label counts
// ---------------------------------------------------------------------------

/// Rows per label, always reported in `[Pure, Adulterated]` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    pub pure: usize,
    pub adulterated: usize,
}

impl LabelCounts {
    /// Count a label column.  Values other than exactly 0 or 1 are ignored.
    pub fn from_column<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut counts = LabelCounts::default();
        for v in values {
            if v == Label::Pure.as_f64() {
                counts.pure += 1;
            } else if v == Label::Adulterated.as_f64() {
                counts.adulterated += 1;
            }
        }
        counts
    }

    pub fn count(&self, label: Label) -> usize {
        match label {
            Label::Pure => self.pure,
            Label::Adulterated => self.adulterated,
        }
    }

    /// `(label, count)` pairs sorted by label value.
    pub fn bars(&self) -> [(Label, usize); 2] {
        Label::ALL.map(|label| (label, self.count(label)))
    }
}

/// Sum of a label column, `NaN` skipped, truncated like an integer cast.
pub fn flagged_count<I: IntoIterator<Item = f64>>(values: I) -> usize {
    let sum: f64 = values.into_iter().filter(|v| !v.is_nan()).sum();
    sum.max(0.0) as usize
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width frequency histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bucket edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    /// Midpoint of each bucket.
    pub fn centers(&self) -> impl Iterator<Item = f64> + '_ {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bucket the finite values into `bins` equal-width buckets spanning
/// `[min, max]`; the last bucket is closed on the right.
///
/// A constant input spans `[v - 0.5, v + 0.5]`; no finite values spans
/// `[0, 1]` with every count zero.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

    let (lo, hi) = match finite.iter().copied().fold(None, |acc: Option<(f64, f64)>, v| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    }) {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some(range) => range,
    };

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for v in finite {
        let bucket = (((v - lo) / width) as usize).min(bins - 1);
        counts[bucket] += 1;
    }

    Histogram { edges, counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_are_ordered_pure_first() {
        let counts = LabelCounts::from_column([1.0, 1.0, 1.0, 0.0]);
        let bars = counts.bars();
        assert_eq!(bars[0], (Label::Pure, 1));
        assert_eq!(bars[1], (Label::Adulterated, 3));
    }

    #[test]
    fn missing_label_still_gets_a_bar() {
        let bars = LabelCounts::from_column([0.0, 0.0]).bars();
        assert_eq!(bars, [(Label::Pure, 2), (Label::Adulterated, 0)]);
    }

    #[test]
    fn flagged_count_sums_label_column() {
        assert_eq!(flagged_count([0.0, 1.0, 1.0, f64::NAN]), 2);
        assert_eq!(flagged_count(std::iter::empty::<f64>()), 0);
    }

    #[test]
    fn histogram_has_fixed_bucket_count() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let h = histogram(&values, HISTOGRAM_BINS);

        assert_eq!(h.counts.len(), HISTOGRAM_BINS);
        assert_eq!(h.edges.len(), HISTOGRAM_BINS + 1);
        assert_eq!(h.total(), 100);
        assert!(h.counts.iter().all(|&c| c == 5));
        assert_eq!(h.edges[0], 0.0);
        assert!((h.edges[HISTOGRAM_BINS] - 99.0).abs() < 1e-9);
    }

    #[test]
    fn maximum_lands_in_last_bucket() {
        let h = histogram(&[0.0, 1.0], 4);
        assert_eq!(h.counts, vec![1, 0, 0, 1]);
        assert_eq!(h.bin_width(), 0.25);
    }

    #[test]
    fn constant_values_are_centred() {
        let h = histogram(&[3.0, 3.0, 3.0], HISTOGRAM_BINS);
        assert_eq!(h.edges[0], 2.5);
        assert_eq!(h.total(), 3);
        assert_eq!(h.counts.iter().filter(|&&c| c > 0).count(), 1);
    }

    #[test]
    fn nan_values_are_ignored() {
        let h = histogram(&[f64::NAN, f64::NAN], HISTOGRAM_BINS);
        assert_eq!(h.total(), 0);
        assert_eq!(h.edges[0], 0.0);
        assert_eq!(h.centers().count(), HISTOGRAM_BINS);
    }
}
