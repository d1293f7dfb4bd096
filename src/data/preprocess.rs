use super::model::Dataset;

// ---------------------------------------------------------------------------
// Preprocessing options
// ---------------------------------------------------------------------------

/// Independently toggleable transforms, applied normalize-first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessOptions {
    pub normalize: bool,
    pub drop_zero_rows: bool,
}

/// Apply the enabled transforms in order and return the new table.
pub fn apply(dataset: &Dataset, options: PreprocessOptions) -> Dataset {
    let mut out = dataset.clone();
    if options.normalize {
        min_max_normalize(&mut out);
    }
    if options.drop_zero_rows {
        drop_zero_rows(&mut out);
    }
    out
}

// ---------------------------------------------------------------------------
// Min-max scaling
// ---------------------------------------------------------------------------

/// `(min, max)` of a column, skipping `NaN`.  Both are `NaN` when the column
/// has no numeric values.
pub fn column_range(dataset: &Dataset, idx: usize) -> (f64, f64) {
    dataset
        .column(idx)
        .filter(|v| !v.is_nan())
        .fold((f64::NAN, f64::NAN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Rescale every column to `[0, 1]` via `(v - min) / (max - min)`.
///
/// All columns are scaled, the label column included.  A column whose max
/// equals its min is left as `NaN` in every row.
pub fn min_max_normalize(dataset: &mut Dataset) {
    for idx in 0..dataset.width() {
        let (min, max) = column_range(dataset, idx);
        let range = max - min;
        dataset.map_column(idx, |v| (v - min) / range);
    }
}

/// Columns whose values are all equal (or all missing) and would therefore
/// normalize to `NaN`.
pub fn zero_range_columns(dataset: &Dataset) -> Vec<String> {
    if dataset.is_empty() {
        return Vec::new();
    }
    (0..dataset.width())
        .filter(|&idx| {
            let (min, max) = column_range(dataset, idx);
            let range = max - min;
            range == 0.0 || range.is_nan()
        })
        .map(|idx| dataset.columns()[idx].clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Zero-row drop
// ---------------------------------------------------------------------------

/// Remove every row that contains an exact zero.  `NaN` is not zero.
pub fn drop_zero_rows(dataset: &mut Dataset) {
    dataset.retain_rows(|row| row.iter().all(|&v| v != 0.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[f64]]) -> Dataset {
        let mut ds = Dataset::with_columns(columns.iter().copied());
        for row in rows {
            ds.append_record(columns.iter().copied().zip(row.iter().copied()));
        }
        ds
    }

    #[test]
    fn normalized_columns_span_unit_interval() {
        let mut ds = table(&["pH", "Density"], &[&[6.0, 1.2], &[7.5, 0.9], &[9.0, 1.05]]);
        min_max_normalize(&mut ds);

        for idx in 0..ds.width() {
            let (min, max) = column_range(&ds, idx);
            assert_eq!(min, 0.0);
            assert_eq!(max, 1.0);
        }
        assert_eq!(ds.column_by_name("pH").unwrap(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn constant_column_normalizes_to_nan() {
        let mut ds = table(&["pH", "Salt"], &[&[6.0, 3.0], &[7.0, 3.0], &[8.0, 3.0]]);
        assert_eq!(zero_range_columns(&ds), vec!["Salt".to_string()]);

        min_max_normalize(&mut ds);
        assert!(ds.column_by_name("Salt").unwrap().iter().all(|v| v.is_nan()));
        assert_eq!(ds.column_by_name("pH").unwrap(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn missing_values_are_skipped_for_range() {
        let mut ds = table(&["a"], &[&[2.0], &[f64::NAN], &[4.0]]);
        min_max_normalize(&mut ds);
        let col = ds.column_by_name("a").unwrap();
        assert_eq!(col[0], 0.0);
        assert!(col[1].is_nan());
        assert_eq!(col[2], 1.0);
    }

    #[test]
    fn drop_zero_rows_is_idempotent() {
        let mut once = table(&["a", "b"], &[&[1.0, 0.0], &[2.0, 3.0], &[0.0, 4.0], &[5.0, f64::NAN]]);
        drop_zero_rows(&mut once);
        let mut twice = once.clone();
        drop_zero_rows(&mut twice);

        assert_eq!(once.len(), 2);
        assert_eq!(once.rows()[0], vec![2.0, 3.0]);
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.rows()[0], twice.rows()[0]);
    }

    #[test]
    fn drop_zero_runs_after_normalization() {
        // Normalizing turns each column minimum into 0, so those rows go.
        let ds = table(&["a", "b"], &[&[1.0, 5.0], &[2.0, 6.0], &[3.0, 4.0]]);
        let out = apply(&ds, PreprocessOptions { normalize: true, drop_zero_rows: true });
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows()[0], vec![0.5, 1.0]);
    }

    #[test]
    fn disabled_options_leave_table_untouched() {
        let ds = table(&["a"], &[&[0.0], &[2.0]]);
        assert_eq!(apply(&ds, PreprocessOptions::default()), ds);
    }
}
