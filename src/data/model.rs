use std::fmt;

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

/// Feature columns offered by the manual-entry form, in display order.
pub const FEATURE_NAMES: [&str; 4] = ["pH", "Turbidity", "Density", "SugarContent"];

/// Derived column written by the prediction step (0 = pure, 1 = adulterated).
pub const LABEL_COLUMN: &str = "Adulterated";

// ---------------------------------------------------------------------------
// Dataset – the working feature table
// ---------------------------------------------------------------------------

/// A table of named numeric columns.
///
/// Every row holds exactly one value per column; missing cells are `NaN`,
/// mirroring how Pandas reads blank CSV fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Dataset {
    /// An empty table with the given columns and no rows.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dataset {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Empty table with the fixed manual-entry features.
    pub fn empty_features() -> Self {
        Self::with_columns(FEATURE_NAMES)
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in insertion order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[idx])
    }

    /// Values of a column looked up by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<f64>> {
        self.column_index(name).map(|idx| self.column(idx).collect())
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[Vec<f64>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Add a column, or return the index of an existing one.
    /// A new column is filled with `NaN` for the rows already present.
    fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(f64::NAN);
        }
        self.columns.len() - 1
    }

    /// Append one row given as `(column, value)` pairs.
    ///
    /// Unknown columns are added (earlier rows get `NaN`); columns absent
    /// from the record are `NaN` in the new row.
    pub fn append_record<'a, I>(&mut self, record: I)
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let pairs: Vec<(&str, f64)> = record.into_iter().collect();
        let indices: Vec<usize> = pairs.iter().map(|(name, _)| self.ensure_column(name)).collect();

        let mut row = vec![f64::NAN; self.columns.len()];
        for (idx, (_, value)) in indices.into_iter().zip(pairs) {
            row[idx] = value;
        }
        self.rows.push(row);
    }

    /// Replace the values of `name`, appending the column when it is new.
    ///
    /// `values` must have one entry per row.
    pub fn set_column(&mut self, name: &str, values: &[f64]) {
        debug_assert_eq!(values.len(), self.rows.len());
        let idx = self.ensure_column(name);
        for (row, &v) in self.rows.iter_mut().zip(values) {
            row[idx] = v;
        }
    }

    /// Keep only the rows for which `keep` returns true.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[f64]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Rewrite every cell of column `idx` through `f`.
    pub fn map_column<F>(&mut self, idx: usize, mut f: F)
    where
        F: FnMut(f64) -> f64,
    {
        for row in &mut self.rows {
            row[idx] = f(row[idx]);
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows × {} columns", self.len(), self.width())
    }
}

/// Render a cell the way the tables show it.
pub fn format_cell(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.3}")
    }
}
