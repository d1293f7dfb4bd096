/// Data layer: the feature table, loading, preprocessing, and summaries.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet      manual entry
///        │                                  │
///        ▼                                  │
///   ┌──────────┐                            │
///   │  loader   │  parse file → Dataset      │
///   └──────────┘                            │
///        │                                  │
///        ▼                                  ▼
///   ┌──────────────────────────────────────────┐
///   │ Dataset   named f64 columns, NaN = blank  │
///   └──────────────────────────────────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ preprocess │  min-max normalize, then drop zero rows
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  label counts, histogram, flagged count
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod preprocess;
pub mod stats;
