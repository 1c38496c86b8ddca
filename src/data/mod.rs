/// Data layer: records, loading, filtering and view derivation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, append backfill rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (country, year) → range rows / exact row
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  views    │  line / bar / pie data + summary sentences
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod views;
