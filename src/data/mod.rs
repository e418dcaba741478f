/// Data layer: core types, loading, filtering and trend queries.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → NameDataset (ranks filled in if absent)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ NameDataset  │  Vec<NameRecord>, year span, initials
///   └─────────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │  filter   │ top-N    │  trend    │ per-name year series
///   └──────────┘          └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod trend;
