/// Data layer: core types, loading, and the chart queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site / category index
///   └───────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  (site, payload range) → pie data, scatter rows
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
