/// Data layer: ride records, loading, range filtering and rollups.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (sorted by timestamp)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive [start, end] → new Dataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  records → DashboardViews   (category: Mon…Sun, Jan…Dec)
///   └───────────┘
/// ```

pub mod aggregate;
pub mod category;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
