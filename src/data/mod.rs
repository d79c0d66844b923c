/// Data layer: records, loading, aggregation and the cross-filter state.
///
/// Architecture:
/// ```text
///  ds_salaries.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawRow → Record (model)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  proportions, top titles, linked points, bins
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState / HighlightState → included(point)
///   └──────────┘
/// ```

pub mod aggregate;
pub mod bins;
pub mod filter;
pub mod loader;
pub mod model;
