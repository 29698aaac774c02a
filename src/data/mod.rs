/// Data layer: core types, loading, label correction and run ordering.
///
/// Architecture:
/// ```text
///       .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → BeamDataset (bad cells → NaN)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  labels   │  exact-match typo corrections on group labels
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ BeamDataset  │  Vec<Sample> → groups → runs
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ ordering  │  priority list → runs for the ordered chart pass
///   └──────────┘
/// ```

pub mod labels;
pub mod loader;
pub mod model;
pub mod ordering;
