//! Data layer: core types, loading, and merging.
//!
//! Architecture:
//! ```text
//!  .parquet / .json / .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  named columns of Value
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  merge    │  row-wise concat on common columns
//!   └──────────┘
//! ```

pub mod loader;
pub mod merge;
pub mod model;
