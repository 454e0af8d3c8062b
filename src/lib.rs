//! Helpers for preparing academic papers: summary statistics over tabular
//! experiment results, LaTeX `table*` rendering, and consistently styled
//! time-series plots.
//!
//! Every operation is a synchronous, stateless transformation: datasets go
//! in, a statistics record, a LaTeX string, or styled plot lines come out.
//!
//! * [`data`]  – the [`Dataset`] / [`Value`] model, file loading, merging
//! * [`stats`] – per-column and cross-dataset statistics
//! * [`latex`] – LaTeX table rendering with escaping and scientific notation
//! * [`plot`]  – time-series styling for the egui_plot backend
//! * [`color`] – the color-blind friendly house palette
//! * [`fonts`] – filesystem font registration at startup

pub mod color;
pub mod data;
pub mod error;
pub mod fonts;
pub mod latex;
pub mod plot;
pub mod stats;

pub use data::model::{Dataset, Value};
pub use error::Error;
pub use latex::{render_table_from_dataset, render_table_from_rows, Cell, TableSpec};
pub use stats::{
    calculate_stats, calculate_stats_across, column_stats, merge_and_calculate_stats, Stats,
};
