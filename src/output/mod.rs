//! Report rendering

pub mod report;

pub use report::{render_batch_summary, ScreeningReport};
