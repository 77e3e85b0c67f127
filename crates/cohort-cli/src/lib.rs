//! CLI library components for the cohort survey pipeline.

pub mod logging;
pub mod pipeline;
