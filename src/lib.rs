//! churnprep: Churn Feature Preparation Library
//!
//! Derives behavioral ratio features from a Spotify churn dataset, splits it
//! stratified by churn, and fits a column-wise preprocessing plan on the
//! training partition only.

pub mod cli;
pub mod config;
pub mod pipeline;
pub mod report;
pub mod utils;
