//! Filtering, ranking and aggregation behind the GFGP assessment dashboard.
//!
//! The dataset is loaded once into a [`store::DatasetStore`]; every selector
//! change recomputes its views from it through the pure functions in
//! [`filter`], [`ranking`], [`aggregation`] and [`detail`], composed in
//! [`dashboard`].
pub mod aggregation;
pub mod columns;
pub mod config;
pub mod dashboard;
pub mod detail;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod ranking;
pub mod store;
pub mod types;
pub mod util;
