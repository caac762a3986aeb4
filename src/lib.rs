//! Technical indicator computation engine for the charting dashboard.
//!
//! The crate turns a raw price series into derived signal series that chart
//! views overlay: a static indicator catalog, a per-view instance manager,
//! pure computation functions for each indicator kind, and an output adapter
//! that packages results for the rendering layer.

pub mod catalog;
pub mod config;
pub mod indicators;
pub mod instances;
pub mod logging;
pub mod models;
pub mod render;
pub mod view;
