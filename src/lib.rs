//! Potential harvestable solar energy predictor
//!
//! Assembles an ordered feature vector from meteorological and temporal
//! inputs, feeds it to a frozen GHI regression model, and converts the
//! clamped prediction to harvestable energy with a fixed PV efficiency.

pub mod api;
pub mod config;
pub mod domain;
pub mod features;
pub mod model;
pub mod predictor;
pub mod telemetry;
