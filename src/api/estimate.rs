//! Harvestable energy estimate endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;
use validator::Validate;

use crate::{
    api::{error::ApiError, AppState},
    domain::{HarvestableEnergy, RawInputs, ASSUMPTIONS},
};

/// Unit of both the GHI prediction and the derived energy figure.
const UNIT: &str = "Wh/m² per hour";

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    /// Clamped GHI prediction.
    pub ghi_wh_m2: f64,
    /// Harvestable energy after the 16% efficiency conversion.
    pub harvestable_energy_wh_m2: f64,
    /// Two-decimal display form of the energy figure.
    pub display: String,
    pub unit: &'static str,
    pub assumptions: &'static str,
}

impl From<HarvestableEnergy> for EstimateResponse {
    fn from(energy: HarvestableEnergy) -> Self {
        Self {
            ghi_wh_m2: energy.ghi_wh_m2,
            harvestable_energy_wh_m2: energy.energy_wh_m2,
            display: energy.display(),
            unit: UNIT,
            assumptions: ASSUMPTIONS,
        }
    }
}

/// Run one estimate. Any body field left out takes its form default.
pub async fn estimate_energy(
    State(st): State<AppState>,
    Json(inputs): Json<RawInputs>,
) -> Result<Json<EstimateResponse>, ApiError> {
    inputs.validate()?;

    let energy = st.predictor.estimate(&inputs)?;
    debug!(
        ghi = energy.ghi_wh_m2,
        energy = energy.energy_wh_m2,
        "estimate computed"
    );

    Ok(Json(energy.into()))
}
