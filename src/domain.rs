//! Domain types for the prediction pipeline

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Assumed photovoltaic conversion efficiency (16%). Fixed configuration
/// value, not derived from inputs.
pub const PV_EFFICIENCY: f64 = 0.16;

/// Caption shipped alongside every estimate.
pub const ASSUMPTIONS: &str = "Assumptions: 1-hour duration, 16% PV system efficiency, \
     dew point estimated from temperature.";

fn default_hour() -> u32 {
    12
}
fn default_dayofyear() -> u32 {
    180
}
fn default_temperature() -> f64 {
    20.0
}
fn default_humidity() -> f64 {
    50.0
}
fn default_pressure() -> f64 {
    1013.0
}
fn default_wind_speed() -> f64 {
    2.0
}
fn default_precipitable_water() -> f64 {
    1.5
}
fn default_solar_zenith() -> f64 {
    45.0
}

/// Raw inputs for one estimate. Captured fresh per request, immutable once
/// built, never persisted.
///
/// Range enforcement belongs to the input-collection boundary (the API
/// handler validates before the pipeline runs); the assembler itself accepts
/// whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RawInputs {
    /// Hour of day (0-23)
    #[serde(default = "default_hour")]
    #[validate(range(min = 0, max = 23))]
    pub hour: u32,
    /// Day of year (1-365)
    #[serde(default = "default_dayofyear")]
    #[validate(range(min = 1, max = 365))]
    pub dayofyear: u32,
    /// Air temperature (°C)
    #[serde(default = "default_temperature")]
    #[validate(range(min = -30.0, max = 50.0))]
    pub temperature_c: f64,
    /// Relative humidity (%)
    #[serde(default = "default_humidity")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity_percent: f64,
    /// Station pressure (hPa)
    #[serde(default = "default_pressure")]
    #[validate(range(min = 800.0, max = 1100.0))]
    pub pressure_hpa: f64,
    /// Wind speed (m/s)
    #[serde(default = "default_wind_speed")]
    #[validate(range(min = 0.0, max = 20.0))]
    pub wind_speed_ms: f64,
    /// Precipitable water (cm)
    #[serde(default = "default_precipitable_water")]
    #[validate(range(min = 0.0, max = 10.0))]
    pub precipitable_water_cm: f64,
    /// Solar zenith angle (degrees)
    #[serde(default = "default_solar_zenith")]
    #[validate(range(min = 0.0, max = 180.0))]
    pub solar_zenith_deg: f64,
}

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            hour: default_hour(),
            dayofyear: default_dayofyear(),
            temperature_c: default_temperature(),
            humidity_percent: default_humidity(),
            pressure_hpa: default_pressure(),
            wind_speed_ms: default_wind_speed(),
            precipitable_water_cm: default_precipitable_water(),
            solar_zenith_deg: default_solar_zenith(),
        }
    }
}

impl RawInputs {
    /// Build inputs with hour and day-of-year taken from a timestamp.
    ///
    /// Day 366 of a leap year is folded onto 365, the encoding period.
    pub fn at(timestamp: DateTime<Utc>, meteorology: Meteorology) -> Self {
        Self {
            hour: timestamp.hour(),
            dayofyear: timestamp.ordinal().min(365),
            temperature_c: meteorology.temperature_c,
            humidity_percent: meteorology.humidity_percent,
            pressure_hpa: meteorology.pressure_hpa,
            wind_speed_ms: meteorology.wind_speed_ms,
            precipitable_water_cm: meteorology.precipitable_water_cm,
            solar_zenith_deg: meteorology.solar_zenith_deg,
        }
    }
}

/// The six meteorological scalars collected from the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Meteorology {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub pressure_hpa: f64,
    pub wind_speed_ms: f64,
    pub precipitable_water_cm: f64,
    pub solar_zenith_deg: f64,
}

impl Default for Meteorology {
    fn default() -> Self {
        Self {
            temperature_c: default_temperature(),
            humidity_percent: default_humidity(),
            pressure_hpa: default_pressure(),
            wind_speed_ms: default_wind_speed(),
            precipitable_water_cm: default_precipitable_water(),
            solar_zenith_deg: default_solar_zenith(),
        }
    }
}

/// Result of one prediction cycle: the clamped GHI prediction and the
/// harvestable-energy figure derived from it. Both Wh/m² per hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarvestableEnergy {
    /// Clamped model prediction (never negative).
    pub ghi_wh_m2: f64,
    /// GHI scaled by the fixed PV efficiency.
    pub energy_wh_m2: f64,
}

impl HarvestableEnergy {
    /// Derive harvestable energy from a clamped GHI prediction.
    pub fn from_ghi(ghi_wh_m2: f64) -> Self {
        Self {
            ghi_wh_m2,
            energy_wh_m2: ghi_wh_m2 * PV_EFFICIENCY,
        }
    }

    /// Two-decimal display string, e.g. "16.00".
    pub fn display(&self) -> String {
        format!("{:.2}", self.energy_wh_m2)
    }
}
