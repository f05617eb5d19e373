//! Feature engineering for GHI prediction
//!
//! This module turns raw meteorological/temporal inputs into the ordered
//! feature vector the frozen regression model expects.

use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

use crate::domain::RawInputs;

/// Period of the hour-of-day encoding.
const HOURS_PER_DAY: f64 = 24.0;
/// Period of the day-of-year encoding.
const DAYS_PER_YEAR: f64 = 365.0;

/// Dew point approximation offset: dew_point = temperature - 5.0 °C.
/// The model was trained against this heuristic; do not replace it with a
/// physical dew point formula.
pub const DEW_POINT_OFFSET_C: f64 = 5.0;

/// Placeholder for the wind direction sensor the tool does not collect (degrees).
pub const DEFAULT_WIND_DIRECTION_DEG: f64 = 180.0;
/// Placeholder for the snow depth sensor the tool does not collect (meters).
pub const DEFAULT_SNOW_DEPTH_M: f64 = 0.0;

/// Canonical features the assembler can produce.
///
/// The string forms match the column names the model was trained with, so the
/// externally supplied expected-name list resolves against these exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr)]
pub enum Feature {
    #[strum(serialize = "Temperature")]
    Temperature,
    #[strum(serialize = "Dew Point")]
    DewPoint,
    #[strum(serialize = "Relative Humidity")]
    RelativeHumidity,
    #[strum(serialize = "Pressure")]
    Pressure,
    #[strum(serialize = "Wind Speed")]
    WindSpeed,
    #[strum(serialize = "Wind Direction")]
    WindDirection,
    #[strum(serialize = "Snow Depth")]
    SnowDepth,
    #[strum(serialize = "Precipitable Water")]
    PrecipitableWater,
    #[strum(serialize = "Solar Zenith Angle")]
    SolarZenithAngle,
    #[strum(serialize = "dayofyear")]
    DayOfYear,
    #[strum(serialize = "hour_sin")]
    HourSin,
    #[strum(serialize = "hour_cos")]
    HourCos,
    #[strum(serialize = "doy_sin")]
    DoySin,
    #[strum(serialize = "doy_cos")]
    DoyCos,
}

/// Ordered feature vector, column order identical to the expected-name list
/// it was assembled against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: Vec<f64>,
    pub names: Vec<String>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Assembly failure: the expected-name list asked for features the canonical
/// set cannot provide. Terminal for the request; no partial prediction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("missing required features: {0:?}")]
    MissingFeatures(BTreeSet<String>),
}

/// Sine/cosine pair encoding a periodic quantity.
///
/// Raw hour/day integers would falsely place the wraparound boundary far
/// apart (hour 23 vs hour 0); the pair keeps those numerically close.
pub fn cyclical_encode(value: f64, period: f64) -> (f64, f64) {
    let angle = 2.0 * PI * value / period;
    (angle.sin(), angle.cos())
}

/// Features derived from the raw inputs, computed once per assembly.
struct DerivedFeatures {
    hour_sin: f64,
    hour_cos: f64,
    doy_sin: f64,
    doy_cos: f64,
    dew_point: f64,
}

impl DerivedFeatures {
    fn from_raw(raw: &RawInputs) -> Self {
        let (hour_sin, hour_cos) = cyclical_encode(f64::from(raw.hour), HOURS_PER_DAY);
        let (doy_sin, doy_cos) = cyclical_encode(f64::from(raw.dayofyear), DAYS_PER_YEAR);
        Self {
            hour_sin,
            hour_cos,
            doy_sin,
            doy_cos,
            dew_point: raw.temperature_c - DEW_POINT_OFFSET_C,
        }
    }
}

/// Value of one canonical feature.
fn feature_value(feature: Feature, raw: &RawInputs, derived: &DerivedFeatures) -> f64 {
    match feature {
        Feature::Temperature => raw.temperature_c,
        Feature::DewPoint => derived.dew_point,
        Feature::RelativeHumidity => raw.humidity_percent,
        Feature::Pressure => raw.pressure_hpa,
        Feature::WindSpeed => raw.wind_speed_ms,
        Feature::WindDirection => DEFAULT_WIND_DIRECTION_DEG,
        Feature::SnowDepth => DEFAULT_SNOW_DEPTH_M,
        Feature::PrecipitableWater => raw.precipitable_water_cm,
        Feature::SolarZenithAngle => raw.solar_zenith_deg,
        Feature::DayOfYear => f64::from(raw.dayofyear),
        Feature::HourSin => derived.hour_sin,
        Feature::HourCos => derived.hour_cos,
        Feature::DoySin => derived.doy_sin,
        Feature::DoyCos => derived.doy_cos,
    }
}

/// Assemble the ordered feature vector for the model.
///
/// Every name in `expected_feature_names` must resolve to a canonical
/// [`Feature`]; otherwise the full set of unresolvable names is returned and
/// no vector is produced. Canonical features the list does not ask for are
/// dropped. Pure function of its arguments.
pub fn assemble(
    raw: &RawInputs,
    expected_feature_names: &[String],
) -> Result<FeatureVector, AssemblyError> {
    let mut missing = BTreeSet::new();
    let mut resolved = Vec::with_capacity(expected_feature_names.len());

    for name in expected_feature_names {
        match Feature::from_str(name) {
            Ok(feature) => resolved.push(feature),
            Err(_) => {
                missing.insert(name.clone());
            }
        }
    }

    if !missing.is_empty() {
        return Err(AssemblyError::MissingFeatures(missing));
    }

    let derived = DerivedFeatures::from_raw(raw);
    let values = resolved
        .into_iter()
        .map(|feature| feature_value(feature, raw, &derived))
        .collect();

    Ok(FeatureVector {
        values,
        names: expected_feature_names.to_vec(),
    })
}

/// All canonical feature names, in the order the shipped model was trained with.
pub fn canonical_feature_names() -> Vec<String> {
    Feature::iter().map(|f| f.as_ref().to_string()).collect()
}
