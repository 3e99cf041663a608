//! Writer-side input records.

use serde::{Deserialize, Serialize};

/// Description of a profile to be written to a `.SOL` file.
///
/// Carries only what the caller must supply; everything else about the
/// serialized block comes from writer-side defaults or overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    /// 10-character profile id. Validated before any I/O.
    pub profile_id: String,
    /// Site name; truncated to 10 characters on write.
    pub site: String,
    /// Country name; truncated to 10 characters on write.
    pub country: String,
    /// Site latitude in decimal degrees.
    pub lat: f64,
    /// Site longitude in decimal degrees.
    pub lon: f64,
    /// Depth layers, shallowest first.
    pub layers: Vec<LayerInput>,
}

/// Writer-side description of one layer.
///
/// Only `depth` is required; every unset field is completed with the `-99`
/// sentinel at serialization time. A record without a depth is dropped
/// during writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerInput {
    /// Layer bottom depth in cm (`SLB`). Required for the layer to be written.
    pub depth: Option<f64>,
    /// Master horizon code (`SLMH`).
    pub master_horizon: Option<String>,
    /// Lower limit θLL (`SLLL`).
    pub lower_limit: Option<f64>,
    /// Drained upper limit θDUL (`SDUL`).
    pub drained_upper_limit: Option<f64>,
    /// Saturated water content θSAT (`SSAT`).
    pub saturated: Option<f64>,
    /// Root growth factor (`SRGF`).
    pub root_growth: Option<f64>,
    /// Saturated hydraulic conductivity (`SSKS`).
    pub ksat: Option<f64>,
    /// Bulk density (`SBDM`).
    pub bulk_density: Option<f64>,
    /// Organic carbon (`SLOC`).
    pub organic_carbon: Option<f64>,
    /// Clay percentage (`SLCL`).
    pub clay: Option<f64>,
    /// Silt percentage (`SLSI`).
    pub silt: Option<f64>,
    /// Stones percentage (`SLCF`).
    pub stones: Option<f64>,
    /// Total nitrogen (`SLNI`).
    pub total_nitrogen: Option<f64>,
    /// pH in water (`SLHW`).
    pub ph: Option<f64>,
    /// pH in buffer (`SLHB`).
    pub ph_buffer: Option<f64>,
    /// Cation exchange capacity (`SCEC`).
    pub cec: Option<f64>,
    /// Anion adsorption coefficient (`SADC`).
    pub adsorption_coefficient: Option<f64>,
}

impl LayerInput {
    /// Creates a layer record with only its depth set.
    pub fn new(depth: f64) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }

    /// Sets the master horizon code.
    #[must_use]
    pub fn with_master_horizon(mut self, horizon: impl Into<String>) -> Self {
        self.master_horizon = Some(horizon.into());
        self
    }

    /// Sets the hydraulic water-retention triple θLL / θDUL / θSAT.
    #[must_use]
    pub fn with_water_retention(mut self, lll: f64, dul: f64, sat: f64) -> Self {
        self.lower_limit = Some(lll);
        self.drained_upper_limit = Some(dul);
        self.saturated = Some(sat);
        self
    }

    /// Sets clay and silt percentages.
    #[must_use]
    pub fn with_texture_fractions(mut self, clay: f64, silt: f64) -> Self {
        self.clay = Some(clay);
        self.silt = Some(silt);
        self
    }
}
