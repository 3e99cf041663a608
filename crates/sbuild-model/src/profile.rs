//! Soil profile records.

use serde::{Deserialize, Serialize};

use crate::layer::SoilLayer;

/// One named soil record inside a `.SOL` file, normalized for display.
///
/// The `code` is the 10-character profile id that keys the record inside its
/// file. Scalar header fields are display strings (already through
/// [`sane`](crate::sane)); layers are ordered by increasing depth as they
/// appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    /// 10-character profile id, uppercase, unique within its file.
    pub code: String,
    /// Country name.
    pub country: String,
    /// Site name.
    pub site_name: String,
    /// Two-letter institute code, derived from the profile id.
    pub institute_code: String,
    /// Latitude from the `@SITE` line (may be empty).
    pub latitude: String,
    /// Longitude from the `@SITE` line (may be empty).
    pub longitude: String,
    /// Soil data source.
    pub soil_data_source: String,
    /// Soil series name.
    pub soil_series_name: String,
    /// Soil classification family string.
    pub soil_classification: String,
    /// Two-letter soil color code; `BN` when the file carries none.
    pub color_code: String,
    /// Surface albedo (`SALB`).
    pub albedo: String,
    /// Drainage rate (`SLDR`).
    pub drainage_rate: String,
    /// SCS runoff curve number (`SLRO`).
    pub runoff_curve: String,
    /// Fertility factor (`SLPF`).
    pub fertility_factor: String,
    /// Depth layers, shallowest first.
    pub layers: Vec<SoilLayer>,
}

impl SoilProfile {
    /// Bottom depth of the deepest layer, if any layer carries one.
    pub fn max_depth(&self) -> Option<f64> {
        self.layers
            .iter()
            .filter_map(SoilLayer::depth_value)
            .fold(None, |deepest, depth| {
                Some(deepest.map_or(depth, |d: f64| d.max(depth)))
            })
    }
}
