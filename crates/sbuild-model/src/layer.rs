//! Soil layer records.

use serde::{Deserialize, Serialize};

use crate::value::parse_optional_number;

/// One depth horizon of a parsed soil profile, as shown in the edit grid.
///
/// Every field is a display string already passed through
/// [`sane`](crate::sane): `""` means the file carried no usable value. The
/// serde names match the keys the GUI grid historically consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    /// Layer bottom depth in cm (`SLB`).
    pub depth: String,
    /// Master horizon code (`SLMH`).
    #[serde(rename = "texture")]
    pub master_horizon: String,
    /// Clay percentage (`SLCL`).
    pub clay: String,
    /// Silt percentage (`SLSI`).
    pub silt: String,
    /// Coarse fraction / stones percentage (`SLCF`).
    pub stones: String,
    /// Organic carbon percentage (`SLOC`).
    #[serde(rename = "oc")]
    pub organic_carbon: String,
    /// pH in water (`SLHW`).
    pub ph: String,
    /// Cation exchange capacity (`SCEC`).
    pub cec: String,
    /// Total nitrogen percentage (`SLNI`).
    #[serde(rename = "tn")]
    pub total_nitrogen: String,

    /// Lower limit of plant-extractable water, θLL (`SLLL`).
    #[serde(rename = "lll")]
    pub lower_limit: String,
    /// Drained upper limit, θDUL (`SDUL`).
    #[serde(rename = "dul")]
    pub drained_upper_limit: String,
    /// Saturated water content, θSAT (`SSAT`).
    #[serde(rename = "sat")]
    pub saturated: String,
    /// Bulk density in g/cm³ (`SBDM`).
    #[serde(rename = "bd")]
    pub bulk_density: String,
    /// Saturated hydraulic conductivity in cm/h (`SSKS`).
    pub ksat: String,
    /// Root growth factor, 0–1 (`SRGF`).
    pub srgf: String,
}

impl SoilLayer {
    /// Depth as a number, if the file carried one.
    pub fn depth_value(&self) -> Option<f64> {
        parse_optional_number(&self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soil_layer_depth_value() {
        let layer = SoilLayer {
            depth: "31".to_string(),
            ..SoilLayer::default()
        };
        assert_eq!(layer.depth_value(), Some(31.0));

        let empty = SoilLayer::default();
        assert_eq!(empty.depth_value(), None);
    }

    #[test]
    fn test_soil_layer_serde_names() {
        let layer = SoilLayer {
            depth: "15".to_string(),
            organic_carbon: "0.97".to_string(),
            lower_limit: "0.175".to_string(),
            ..SoilLayer::default()
        };
        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["oc"], "0.97");
        assert_eq!(json["lll"], "0.175");
        assert_eq!(json["depth"], "15");
    }
}
