//! Pedotransfer estimation of missing hydraulic layer values.
//!
//! Fills the hydraulic columns of a layer from the texture data that is
//! present, using the simple pedotransfer rules the Calculate/Edit grid
//! applies. Values the layer already carries are never overwritten; each
//! rule only runs when its inputs are known, so a sparse layer fills as far
//! as the data allows and no further.

use sbuild_model::{SoilLayer, is_missing_number, parse_optional_number};

fn known(value: &str) -> Option<f64> {
    parse_optional_number(value).filter(|v| !is_missing_number(*v))
}

/// Returns a copy of `layer` with estimable hydraulic values filled in.
///
/// Fill order matters: θLL derives from clay, θDUL from θLL, θSAT from
/// θDUL, bulk density from θSAT, Ksat from clay and θSAT, and the root
/// growth factor tapers linearly with depth down to 200 cm.
pub fn estimate_missing(layer: &SoilLayer) -> SoilLayer {
    let mut filled = layer.clone();

    let depth = known(&layer.depth);
    let clay = known(&layer.clay);

    let mut lll = known(&layer.lower_limit);
    if lll.is_none()
        && let Some(clay) = clay
    {
        let estimate = (0.1 + 0.003 * clay).max(0.0);
        filled.lower_limit = format!("{estimate:.3}");
        lll = Some(estimate);
    }

    let mut dul = known(&layer.drained_upper_limit);
    if dul.is_none()
        && let Some(lll) = lll
    {
        let estimate = lll + 0.08;
        filled.drained_upper_limit = format!("{estimate:.3}");
        dul = Some(estimate);
    }

    let mut sat = known(&layer.saturated);
    if sat.is_none()
        && let Some(dul) = dul
    {
        let estimate = dul + 0.10;
        filled.saturated = format!("{estimate:.3}");
        sat = Some(estimate);
    }

    if known(&layer.bulk_density).is_none()
        && let Some(sat) = sat
    {
        let estimate = (1.0 - sat) * 2.65;
        filled.bulk_density = format!("{estimate:.2}");
    }

    if known(&layer.ksat).is_none()
        && let (Some(clay), Some(_)) = (clay, sat)
    {
        let estimate = 10f64.powf(-0.6 + 1.3 * (1.0 - clay / 100.0));
        filled.ksat = format!("{estimate:.2}");
    }

    if known(&layer.srgf).is_none()
        && let Some(depth) = depth
    {
        let estimate = (1.0 - depth / 200.0).max(0.0);
        filled.srgf = format!("{estimate:.3}");
    }

    filled
}
