//! Hydrology reference tables for soil profile editing.
//!
//! Covers the % slope ↔ runoff curve number (CN₂) conversion DSSAT's SBuild
//! performs internally, plus the pedotransfer pass that estimates missing
//! hydraulic layer values. The CN table is keyed by hydrologic group and
//! column-ordered over the standard slope buckets 1 % | 3 % | 8 % | 15 %.
//!
//! [`slope_from_cn`] always returns one of the stored slope sentinels
//! without interpolation; [`cn_from_slope`] returns the curve number at the
//! top of the column the slope falls in, the value SBuild would save for
//! that slope choice.

mod pedotransfer;

pub use pedotransfer::estimate_missing;

use sbuild_model::parse_optional_number;

/// CN₂ upper limits per hydrologic group, one column per slope bucket.
pub const HYDRO_TABLE: [(&str, [i32; 4]); 4] = [
    ("Lowest", [61, 73, 81, 84]),          // Group A
    ("Moderately Low", [64, 76, 84, 87]),  // Group B
    ("Moderately High", [68, 80, 88, 91]), // Group C
    ("Highest", [71, 83, 91, 94]),         // Group D
];

/// Slope sentinels as SBuild stores them, highest bucket first; the UI
/// displays `12` as the 15 % bucket.
pub const SLOPE_VALUES: [i32; 4] = [12, 8, 3, 1];

fn group_limits(group: &str) -> Option<&'static [i32; 4]> {
    HYDRO_TABLE
        .iter()
        .find(|(name, _)| *name == group)
        .map(|(_, limits)| limits)
}

/// Converts a CN₂ value into a slope sentinel for the given hydrologic
/// group.
///
/// Scans the group's limits in ascending order and answers the sentinel for
/// the first column whose limit is ≥ `cn`. A `cn` above every limit falls
/// back to the last stored sentinel. Returns `None` for an unknown group or
/// a `cn` that is not a number.
pub fn slope_from_cn(group: &str, cn: &str) -> Option<i32> {
    let limits = group_limits(group)?;
    let cn = parse_optional_number(cn)?;
    for (column, limit) in limits.iter().enumerate() {
        if cn <= f64::from(*limit) {
            return Some(SLOPE_VALUES[SLOPE_VALUES.len() - 1 - column]);
        }
    }
    Some(SLOPE_VALUES[SLOPE_VALUES.len() - 1])
}

/// Converts a % slope into the curve number SBuild would store for the
/// given hydrologic group.
///
/// Buckets the slope (≤2 %, ≤5 %, ≤10 %, above) and answers that column's
/// CN₂ limit. Returns `None` for an unknown group or a slope that is not a
/// number.
pub fn cn_from_slope(group: &str, slope_pct: &str) -> Option<i32> {
    let limits = group_limits(group)?;
    let slope = parse_optional_number(slope_pct)?;
    let column = if slope <= 2.0 {
        0
    } else if slope <= 5.0 {
        1
    } else if slope <= 10.0 {
        2
    } else {
        3
    };
    Some(limits[column])
}
