//! Block-level `.SOL` mutations: append, update, delete.
//!
//! All three follow the same discipline: validate before touching disk,
//! assemble the complete new file content in memory, then write the target
//! once. Blocks that are not being modified are spliced back verbatim, so a
//! rewrite never disturbs sibling profiles byte-for-byte.

use std::path::Path;

use sbuild_model::{NewProfile, SoilLayer, SoilProfile, sane};

use crate::catalog::read_sol_lines;
use crate::error::{Result, SolError};
use crate::parse::parse_profile_block;
use crate::scan;
use crate::writer::{HeaderOverrides, ProfileSpec};

/// Appends a new profile block to an existing `.SOL` file.
///
/// The rendered block is separated from the existing content by one blank
/// line; the prologue and every existing block stay byte-identical.
pub fn append_profile(
    path: &Path,
    profile: &NewProfile,
    overrides: &HeaderOverrides,
) -> Result<()> {
    let block = ProfileSpec::from_new(profile, overrides).render_block()?;

    if !path.exists() {
        return Err(SolError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut content = std::fs::read_to_string(path).map_err(|source| SolError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push('\n');
    content.push_str(&block);
    content.push('\n');

    write_file(path, &content)?;
    tracing::info!(
        code = %profile.profile_id,
        path = %path.display(),
        "appended soil profile"
    );
    Ok(())
}

/// Applies field updates to one profile and rewrites the file around it.
///
/// Each key addresses either a scalar header field or a layer column (both
/// DSSAT tags like `salb`/`slll` and display names like `albedo` work); a
/// layer key is applied to every layer. Keys matching neither are ignored
/// with a warning. Every other block in the file is reproduced verbatim.
pub fn update_soil_file(path: &Path, code: &str, updates: &[(String, String)]) -> Result<()> {
    let lines = read_sol_lines(path)?;
    let bounds = scan::profile_bounds(&lines);
    let target = bounds
        .iter()
        .find(|bounds| bounds.code == code)
        .ok_or_else(|| SolError::ProfileNotFound {
            code: code.to_string(),
            path: path.to_path_buf(),
        })?;

    let (mut profile, record) = parse_profile_block(code, &lines[target.start..target.end]);
    for (key, value) in updates {
        if apply_scalar_update(&mut profile, key, value) {
            continue;
        }
        if !apply_layer_update(&mut profile.layers, key, value) {
            tracing::warn!(key = %key, code, "field does not exist on the soil profile; ignored");
        }
    }

    let block = ProfileSpec::from_parsed(&profile, &record).render_block()?;

    let mut output: Vec<&str> = lines[..scan::prologue_len(&lines)]
        .iter()
        .map(String::as_str)
        .collect();
    for entry in &bounds {
        if entry.code == code {
            output.extend(block.lines());
            output.push("");
        } else {
            output.extend(lines[entry.start..entry.end].iter().map(String::as_str));
        }
    }

    write_file(path, &(output.join("\n") + "\n"))?;
    tracing::info!(code, path = %path.display(), fields = updates.len(), "updated soil profile");
    Ok(())
}

/// Removes one profile's block from a `.SOL` file.
///
/// Deletes exactly the line range from the profile's marker to the next
/// marker (or end of file). When no profile remains afterwards the file
/// itself is removed from disk.
pub fn delete_soil_profile(path: &Path, code: &str) -> Result<()> {
    let lines = read_sol_lines(path)?;
    let bounds = scan::profile_bounds(&lines);
    let target = bounds
        .iter()
        .find(|bounds| bounds.code == code)
        .ok_or_else(|| SolError::ProfileNotFound {
            code: code.to_string(),
            path: path.to_path_buf(),
        })?;

    let mut remaining: Vec<&str> = lines[..target.start].iter().map(String::as_str).collect();
    remaining.extend(lines[target.end..].iter().map(String::as_str));

    let still_has_profiles = remaining
        .iter()
        .any(|line| scan::is_profile_marker(line) && scan::marker_code(line).is_some());
    if still_has_profiles {
        write_file(path, &(remaining.join("\n") + "\n"))?;
        tracing::info!(code, path = %path.display(), "deleted soil profile");
    } else {
        std::fs::remove_file(path).map_err(|source| SolError::FileRemove {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(code, path = %path.display(), "deleted last profile; removed file");
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| SolError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_scalar_update(profile: &mut SoilProfile, key: &str, value: &str) -> bool {
    let normalized = sane(value);
    let field = match key.to_ascii_lowercase().as_str() {
        "country" => &mut profile.country,
        "site" | "site_name" => &mut profile.site_name,
        "lat" | "latitude" => &mut profile.latitude,
        "long" | "lon" | "longitude" => &mut profile.longitude,
        "soil_data_source" => &mut profile.soil_data_source,
        "soil_series_name" => &mut profile.soil_series_name,
        "scs_family" | "soil_classification" => &mut profile.soil_classification,
        "scom" | "color_code" => &mut profile.color_code,
        "salb" | "albedo" => &mut profile.albedo,
        "sldr" | "drainage_rate" => &mut profile.drainage_rate,
        "slro" | "runoff_curve" => &mut profile.runoff_curve,
        "slpf" | "fertility_factor" => &mut profile.fertility_factor,
        _ => return false,
    };
    *field = normalized;
    true
}

fn apply_layer_update(layers: &mut [SoilLayer], key: &str, value: &str) -> bool {
    let normalized = sane(value);
    let select: fn(&mut SoilLayer) -> &mut String = match key.to_ascii_lowercase().as_str() {
        "slb" | "depth" => |layer| &mut layer.depth,
        "slmh" | "texture" | "master_horizon" => |layer| &mut layer.master_horizon,
        "slcl" | "clay" => |layer| &mut layer.clay,
        "slsi" | "silt" => |layer| &mut layer.silt,
        "slcf" | "stones" => |layer| &mut layer.stones,
        "sloc" | "oc" | "organic_carbon" => |layer| &mut layer.organic_carbon,
        "slhw" | "ph" => |layer| &mut layer.ph,
        "scec" | "cec" => |layer| &mut layer.cec,
        "slni" | "tn" | "total_nitrogen" => |layer| &mut layer.total_nitrogen,
        "slll" | "lll" | "lower_limit" => |layer| &mut layer.lower_limit,
        "sdul" | "dul" | "drained_upper_limit" => |layer| &mut layer.drained_upper_limit,
        "ssat" | "sat" | "saturated" => |layer| &mut layer.saturated,
        "sbdm" | "bd" | "bulk_density" => |layer| &mut layer.bulk_density,
        "ssks" | "ksat" => |layer| &mut layer.ksat,
        "srgf" => |layer| &mut layer.srgf,
        _ => return false,
    };
    let mut applied = false;
    for layer in layers {
        *select(layer) = normalized.clone();
        applied = true;
    }
    applied
}
