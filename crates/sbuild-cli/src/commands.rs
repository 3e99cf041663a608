//! Command implementations: thin wrappers over the core crates.

use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use sbuild_hydro::{cn_from_slope, estimate_missing, slope_from_cn};
use sbuild_model::NewProfile;
use sbuild_sol::{
    HeaderOverrides, append_profile, build_soil_file, delete_soil_profile,
    find_profile_references, read_profile, show_profiles, update_soil_file,
};

use crate::cli::{AppendArgs, CreateArgs};

pub fn run_profiles(file: &Path) -> Result<()> {
    let entries = show_profiles(file)?;
    if entries.is_empty() {
        println!("no profiles in {}", file.display());
        return Ok(());
    }

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec!["Code", "Site", "Layers", "Depth (cm)"]);
    for entry in &entries {
        let profile = read_profile(file, &entry.code)?;
        let depth = profile
            .max_depth()
            .map_or_else(String::new, |d| format!("{d:.0}"));
        table.add_row(vec![
            entry.code.clone(),
            profile.site_name,
            profile.layers.len().to_string(),
            depth,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_show(file: &Path, code: &str) -> Result<()> {
    let profile = read_profile(file, code)?;
    let json = serde_json::to_string_pretty(&profile).context("serialize profile")?;
    println!("{json}");
    Ok(())
}

pub fn run_create(args: &CreateArgs) -> Result<()> {
    let profile = load_profile_json(&args.profile)?;
    let overrides = overrides_from(args.source.as_deref(), args.series.as_deref());
    build_soil_file(&profile, &args.dest, &overrides)?;
    println!(
        "wrote profile {} to {}",
        profile.profile_id,
        args.dest.display()
    );
    Ok(())
}

pub fn run_append(args: &AppendArgs) -> Result<()> {
    let profile = load_profile_json(&args.profile)?;
    let overrides = overrides_from(args.source.as_deref(), args.series.as_deref());
    append_profile(&args.file, &profile, &overrides)?;
    println!(
        "appended profile {} to {}",
        profile.profile_id,
        args.file.display()
    );
    Ok(())
}

pub fn run_update(file: &Path, code: &str, fields: &[String]) -> Result<()> {
    let updates = fields
        .iter()
        .map(|field| parse_assignment(field))
        .collect::<Result<Vec<_>>>()?;
    update_soil_file(file, code, &updates)?;
    println!("updated profile {code} in {}", file.display());
    Ok(())
}

pub fn run_delete(file: &Path, code: &str) -> Result<()> {
    delete_soil_profile(file, code)?;
    if file.exists() {
        println!("deleted profile {code} from {}", file.display());
    } else {
        println!(
            "deleted profile {code}; {} removed (no profiles left)",
            file.display()
        );
    }
    Ok(())
}

pub fn run_estimate(file: &Path, code: &str) -> Result<()> {
    let profile = read_profile(file, code)?;
    if profile.layers.is_empty() {
        println!("profile {code} has no layers");
        return Ok(());
    }

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        "Depth", "LLL", "DUL", "SAT", "BD", "Ksat", "SRGF",
    ]);
    for layer in &profile.layers {
        let filled = estimate_missing(layer);
        table.add_row(vec![
            filled.depth,
            filled.lower_limit,
            filled.drained_upper_limit,
            filled.saturated,
            filled.bulk_density,
            filled.ksat,
            filled.srgf,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_slope(group: &str, cn: &str) -> Result<()> {
    match slope_from_cn(group, cn) {
        Some(bucket) => {
            // The stored sentinel 12 stands for the 15 % display bucket
            let percent = if bucket == 12 { 15 } else { bucket };
            println!("{percent} %");
            Ok(())
        }
        None => bail!("unknown hydrologic group '{group}' or non-numeric curve number '{cn}'"),
    }
}

pub fn run_cn(group: &str, slope: &str) -> Result<()> {
    match cn_from_slope(group, slope) {
        Some(cn) => {
            println!("{cn}");
            Ok(())
        }
        None => bail!("unknown hydrologic group '{group}' or non-numeric slope '{slope}'"),
    }
}

pub fn run_locate(root: &Path, code: &str) -> Result<()> {
    let hits = find_profile_references(root, code)?;
    if hits.is_empty() {
        println!("no experiment files reference {code}");
        return Ok(());
    }
    for path in hits {
        println!("{}", path.display());
    }
    Ok(())
}

fn load_profile_json(path: &Path) -> Result<NewProfile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read profile description {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parse profile description {}", path.display()))
}

fn overrides_from(source: Option<&str>, series: Option<&str>) -> HeaderOverrides {
    let mut overrides = HeaderOverrides::default();
    if let Some(source) = source {
        overrides.soil_data_source = source.to_string();
    }
    if let Some(series) = series {
        overrides.soil_series_name = series.to_string();
    }
    overrides
}

/// Parses one `KEY=VALUE` field assignment.
fn parse_assignment(field: &str) -> Result<(String, String)> {
    match field.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("invalid field assignment '{field}' (expected KEY=VALUE)"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
