//! Fixed-column `.SOL` serialization.
//!
//! Renders one profile into the exact block layout DSSAT's soil reader
//! expects: marker line, `@SITE` pair, surface properties pair, then the
//! layer table in canonical column order. Every absent value is written as
//! the literal `-99` sentinel; columns are 6 wide, right aligned, with the
//! conventional per-column decimal counts.

use std::path::Path;

use sbuild_model::{
    LayerInput, MISSING_TOKEN, NewProfile, SoilProfile, is_missing_number, parse_optional_number,
};

use crate::error::{Result, SolError};
use crate::record::{SectionRecord, TAG_TEXTURE};

/// File-level banner written at the top of every new `.SOL` file. Together
/// with the blank line after it, this is the 2-line header that block-level
/// splices strip off.
pub const SOL_FILE_HEADER: &str = "*SOILS: General DSSAT Soil Input File";

/// Column header of the layer table, canonical DSSAT order.
const LAYER_TABLE_HEADER: &str = "@  SLB  SLMH  SLLL  SDUL  SSAT  SRGF  SSKS  SBDM  SLOC  SLCL  SLSI  SLCF  SLNI  SLHW  SLHB  SCEC  SADC";

/// Column header of the surface properties table.
const PROPERTIES_HEADER: &str = "@ SCOM  SALB  SLU1  SLDR  SLRO  SLNF  SLPF  SMHB  SMPX  SMKE";

/// Column header of the site table.
const SITE_HEADER: &str = "@SITE        COUNTRY          LAT     LONG SCS FAMILY";

/// Header values a caller may override when creating a profile.
///
/// Defaults are SBuild's: a generic surface description and `IB001`
/// analysis method codes.
#[derive(Debug, Clone)]
pub struct HeaderOverrides {
    /// Surface albedo (`SALB`).
    pub albedo: f64,
    /// Stage-1 evaporation limit in mm (`SLU1`).
    pub evaporation_limit: f64,
    /// Whole-profile drainage rate (`SLDR`).
    pub drainage_rate: f64,
    /// SCS runoff curve number (`SLRO`).
    pub runoff_curve: f64,
    /// Mineralization factor (`SLNF`).
    pub mineralization_factor: f64,
    /// Photosynthesis/fertility factor (`SLPF`).
    pub fertility_factor: f64,
    /// pH determination method code (`SMHB`).
    pub ph_method: String,
    /// Phosphorus determination method code (`SMPX`).
    pub phosphorus_method: String,
    /// Potassium determination method code (`SMKE`).
    pub potassium_method: String,
    /// Soil data source on the marker line.
    pub soil_data_source: String,
    /// Soil series name on the marker line.
    pub soil_series_name: String,
    /// Classification family string on the `@SITE` line.
    pub soil_classification: String,
    /// Texture class on the marker line.
    pub texture_class: String,
    /// Surface color code (`SCOM`).
    pub color_code: String,
}

impl Default for HeaderOverrides {
    fn default() -> Self {
        Self {
            albedo: 0.13,
            evaporation_limit: 6.0,
            drainage_rate: 0.6,
            runoff_curve: 61.0,
            mineralization_factor: 1.0,
            fertility_factor: 1.0,
            ph_method: "IB001".to_string(),
            phosphorus_method: "IB001".to_string(),
            potassium_method: "IB001".to_string(),
            soil_data_source: MISSING_TOKEN.to_string(),
            soil_series_name: MISSING_TOKEN.to_string(),
            soil_classification: "FINE, HYPHERTERMIC, VERTIC USTOCHREPTS".to_string(),
            texture_class: "SCL".to_string(),
            color_code: "BN".to_string(),
        }
    }
}

/// Creates a `.SOL` file at `dest` holding the single given profile.
///
/// The profile id is validated (exactly 10 characters) before any I/O;
/// unset layer fields are completed with `-99`; `site`/`country` are
/// truncated to 10 characters. Parent directories are created as needed.
pub fn build_soil_file(
    profile: &NewProfile,
    dest: &Path,
    overrides: &HeaderOverrides,
) -> Result<()> {
    let spec = ProfileSpec::from_new(profile, overrides);
    let block = spec.render_block()?;
    let content = format!("{SOL_FILE_HEADER}\n\n{block}\n");

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| SolError::FileWrite {
            path: dest.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(dest, content).map_err(|source| SolError::FileWrite {
        path: dest.to_path_buf(),
        source,
    })?;
    tracing::info!(
        code = %profile.profile_id,
        path = %dest.display(),
        "wrote soil file"
    );
    Ok(())
}

/// Complete renderable description of one profile block.
///
/// Built either from caller input plus [`HeaderOverrides`] (create/append)
/// or from a parsed profile plus its section record (update), so fields the
/// display model does not carry survive a rewrite.
#[derive(Debug, Clone)]
pub(crate) struct ProfileSpec {
    pub code: String,
    pub site: String,
    pub country: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub color: String,
    pub albedo: Option<f64>,
    pub evaporation_limit: Option<f64>,
    pub drainage_rate: Option<f64>,
    pub runoff_curve: Option<f64>,
    pub mineralization_factor: Option<f64>,
    pub fertility_factor: Option<f64>,
    pub ph_method: String,
    pub phosphorus_method: String,
    pub potassium_method: String,
    pub soil_data_source: String,
    pub soil_series_name: String,
    pub soil_classification: String,
    pub texture_class: String,
    pub layers: Vec<LayerInput>,
}

impl ProfileSpec {
    pub(crate) fn from_new(profile: &NewProfile, overrides: &HeaderOverrides) -> Self {
        Self {
            code: profile.profile_id.clone(),
            site: profile.site.clone(),
            country: profile.country.clone(),
            lat: Some(profile.lat),
            lon: Some(profile.lon),
            color: overrides.color_code.clone(),
            albedo: Some(overrides.albedo),
            evaporation_limit: Some(overrides.evaporation_limit),
            drainage_rate: Some(overrides.drainage_rate),
            runoff_curve: Some(overrides.runoff_curve),
            mineralization_factor: Some(overrides.mineralization_factor),
            fertility_factor: Some(overrides.fertility_factor),
            ph_method: overrides.ph_method.clone(),
            phosphorus_method: overrides.phosphorus_method.clone(),
            potassium_method: overrides.potassium_method.clone(),
            soil_data_source: overrides.soil_data_source.clone(),
            soil_series_name: overrides.soil_series_name.clone(),
            soil_classification: overrides.soil_classification.clone(),
            texture_class: overrides.texture_class.clone(),
            layers: profile.layers.clone(),
        }
    }

    pub(crate) fn from_parsed(profile: &SoilProfile, record: &SectionRecord) -> Self {
        let layers = profile
            .layers
            .iter()
            .enumerate()
            .map(|(row, layer)| LayerInput {
                depth: parse_optional_number(&layer.depth),
                master_horizon: non_empty(&layer.master_horizon),
                lower_limit: parse_optional_number(&layer.lower_limit),
                drained_upper_limit: parse_optional_number(&layer.drained_upper_limit),
                saturated: parse_optional_number(&layer.saturated),
                root_growth: parse_optional_number(&layer.srgf),
                ksat: parse_optional_number(&layer.ksat),
                bulk_density: parse_optional_number(&layer.bulk_density),
                organic_carbon: parse_optional_number(&layer.organic_carbon),
                clay: parse_optional_number(&layer.clay),
                silt: parse_optional_number(&layer.silt),
                stones: parse_optional_number(&layer.stones),
                total_nitrogen: parse_optional_number(&layer.total_nitrogen),
                ph: parse_optional_number(&layer.ph),
                ph_buffer: record_cell(record, "SLHB", row),
                cec: parse_optional_number(&layer.cec),
                adsorption_coefficient: record_cell(record, "SADC", row),
            })
            .collect();

        Self {
            code: profile.code.clone(),
            site: profile.site_name.clone(),
            country: profile.country.clone(),
            lat: parse_optional_number(&profile.latitude),
            lon: parse_optional_number(&profile.longitude),
            color: profile.color_code.clone(),
            albedo: parse_optional_number(&profile.albedo),
            evaporation_limit: parse_optional_number(record.scalar("SLU1")),
            drainage_rate: parse_optional_number(&profile.drainage_rate),
            runoff_curve: parse_optional_number(&profile.runoff_curve),
            mineralization_factor: parse_optional_number(record.scalar("SLNF")),
            fertility_factor: parse_optional_number(&profile.fertility_factor),
            ph_method: record.scalar("SMHB").to_string(),
            phosphorus_method: record.scalar("SMPX").to_string(),
            potassium_method: record.scalar("SMKE").to_string(),
            soil_data_source: profile.soil_data_source.clone(),
            soil_series_name: profile.soil_series_name.clone(),
            soil_classification: profile.soil_classification.clone(),
            texture_class: record.scalar(TAG_TEXTURE).to_string(),
            layers,
        }
    }

    /// Renders the profile as a block: marker line through layer table, no
    /// file-level header, no trailing newline.
    pub(crate) fn render_block(&self) -> Result<String> {
        if self.code.chars().count() != 10 {
            return Err(SolError::InvalidProfileId {
                id: self.code.clone(),
            });
        }

        let layers: Vec<&LayerInput> = self
            .layers
            .iter()
            .filter(|layer| layer.depth.is_some())
            .collect();
        if layers.len() < self.layers.len() {
            tracing::warn!(
                code = %self.code,
                dropped = self.layers.len() - layers.len(),
                "dropping layers without a depth"
            );
        }
        if layers.is_empty() {
            return Err(SolError::EmptyLayerTable {
                code: self.code.clone(),
            });
        }

        let depth = layers
            .iter()
            .filter_map(|layer| layer.depth)
            .fold(f64::MIN, f64::max);

        let mut lines = Vec::with_capacity(6 + layers.len());
        lines.push(format!(
            "*{code}  {source:<11} {texture:<5} {depth:>5} {series}",
            code = self.code,
            source = or_missing(&self.soil_data_source),
            texture = or_missing(&self.texture_class),
            depth = format!("{depth:.0}"),
            series = or_missing(&self.soil_series_name),
        ));
        lines.push(SITE_HEADER.to_string());
        lines.push(format!(
            " {site:<11} {country:<15} {lat:>7} {lon:>7} {family}",
            site = clipped(&self.site, 10),
            country = clipped(&self.country, 10),
            lat = coordinate(self.lat),
            lon = coordinate(self.lon),
            family = or_missing(&self.soil_classification),
        ));
        lines.push(PROPERTIES_HEADER.to_string());
        lines.push(self.properties_line());
        lines.push(LAYER_TABLE_HEADER.to_string());
        for layer in layers {
            lines.push(layer_line(layer));
        }
        Ok(lines.join("\n"))
    }

    fn properties_line(&self) -> String {
        let mut line = String::new();
        line.push_str(&text_column(&self.color));
        line.push_str(&optional_column(self.albedo, 2));
        line.push_str(&optional_column(self.evaporation_limit, 1));
        line.push_str(&optional_column(self.drainage_rate, 2));
        line.push_str(&optional_column(self.runoff_curve, 1));
        line.push_str(&optional_column(self.mineralization_factor, 2));
        line.push_str(&optional_column(self.fertility_factor, 2));
        line.push_str(&text_column(&self.ph_method));
        line.push_str(&text_column(&self.phosphorus_method));
        line.push_str(&text_column(&self.potassium_method));
        line
    }
}

fn layer_line(layer: &LayerInput) -> String {
    let mut line = String::new();
    line.push_str(&optional_column(layer.depth, 0));
    line.push_str(&text_column(layer.master_horizon.as_deref().unwrap_or("")));
    line.push_str(&optional_column(layer.lower_limit, 3));
    line.push_str(&optional_column(layer.drained_upper_limit, 3));
    line.push_str(&optional_column(layer.saturated, 3));
    line.push_str(&optional_column(layer.root_growth, 3));
    line.push_str(&optional_column(layer.ksat, 2));
    line.push_str(&optional_column(layer.bulk_density, 2));
    line.push_str(&optional_column(layer.organic_carbon, 2));
    line.push_str(&optional_column(layer.clay, 1));
    line.push_str(&optional_column(layer.silt, 1));
    line.push_str(&optional_column(layer.stones, 1));
    line.push_str(&optional_column(layer.total_nitrogen, 2));
    line.push_str(&optional_column(layer.ph, 1));
    line.push_str(&optional_column(layer.ph_buffer, 1));
    line.push_str(&optional_column(layer.cec, 1));
    line.push_str(&optional_column(layer.adsorption_coefficient, 1));
    line
}

/// One 6-wide right-aligned numeric column; absent and sentinel values
/// render as the bare `-99` token, never `-99.000`.
fn optional_column(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if !is_missing_number(v) => format!("{:>6}", format!("{v:.decimals$}")),
        _ => format!("{MISSING_TOKEN:>6}"),
    }
}

/// One 6-wide right-aligned text column, `-99` when empty.
fn text_column(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        format!("{MISSING_TOKEN:>6}")
    } else {
        format!("{trimmed:>6}")
    }
}

fn or_missing(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() { MISSING_TOKEN } else { trimmed }
}

fn clipped(value: &str, max_chars: usize) -> String {
    value.trim().chars().take(max_chars).collect()
}

fn coordinate(value: Option<f64>) -> String {
    match value {
        Some(v) if !is_missing_number(v) => format!("{v:.3}"),
        _ => MISSING_TOKEN.to_string(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn record_cell(record: &SectionRecord, tag: &str, row: usize) -> Option<f64> {
    record
        .column(tag)
        .and_then(|column| column.get(row))
        .and_then(|value| parse_optional_number(value))
}
