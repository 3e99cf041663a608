//! Profile parser: one `.SOL` block into a normalized [`SoilProfile`].
//!
//! Layer columns are read from the structured section record first; when
//! that leaves the depth column or the hydraulically critical columns
//! empty (a ragged or oddly laid out table), a tolerant direct scan of the
//! layer table fills the gaps. Both paths produce the same column keys and
//! per-row alignment, so callers never see which one ran.

use std::collections::HashMap;
use std::path::Path;

use sbuild_model::{SoilLayer, SoilProfile, sane};

use crate::catalog::read_sol_lines;
use crate::error::{Result, SolError};
use crate::record::{
    SectionRecord, TAG_SCS_FAMILY, TAG_SOIL_DATA_SOURCE, TAG_SOIL_SERIES_NAME,
};
use crate::scan;

/// Reads the profile `code` from a `.SOL` file, fully normalized for
/// display: missing and sentinel values read as empty strings, never `-99`.
///
/// # Errors
///
/// `FileNotFound`/`FileRead` for an unreadable path, `ProfileNotFound` when
/// no block carries the requested code.
pub fn read_profile(path: &Path, code: &str) -> Result<SoilProfile> {
    let lines = read_sol_lines(path)?;
    let bounds = scan::profile_bounds(&lines);
    let block = bounds
        .iter()
        .find(|bounds| bounds.code == code)
        .ok_or_else(|| SolError::ProfileNotFound {
            code: code.to_string(),
            path: path.to_path_buf(),
        })?;

    let (profile, _) = parse_profile_block(code, &lines[block.start..block.end]);
    tracing::debug!(
        path = %path.display(),
        code,
        layers = profile.layers.len(),
        "read soil profile"
    );
    Ok(profile)
}

/// Parses one block's lines into a profile, also returning the raw section
/// record for callers that must preserve fields the profile does not model.
pub(crate) fn parse_profile_block(code: &str, lines: &[String]) -> (SoilProfile, SectionRecord) {
    let record = SectionRecord::from_block(lines);

    let mut columns = LayerColumns::from_record(&record);
    if columns.is_incomplete() {
        tracing::debug!(code, "structured layer read incomplete; scanning table directly");
        columns.fill_from(&scan_layer_table(lines));
    }

    let color = sane(record.scalar("SCOM"));
    let profile = SoilProfile {
        code: code.to_string(),
        institute_code: code
            .chars()
            .take(2)
            .collect::<String>()
            .to_ascii_uppercase(),
        country: sane(record.scalar("COUNTRY")),
        site_name: sane(record.scalar("SITE")),
        latitude: sane(record.scalar("LAT")),
        longitude: sane(record.scalar("LONG")),
        soil_data_source: sane(record.scalar(TAG_SOIL_DATA_SOURCE)),
        soil_series_name: sane(record.scalar(TAG_SOIL_SERIES_NAME)),
        soil_classification: sane(record.scalar(TAG_SCS_FAMILY)),
        color_code: if color.is_empty() {
            "BN".to_string()
        } else {
            color
        },
        albedo: sane(record.scalar("SALB")),
        drainage_rate: sane(record.scalar("SLDR")),
        runoff_curve: sane(record.scalar("SLRO")),
        fertility_factor: sane(record.scalar("SLPF")),
        layers: columns.into_layers(),
    };
    (profile, record)
}

/// Per-column layer values, aligned by row position.
#[derive(Debug, Default)]
struct LayerColumns {
    slb: Vec<String>,
    slmh: Vec<String>,
    slcl: Vec<String>,
    slsi: Vec<String>,
    slcf: Vec<String>,
    sloc: Vec<String>,
    slhw: Vec<String>,
    scec: Vec<String>,
    slni: Vec<String>,
    slll: Vec<String>,
    sdul: Vec<String>,
    ssat: Vec<String>,
    sbdm: Vec<String>,
    ssks: Vec<String>,
    srgf: Vec<String>,
}

impl LayerColumns {
    fn from_record(record: &SectionRecord) -> Self {
        let take = |tag: &str| record.column(tag).map(<[String]>::to_vec).unwrap_or_default();
        Self {
            slb: take("SLB"),
            slmh: take("SLMH"),
            slcl: take("SLCL"),
            slsi: take("SLSI"),
            slcf: take("SLCF"),
            sloc: take("SLOC"),
            slhw: take("SLHW"),
            scec: take("SCEC"),
            slni: take("SLNI"),
            slll: take("SLLL"),
            sdul: take("SDUL"),
            ssat: take("SSAT"),
            sbdm: take("SBDM"),
            ssks: take("SSKS"),
            srgf: take("SRGF"),
        }
    }

    /// The fallback runs when the depth column or either hydraulically
    /// critical column is missing.
    fn is_incomplete(&self) -> bool {
        self.slb.is_empty() || self.slll.is_empty() || self.ssat.is_empty()
    }

    fn fill_from(&mut self, table: &TableScan) {
        let mut fill = |column: &mut Vec<String>, tag: &str| {
            if column.is_empty()
                && let Some(values) = table.column(tag)
            {
                *column = values;
            }
        };
        fill(&mut self.slb, "SLB");
        fill(&mut self.slmh, "SLMH");
        fill(&mut self.slcl, "SLCL");
        fill(&mut self.slsi, "SLSI");
        fill(&mut self.slcf, "SLCF");
        fill(&mut self.sloc, "SLOC");
        fill(&mut self.slhw, "SLHW");
        fill(&mut self.scec, "SCEC");
        fill(&mut self.slni, "SLNI");
        fill(&mut self.slll, "SLLL");
        fill(&mut self.sdul, "SDUL");
        fill(&mut self.ssat, "SSAT");
        fill(&mut self.sbdm, "SBDM");
        // Some soil databases spell saturated conductivity SSKH
        fill(&mut self.ssks, "SSKS");
        fill(&mut self.ssks, "SSKH");
        fill(&mut self.srgf, "SRGF");
    }

    fn into_layers(self) -> Vec<SoilLayer> {
        (0..self.slb.len())
            .map(|row| SoilLayer {
                depth: cell(&self.slb, row),
                master_horizon: cell(&self.slmh, row),
                clay: cell(&self.slcl, row),
                silt: cell(&self.slsi, row),
                stones: cell(&self.slcf, row),
                organic_carbon: cell(&self.sloc, row),
                ph: cell(&self.slhw, row),
                cec: cell(&self.scec, row),
                total_nitrogen: cell(&self.slni, row),
                lower_limit: cell(&self.slll, row),
                drained_upper_limit: cell(&self.sdul, row),
                saturated: cell(&self.ssat, row),
                bulk_density: cell(&self.sbdm, row),
                ksat: cell(&self.ssks, row),
                srgf: cell(&self.srgf, row),
            })
            .collect()
    }
}

fn cell(column: &[String], row: usize) -> String {
    sane(column.get(row).map_or("", String::as_str))
}

/// Tolerant direct scan of the first layer table in a block.
#[derive(Debug, Default)]
struct TableScan {
    header: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl TableScan {
    /// Column values by tag; rows shorter than the header read as `""`.
    fn column(&self, tag: &str) -> Option<Vec<String>> {
        let index = *self.header.get(tag)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).cloned().unwrap_or_default())
                .collect(),
        )
    }
}

/// Finds the header line whose first column tag is `SLB`, maps its tokens
/// to indices, and reads the following whitespace-split rows until a new
/// section starts.
fn scan_layer_table(lines: &[String]) -> TableScan {
    let mut table = TableScan::default();
    for line in lines {
        if table.header.is_empty() {
            if let Some(header) = line.trim_start().strip_prefix('@') {
                let tags: Vec<&str> = header.split_whitespace().collect();
                if tags.first().is_some_and(|tag| tag.eq_ignore_ascii_case("SLB")) {
                    for (index, tag) in tags.iter().enumerate() {
                        table.header.insert(tag.to_ascii_uppercase(), index);
                    }
                }
            }
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('@') || trimmed.starts_with('*') {
            break;
        }
        table
            .rows
            .push(trimmed.split_whitespace().map(str::to_string).collect());
    }
    table
}
