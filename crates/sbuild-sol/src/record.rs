//! Pass-2 structured section reader for one profile block.
//!
//! Within a block, `@`-tagged header lines introduce sections: a header's
//! tokens name the columns and the following lines carry the values. This
//! reader is the strict path: a section only contributes values when every
//! data row's token count matches its header, which keeps row/column
//! alignment trustworthy. Ragged tables are left out of the record and
//! picked up by the tolerant fallback scan in [`crate::parse`].

use std::collections::HashMap;

use sbuild_model::is_numeric_token;

use crate::scan::marker_code;

/// Tag under which the marker line's data-source field is stored.
pub(crate) const TAG_SOIL_DATA_SOURCE: &str = "SOIL_DATA_SOURCE";
/// Tag under which the marker line's texture class is stored.
pub(crate) const TAG_TEXTURE: &str = "TEXTURE";
/// Tag under which the marker line's series name is stored.
pub(crate) const TAG_SOIL_SERIES_NAME: &str = "SOIL_SERIES_NAME";
/// Tag under which the `@SITE` family string is stored.
pub(crate) const TAG_SCS_FAMILY: &str = "SCS_FAMILY";

/// Field map parsed from one profile block: scalar tags from single-row
/// sections and the marker/site lines, column tags from the layer table.
#[derive(Debug, Default)]
pub(crate) struct SectionRecord {
    scalars: HashMap<String, String>,
    columns: HashMap<String, Vec<String>>,
}

impl SectionRecord {
    /// Parses a block's lines (marker line first) into a record.
    pub(crate) fn from_block(lines: &[String]) -> Self {
        let mut record = Self::default();
        if lines.is_empty() {
            return record;
        }

        record.read_marker_line(&lines[0]);

        let mut index = 1;
        while index < lines.len() {
            let line = &lines[index];
            if let Some(header) = line.trim_start().strip_prefix('@') {
                let tags: Vec<String> = header
                    .split_whitespace()
                    .map(str::to_ascii_uppercase)
                    .collect();
                let rows = section_rows(lines, index + 1);
                let consumed = rows.len();
                match tags.first().map(String::as_str) {
                    Some("SITE") => record.read_site_section(rows.first()),
                    Some("SLB") => record.read_column_section(&tags, &rows),
                    Some(_) => record.read_scalar_section(&tags, rows.first()),
                    None => {}
                }
                index += 1 + consumed;
            } else {
                index += 1;
            }
        }
        record
    }

    /// Scalar value for a tag, `""` when absent.
    pub(crate) fn scalar(&self, tag: &str) -> &str {
        self.scalars.get(tag).map_or("", String::as_str)
    }

    /// Column values for a tag, `None` when the layer table did not carry it.
    pub(crate) fn column(&self, tag: &str) -> Option<&[String]> {
        self.columns.get(tag).map(Vec::as_slice)
    }

    /// Marker line: `*<code>  <source> <texture> <depth> <series name...>`.
    fn read_marker_line(&mut self, line: &str) {
        let Some(code) = marker_code(line) else {
            return;
        };
        self.insert_scalar("NAME", code);

        let after_code = line
            .strip_prefix('*')
            .and_then(|rest| rest.trim_start().strip_prefix(code))
            .unwrap_or("");
        let tokens: Vec<&str> = after_code.split_whitespace().collect();
        if let Some(source) = tokens.first() {
            self.insert_scalar(TAG_SOIL_DATA_SOURCE, source);
        }
        if let Some(texture) = tokens.get(1) {
            self.insert_scalar(TAG_TEXTURE, texture);
        }
        if let Some(depth) = tokens.get(2) {
            self.insert_scalar("DEPTH", depth);
        }
        if tokens.len() > 3 {
            self.insert_scalar(TAG_SOIL_SERIES_NAME, &tokens[3..].join(" "));
        }
    }

    /// `@SITE` value line: site and country lead, the first two numeric
    /// tokens are latitude/longitude, and everything after the longitude is
    /// the classification family.
    fn read_site_section(&mut self, row: Option<&Vec<String>>) {
        let Some(tokens) = row else { return };
        if let Some(site) = tokens.first() {
            self.insert_scalar("SITE", site);
        }
        if let Some(country) = tokens.get(1) {
            self.insert_scalar("COUNTRY", country);
        }
        let mut numeric = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| is_numeric_token(token));
        let lat = numeric.next();
        let lon = numeric.next();
        if let Some((_, lat)) = lat {
            self.insert_scalar("LAT", lat);
        }
        if let Some((lon_index, lon)) = lon {
            self.insert_scalar("LONG", lon);
            if lon_index + 1 < tokens.len() {
                self.insert_scalar(TAG_SCS_FAMILY, &tokens[lon_index + 1..].join(" "));
            }
        }
    }

    fn read_scalar_section(&mut self, tags: &[String], row: Option<&Vec<String>>) {
        let Some(tokens) = row else { return };
        if tokens.len() != tags.len() {
            tracing::debug!(
                section = %tags.first().map_or("", String::as_str),
                "section row does not match its header; skipped"
            );
            return;
        }
        for (tag, token) in tags.iter().zip(tokens) {
            self.insert_scalar(tag, token);
        }
    }

    fn read_column_section(&mut self, tags: &[String], rows: &[Vec<String>]) {
        if rows.is_empty() || rows.iter().any(|row| row.len() != tags.len()) {
            tracing::debug!("layer table rows do not match the header; skipped");
            return;
        }
        for (position, tag) in tags.iter().enumerate() {
            if self.columns.contains_key(tag) {
                continue;
            }
            let values = rows.iter().map(|row| row[position].clone()).collect();
            self.columns.insert(tag.clone(), values);
        }
    }

    fn insert_scalar(&mut self, tag: &str, value: &str) {
        self.scalars
            .entry(tag.to_string())
            .or_insert_with(|| value.to_string());
    }
}

/// Collects the data rows following a section header: consecutive lines
/// that are not blank and do not open a new section or block.
fn section_rows(lines: &[String], from: usize) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for line in &lines[from..] {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('@') || trimmed.starts_with('*') {
            break;
        }
        rows.push(trimmed.split_whitespace().map(str::to_string).collect());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    fn sample() -> Vec<String> {
        block(
            "*IBSB910017  IBSNAT      SCL     180 Millhopper Fine Sand\n\
             @SITE        COUNTRY          LAT     LONG SCS FAMILY\n\
              CREC        USA              29.600 -82.370 Loamy,silic Arenic Paleudult\n\
             @ SCOM  SALB  SLU1  SLDR  SLRO  SLNF  SLPF  SMHB  SMPX  SMKE\n\
                 BN  0.13   6.0  0.60  61.0  1.00  1.00 IB001 IB001 IB001\n\
             @  SLB  SLMH  SLLL  SDUL  SSAT  SRGF  SSKS  SBDM  SLOC  SLCL  SLSI  SLCF  SLNI  SLHW  SLHB  SCEC  SADC\n\
                 15   -99 0.023 0.086 0.230 1.000  7.40  1.36  0.90   0.9  11.8   -99  0.09   5.3   -99  20.0   -99\n\
                 30   -99 0.023 0.086 0.230 1.000  7.40  1.36  0.69   0.9  11.8   -99  0.07   5.4   -99   5.0   -99",
        )
    }

    #[test]
    fn test_marker_line_scalars() {
        let record = SectionRecord::from_block(&sample());
        assert_eq!(record.scalar("NAME"), "IBSB910017");
        assert_eq!(record.scalar(TAG_SOIL_DATA_SOURCE), "IBSNAT");
        assert_eq!(record.scalar(TAG_TEXTURE), "SCL");
        assert_eq!(record.scalar("DEPTH"), "180");
        assert_eq!(record.scalar(TAG_SOIL_SERIES_NAME), "Millhopper Fine Sand");
    }

    #[test]
    fn test_site_section() {
        let record = SectionRecord::from_block(&sample());
        assert_eq!(record.scalar("SITE"), "CREC");
        assert_eq!(record.scalar("COUNTRY"), "USA");
        assert_eq!(record.scalar("LAT"), "29.600");
        assert_eq!(record.scalar("LONG"), "-82.370");
        assert_eq!(record.scalar(TAG_SCS_FAMILY), "Loamy,silic Arenic Paleudult");
    }

    #[test]
    fn test_properties_section() {
        let record = SectionRecord::from_block(&sample());
        assert_eq!(record.scalar("SALB"), "0.13");
        assert_eq!(record.scalar("SLRO"), "61.0");
        assert_eq!(record.scalar("SMKE"), "IB001");
        assert_eq!(record.scalar("SCOM"), "BN");
    }

    #[test]
    fn test_layer_columns() {
        let record = SectionRecord::from_block(&sample());
        let slb = record.column("SLB").unwrap();
        assert_eq!(slb, ["15", "30"]);
        let sloc = record.column("SLOC").unwrap();
        assert_eq!(sloc, ["0.90", "0.69"]);
        assert!(record.column("NOPE").is_none());
    }

    #[test]
    fn test_ragged_layer_table_is_skipped() {
        let mut lines = sample();
        // Drop the trailing columns of the last row
        let last = lines.last_mut().unwrap();
        *last = last.split_whitespace().take(12).collect::<Vec<_>>().join(" ");

        let record = SectionRecord::from_block(&lines);
        assert!(record.column("SLB").is_none());
    }

    #[test]
    fn test_second_layer_table_keeps_first_columns() {
        // chemistry tables repeat the SLB column
        let mut lines = sample();
        lines.push("@  SLB  SLPX  SLPT".to_string());
        lines.push("    15   1.0   2.0".to_string());
        lines.push("    30   3.0   4.0".to_string());

        let record = SectionRecord::from_block(&lines);
        assert_eq!(record.column("SLB").unwrap(), ["15", "30"]);
        assert_eq!(record.column("SLPX").unwrap(), ["1.0", "3.0"]);
    }

    #[test]
    fn test_missing_site_row() {
        let record = SectionRecord::from_block(&block(
            "*AAAAAAAAAA  -99\n@SITE        COUNTRY          LAT     LONG SCS FAMILY",
        ));
        assert_eq!(record.scalar("LAT"), "");
        assert_eq!(record.scalar("SITE"), "");
    }
}
