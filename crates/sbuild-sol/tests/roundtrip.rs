//! Write-then-read round trips over single-profile files.

use std::path::PathBuf;

use sbuild_model::{LayerInput, NewProfile};
use sbuild_sol::{HeaderOverrides, build_soil_file, read_profile};
use tempfile::TempDir;

fn umarya_profile() -> NewProfile {
    NewProfile {
        profile_id: "UMVA030003".to_string(),
        site: "umarya".to_string(),
        country: "India".to_string(),
        lat: 23.5,
        lon: 80.75,
        layers: vec![
            LayerInput {
                depth: Some(11.0),
                lower_limit: Some(0.175),
                drained_upper_limit: Some(0.271),
                saturated: Some(0.415),
                root_growth: Some(1.0),
                ksat: Some(0.43),
                bulk_density: Some(1.47),
                organic_carbon: Some(0.97),
                clay: Some(24.5),
                silt: Some(13.2),
                ph: Some(6.7),
                cec: Some(18.5),
                ..LayerInput::default()
            },
            LayerInput {
                depth: Some(31.0),
                lower_limit: Some(0.226),
                drained_upper_limit: Some(0.332),
                saturated: Some(0.421),
                root_growth: Some(0.657),
                ksat: Some(0.12),
                bulk_density: Some(1.46),
                organic_carbon: Some(0.66),
                clay: Some(36.4),
                silt: Some(18.4),
                ph: Some(6.4),
                cec: Some(19.3),
                ..LayerInput::default()
            },
        ],
    }
}

fn write_and_read(profile: &NewProfile) -> (TempDir, PathBuf, sbuild_model::SoilProfile) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ROUNDTRIP.SOL");
    build_soil_file(profile, &path, &HeaderOverrides::default()).unwrap();
    let parsed = read_profile(&path, &profile.profile_id).unwrap();
    (dir, path, parsed)
}

#[test]
fn header_fields_round_trip() {
    let (_dir, _path, parsed) = write_and_read(&umarya_profile());

    assert_eq!(parsed.code, "UMVA030003");
    assert_eq!(parsed.institute_code, "UM");
    assert_eq!(parsed.site_name, "umarya");
    assert_eq!(parsed.country, "India");
    assert_eq!(parsed.latitude, "23.5");
    assert_eq!(parsed.longitude, "80.75");
    assert_eq!(parsed.albedo, "0.13");
    assert_eq!(parsed.drainage_rate, "0.6");
    assert_eq!(parsed.runoff_curve, "61");
    assert_eq!(parsed.fertility_factor, "1");
    assert_eq!(parsed.color_code, "BN");
    assert_eq!(
        parsed.soil_classification,
        "FINE, HYPHERTERMIC, VERTIC USTOCHREPTS"
    );
    // Defaulted marker fields are the sentinel and read back as absent
    assert_eq!(parsed.soil_data_source, "");
    assert_eq!(parsed.soil_series_name, "");
}

#[test]
fn layer_values_round_trip() {
    let (_dir, _path, parsed) = write_and_read(&umarya_profile());

    assert_eq!(parsed.layers.len(), 2);
    let first = &parsed.layers[0];
    assert_eq!(first.depth, "11");
    assert_eq!(first.lower_limit, "0.175");
    assert_eq!(first.drained_upper_limit, "0.271");
    assert_eq!(first.saturated, "0.415");
    assert_eq!(first.srgf, "1");
    assert_eq!(first.ksat, "0.43");
    assert_eq!(first.bulk_density, "1.47");
    assert_eq!(first.organic_carbon, "0.97");
    assert_eq!(first.clay, "24.5");
    assert_eq!(first.silt, "13.2");
    assert_eq!(first.ph, "6.7");
    assert_eq!(first.cec, "18.5");

    let second = &parsed.layers[1];
    assert_eq!(second.depth, "31");
    assert_eq!(second.srgf, "0.657");
    assert_eq!(second.clay, "36.4");
}

#[test]
fn unset_fields_read_back_empty() {
    let (_dir, _path, parsed) = write_and_read(&umarya_profile());

    for layer in &parsed.layers {
        // Never supplied, written as -99, normalized back to absent
        assert_eq!(layer.master_horizon, "");
        assert_eq!(layer.stones, "");
        assert_eq!(layer.total_nitrogen, "");
    }
}

#[test]
fn zero_is_preserved_through_the_round_trip() {
    let mut profile = umarya_profile();
    profile.layers[0].stones = Some(0.0);
    profile.layers[0].total_nitrogen = Some(0.0);

    let (_dir, _path, parsed) = write_and_read(&profile);
    // A measured zero must never collapse into the missing sentinel
    assert_eq!(parsed.layers[0].stones, "0");
    assert_eq!(parsed.layers[0].total_nitrogen, "0");
    assert_eq!(parsed.layers[1].stones, "");
}

#[test]
fn master_horizon_round_trips_as_text() {
    let mut profile = umarya_profile();
    profile.layers[0].master_horizon = Some("A1".to_string());

    let (_dir, _path, parsed) = write_and_read(&profile);
    assert_eq!(parsed.layers[0].master_horizon, "A1");
}

#[test]
fn negative_longitude_round_trips() {
    let mut profile = umarya_profile();
    profile.lat = 29.6;
    profile.lon = -82.37;

    let (_dir, _path, parsed) = write_and_read(&profile);
    assert_eq!(parsed.latitude, "29.6");
    assert_eq!(parsed.longitude, "-82.37");
}

#[test]
fn overridden_headers_round_trip() {
    let overrides = HeaderOverrides {
        runoff_curve: 73.0,
        soil_data_source: "IBSNAT".to_string(),
        soil_series_name: "Millhopper Fine Sand".to_string(),
        color_code: "G".to_string(),
        ..HeaderOverrides::default()
    };

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("OVERRIDES.SOL");
    let profile = umarya_profile();
    build_soil_file(&profile, &path, &overrides).unwrap();
    let parsed = read_profile(&path, "UMVA030003").unwrap();

    assert_eq!(parsed.runoff_curve, "73");
    assert_eq!(parsed.soil_data_source, "IBSNAT");
    assert_eq!(parsed.soil_series_name, "Millhopper Fine Sand");
    assert_eq!(parsed.color_code, "G");
}
