//! Block-splicing behavior of append, update, and delete.

use std::fs;
use std::path::{Path, PathBuf};

use sbuild_model::{LayerInput, NewProfile};
use sbuild_sol::{
    HeaderOverrides, SolError, append_profile, build_soil_file, delete_soil_profile, read_profile,
    show_profiles, update_soil_file,
};
use tempfile::TempDir;

fn profile(id: &str, depths: &[f64]) -> NewProfile {
    NewProfile {
        profile_id: id.to_string(),
        site: "site".to_string(),
        country: "nowhere".to_string(),
        lat: 1.0,
        lon: 2.0,
        layers: depths
            .iter()
            .map(|depth| {
                LayerInput::new(*depth)
                    .with_water_retention(0.1, 0.2, 0.3)
                    .with_texture_fractions(20.0, 30.0)
            })
            .collect(),
    }
}

fn set(key: &str, value: &str) -> Vec<(String, String)> {
    vec![(key.to_string(), value.to_string())]
}

fn block_of(path: &Path, code: &str) -> String {
    show_profiles(path)
        .unwrap()
        .into_iter()
        .find(|entry| entry.code == code)
        .expect("profile present")
        .content
}

fn two_profile_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("SOIL.SOL");
    build_soil_file(
        &profile("AAAAAAAAAA", &[10.0, 30.0]),
        &path,
        &HeaderOverrides::default(),
    )
    .unwrap();
    append_profile(
        &path,
        &profile("BBBBBBBBBB", &[20.0]),
        &HeaderOverrides::default(),
    )
    .unwrap();
    path
}

#[test]
fn append_keeps_existing_content_byte_identical() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("SOIL.SOL");
    build_soil_file(
        &profile("AAAAAAAAAA", &[10.0]),
        &path,
        &HeaderOverrides::default(),
    )
    .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    append_profile(
        &path,
        &profile("BBBBBBBBBB", &[20.0]),
        &HeaderOverrides::default(),
    )
    .unwrap();

    let after = fs::read_to_string(&path).unwrap();
    assert!(after.starts_with(before.as_str()));
    // Exactly one blank separator line between the old content and the
    // appended block
    let appended = &after[before.len()..];
    assert!(appended.starts_with("\n*BBBBBBBBBB"));

    let codes: Vec<String> = show_profiles(&path)
        .unwrap()
        .into_iter()
        .map(|entry| entry.code)
        .collect();
    assert_eq!(codes, ["AAAAAAAAAA", "BBBBBBBBBB"]);
}

#[test]
fn append_to_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let result = append_profile(
        &dir.path().join("NOPE.SOL"),
        &profile("BBBBBBBBBB", &[20.0]),
        &HeaderOverrides::default(),
    );
    assert!(matches!(result, Err(SolError::FileNotFound { .. })));
}

#[test]
fn update_changes_only_the_target_block() {
    let dir = TempDir::new().unwrap();
    let path = two_profile_file(&dir);
    append_profile(
        &path,
        &profile("CCCCCCCCCC", &[40.0]),
        &HeaderOverrides::default(),
    )
    .unwrap();

    let block_a = block_of(&path, "AAAAAAAAAA");
    let block_c = block_of(&path, "CCCCCCCCCC");
    let prologue_before: String = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .take_while(|line| !line.starts_with("*AAAAAAAAAA"))
        .collect::<Vec<_>>()
        .join("\n");

    update_soil_file(&path, "BBBBBBBBBB", &set("salb", "0.21")).unwrap();

    assert_eq!(block_of(&path, "AAAAAAAAAA"), block_a);
    assert_eq!(block_of(&path, "CCCCCCCCCC"), block_c);
    let prologue_after: String = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .take_while(|line| !line.starts_with("*AAAAAAAAAA"))
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(prologue_after, prologue_before);

    let updated = read_profile(&path, "BBBBBBBBBB").unwrap();
    assert_eq!(updated.albedo, "0.21");
}

#[test]
fn update_applies_layer_keys_to_every_layer() {
    let dir = TempDir::new().unwrap();
    let path = two_profile_file(&dir);

    update_soil_file(&path, "AAAAAAAAAA", &set("slll", "0.15")).unwrap();

    let updated = read_profile(&path, "AAAAAAAAAA").unwrap();
    assert_eq!(updated.layers.len(), 2);
    assert!(
        updated
            .layers
            .iter()
            .all(|layer| layer.lower_limit == "0.15")
    );
}

#[test]
fn update_ignores_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = two_profile_file(&dir);
    let before = read_profile(&path, "AAAAAAAAAA").unwrap();

    update_soil_file(&path, "AAAAAAAAAA", &set("no_such_field", "1")).unwrap();

    let after = read_profile(&path, "AAAAAAAAAA").unwrap();
    assert_eq!(after, before);
}

#[test]
fn update_missing_file_fails() {
    let result = update_soil_file(
        Path::new("/nonexistent/SOIL.SOL"),
        "AAAAAAAAAA",
        &set("salb", "0.2"),
    );
    assert!(matches!(result, Err(SolError::FileNotFound { .. })));
}

#[test]
fn update_missing_profile_fails() {
    let dir = TempDir::new().unwrap();
    let path = two_profile_file(&dir);
    let result = update_soil_file(&path, "ZZZZZZZZZZ", &set("salb", "0.2"));
    assert!(matches!(result, Err(SolError::ProfileNotFound { .. })));
}

#[test]
fn delete_middle_profile_keeps_the_rest() {
    let dir = TempDir::new().unwrap();
    let path = two_profile_file(&dir);
    append_profile(
        &path,
        &profile("CCCCCCCCCC", &[40.0]),
        &HeaderOverrides::default(),
    )
    .unwrap();
    let block_a = block_of(&path, "AAAAAAAAAA");

    delete_soil_profile(&path, "BBBBBBBBBB").unwrap();

    let codes: Vec<String> = show_profiles(&path)
        .unwrap()
        .into_iter()
        .map(|entry| entry.code)
        .collect();
    assert_eq!(codes, ["AAAAAAAAAA", "CCCCCCCCCC"]);
    assert_eq!(block_of(&path, "AAAAAAAAAA"), block_a);
}

#[test]
fn delete_missing_profile_fails() {
    let dir = TempDir::new().unwrap();
    let path = two_profile_file(&dir);
    let result = delete_soil_profile(&path, "ZZZZZZZZZZ");
    assert!(matches!(result, Err(SolError::ProfileNotFound { .. })));
}

#[test]
fn delete_missing_file_fails() {
    let result = delete_soil_profile(Path::new("/nonexistent/SOIL.SOL"), "AAAAAAAAAA");
    assert!(matches!(result, Err(SolError::FileNotFound { .. })));
}

#[test]
fn create_append_update_delete_scenario() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("SCENARIO.SOL");

    // create with two layers
    build_soil_file(
        &profile("AAAAAAAAAA", &[10.0, 30.0]),
        &path,
        &HeaderOverrides::default(),
    )
    .unwrap();

    // append a second profile
    append_profile(
        &path,
        &profile("BBBBBBBBBB", &[20.0]),
        &HeaderOverrides::default(),
    )
    .unwrap();
    let block_b = block_of(&path, "BBBBBBBBBB");

    // update the first profile's albedo; B must not move a byte
    update_soil_file(&path, "AAAAAAAAAA", &set("albedo", "0.15")).unwrap();
    assert_eq!(block_of(&path, "BBBBBBBBBB"), block_b);
    assert_eq!(read_profile(&path, "AAAAAAAAAA").unwrap().albedo, "0.15");

    // delete B: file stays, holding only A
    delete_soil_profile(&path, "BBBBBBBBBB").unwrap();
    assert!(path.exists());
    let codes: Vec<String> = show_profiles(&path)
        .unwrap()
        .into_iter()
        .map(|entry| entry.code)
        .collect();
    assert_eq!(codes, ["AAAAAAAAAA"]);

    // delete A: the emptied file is removed from disk
    delete_soil_profile(&path, "AAAAAAAAAA").unwrap();
    assert!(!path.exists());
}
