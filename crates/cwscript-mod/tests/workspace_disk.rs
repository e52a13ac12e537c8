use std::fs;

use cwscript_core::types::{Property, Scalar};
use cwscript_mod::category::BOM;
use cwscript_mod::layout::{DESCRIPTOR_FILE, TRAITS_FILE};
use cwscript_mod::{Civic, Ethic, ModError, ModLayout, ModWorkspace, SpeciesTrait};
use tempfile::TempDir;

fn workspace(dir: &TempDir) -> ModWorkspace {
    ModWorkspace::new(ModLayout::new(dir.path(), "Test Mod"), "acme")
}

const HAND_WRITTEN: &str = "# Hand-written traits\r\ntrait_old = {\r\n    cost   = 1   # cheap\r\n\r\n    opposites = { \"trait_new\" }\r\n}\r\n";

#[test]
fn init_creates_common_dir() {
    let dir = TempDir::new().unwrap();
    let root = workspace(&dir).init().unwrap();
    assert!(root.join("common").is_dir());
    assert_eq!(root, dir.path().join("Test Mod"));
}

#[test]
fn unedited_file_saves_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let ws = workspace(&dir);
    let path = ws.layout().path_for(TRAITS_FILE).unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, HAND_WRITTEN).unwrap();

    let mut ws = ws;
    ws.load(TRAITS_FILE).unwrap();
    fs::remove_file(&path).unwrap();
    ws.save(TRAITS_FILE).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), HAND_WRITTEN);
}

#[test]
fn edits_keep_surrounding_layout() {
    let dir = TempDir::new().unwrap();
    let mut ws = workspace(&dir);
    let path = ws.layout().path_for(TRAITS_FILE).unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, HAND_WRITTEN).unwrap();

    ws.load(TRAITS_FILE).unwrap();
    ws.add_trait(&SpeciesTrait::new("trait_new", -1));
    ws.save(TRAITS_FILE).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with(HAND_WRITTEN), "layout lost:\n{written}");
    assert!(written.ends_with("trait_new = {\n\tcost = -1\n}\n"));

    let ids: Vec<String> = ws.traits().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["trait_old", "trait_new"]);
}

#[test]
fn civics_survive_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let mut ws = workspace(&dir);
    let mut civic = Civic::new("civic_acme_scholars").with_modifier("country_unity_produces_mult", 0.15);
    civic.name = Some("Scholars".into());
    civic.required_ethics = vec![Ethic::Materialist];
    ws.add_civic(&civic);
    ws.save_all().unwrap();

    let mut reloaded = workspace(&dir);
    assert_eq!(reloaded.load_all().unwrap(), 1);
    assert_eq!(reloaded.civics().unwrap(), vec![civic]);
}

#[test]
fn localisation_written_with_bom() {
    let dir = TempDir::new().unwrap();
    let mut ws = workspace(&dir);
    ws.add_localisation("english", [("civic_acme_scholars", "Scholars")]);
    let written = ws.save_all().unwrap();
    assert_eq!(written.len(), 1);

    let bytes = fs::read(&written[0]).unwrap();
    assert!(bytes.starts_with(BOM));
    assert_eq!(
        &bytes[BOM.len()..],
        b"l_english:\n civic_acme_scholars:0 \"Scholars\"\n"
    );
    assert!(written[0].ends_with("localisation/english/acme_l_english.yml"));

    let mut reloaded = workspace(&dir);
    reloaded.load_all().unwrap();
    assert_eq!(
        reloaded.localisation("english").and_then(|l| l.get("civic_acme_scholars")),
        Some("Scholars")
    );
}

#[test]
fn scripts_have_no_bom() {
    let dir = TempDir::new().unwrap();
    let mut ws = workspace(&dir);
    ws.add_object("common/x.txt", Property::new("a", Scalar::number(1)));
    let written = ws.save("common/x.txt").unwrap();
    assert_eq!(fs::read(&written[0]).unwrap(), b"a = 1\n");
}

#[test]
fn descriptor_written_twice() {
    let dir = TempDir::new().unwrap();
    let mut ws = workspace(&dir);
    ws.update_descriptor("1.0", "3.14.*", &["Gameplay"]).unwrap();
    let written = ws.save(DESCRIPTOR_FILE).unwrap();
    assert_eq!(written.len(), 2);

    let outer = fs::read_to_string(dir.path().join("Test Mod.mod")).unwrap();
    let inner = fs::read_to_string(dir.path().join("Test Mod").join("descriptor.mod")).unwrap();
    let root = ws.layout().root_for_descriptor();
    assert!(outer.ends_with(&format!("path = \"{root}\"\n")));
    assert!(!inner.contains("path ="));
    assert!(inner.contains("name = \"Test Mod\""));
    assert!(inner.contains("supported_version = \"3.14.*\""));
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let mut ws = workspace(&dir);
    let err = ws.load("common/missing.txt").unwrap_err();
    match err {
        ModError::Io { path, source } => {
            assert!(path.ends_with("common/missing.txt"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn escaping_paths_rejected() {
    let dir = TempDir::new().unwrap();
    let mut ws = workspace(&dir);
    assert!(matches!(
        ws.load("../outside.txt"),
        Err(ModError::InvalidPath { .. })
    ));
    ws.add_object("../outside.txt", Property::new("a", Scalar::number(1)));
    assert!(matches!(
        ws.save("../outside.txt"),
        Err(ModError::InvalidPath { .. })
    ));
}

#[test]
fn localisation_without_header_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut ws = workspace(&dir);
    let path = ws.layout().path_for("localisation/bad.yml").unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, " key:0 \"v\"\n").unwrap();
    assert!(matches!(
        ws.load("localisation/bad.yml"),
        Err(ModError::InvalidEntity { kind: "localisation", .. })
    ));
}
