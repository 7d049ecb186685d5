use super::*;
use tempfile::TempDir;

const LEGACY_PACK: &str = r#"{
    "name": "Firm Pack",
    "loader": "forge",
    "version": "1.2.0",
    "mcv": "1.7.10",
    "hashgit": true,
    "mods": [
        { "name": "Journeymap", "type": "curseforge", "projectid": "32274", "fileid": "4500123", "side": "client" },
        { "name": "Hodgepodge", "type": "github", "projectid": "GTNewHorizons/Hodgepodge" },
        { "name": "Config", "type": "url", "projectid": "https://example.com/files/cfg.zip", "destination": "config/" }
    ]
}"#;

#[test]
fn test_parse_full_document() {
    let spec = PackSpec::from_json(LEGACY_PACK).unwrap();

    assert_eq!(spec.name, "Firm Pack");
    assert_eq!(spec.game_version, "1.7.10");
    assert!(spec.hash_github);
    assert_eq!(spec.loader_version, DEFAULT_LOADER_VERSION);
    assert_eq!(spec.summary, "");
    assert_eq!(spec.mods.len(), 3);

    let journeymap = &spec.mods[0];
    assert_eq!(journeymap.kind, ProviderKind::CurseForge);
    assert_eq!(journeymap.file_id.as_deref(), Some("4500123"));
    assert_eq!(journeymap.side, "client");
    assert_eq!(journeymap.destination, None);

    let config = &spec.mods[2];
    assert_eq!(config.kind, ProviderKind::Url);
    assert_eq!(config.destination.as_deref(), Some("config/"));
    assert_eq!(config.side, "");
}

#[test]
fn test_declaration_order_is_preserved() {
    let spec = PackSpec::from_json(LEGACY_PACK).unwrap();
    let names: Vec<&str> = spec.mods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Journeymap", "Hodgepodge", "Config"]);
}

#[test]
fn test_empty_strings_are_absent_and_numbers_accepted() {
    let spec = PackSpec::from_json(
        r#"{
            "name": "p", "loader": "fabric", "version": "1", "mcv": "1.12.2",
            "loaderversion": "0.15.0",
            "mods": [
                { "name": "a", "type": "curseforge", "projectid": "1", "fileid": "", "destination": "" },
                { "name": "b", "type": "curseforge", "projectid": "2", "fileid": 99 }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(spec.loader_version, "0.15.0");
    assert_eq!(spec.mods[0].file_id, None);
    assert_eq!(spec.mods[0].destination, None);
    assert_eq!(spec.mods[1].file_id.as_deref(), Some("99"));
}

#[test]
fn test_unknown_provider_type_is_fatal() {
    let err = PackSpec::from_json(
        r#"{ "name": "p", "loader": "forge", "version": "1", "mcv": "1.7.10",
             "mods": [ { "name": "a", "type": "bukkit", "projectid": "1" } ] }"#,
    )
    .unwrap_err();

    assert!(matches!(err, PackSpecError::ParseFailed { .. }));
}

#[test]
fn test_empty_required_fields_are_rejected() {
    let err = PackSpec::from_json(r#"{ "name": "p", "loader": "", "version": "1", "mcv": "1.7.10" }"#)
        .unwrap_err();
    assert!(err.to_string().contains("'loader'"));

    let err = PackSpec::from_json(
        r#"{ "name": "p", "loader": "forge", "version": "1", "mcv": "1.7.10",
             "mods": [ { "name": "a", "type": "modrinth", "projectid": " " } ] }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("empty projectid"));
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = PackSpec::load(&temp.path().join("pack.json")).unwrap_err();
    assert!(matches!(err, PackSpecError::ReadFailed { .. }));
}

#[test]
fn test_load_from_disk_and_context() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pack.json");
    std::fs::write(&path, LEGACY_PACK).unwrap();

    let spec = PackSpec::load(&path).unwrap();
    let context = spec.context();

    assert_eq!(context, LoaderContext::new("forge", "1.7.10"));
    assert_eq!(context.to_string(), "forge: 1.7.10");
}
