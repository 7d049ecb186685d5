use super::*;
use crate::networking::ContentHash;
use crate::pack::destination_path;
use tempfile::TempDir;

fn pack() -> PackSpec {
    PackSpec::from_json(
        r#"{"name": "Sky", "loader": "fabric", "version": "1.2.0", "mcv": "1.12.2", "mods": []}"#,
    )
    .unwrap()
}

fn artifact(kind: ProviderKind, filename: &str, destination: Option<&str>) -> ResolvedArtifact {
    ResolvedArtifact {
        name: filename.to_string(),
        kind,
        project_id: filename.to_string(),
        provider_id: None,
        url: format!("https://cdn.example.com/{}", filename),
        filename: filename.to_string(),
        hash: None,
        size: None,
        destination_override: destination.map(str::to_string),
        destination: destination_path(destination, filename),
        side: String::new(),
    }
}

#[test]
fn modrinth_file_entry_carries_hash_and_size() {
    let mut x = artifact(ProviderKind::Modrinth, "x.jar", None);
    x.hash = Some(ContentHash::sha1("abc123"));
    x.size = Some(42);
    let mut set = ResolvedSet::new();
    set.insert(x);

    let index = ModrinthIndex::build(&pack(), &set);

    assert_eq!(
        index.files,
        vec![IndexFile {
            path: "mods/x.jar".to_string(),
            hashes: IndexHashes {
                sha1: "abc123".to_string()
            },
            downloads: vec!["https://cdn.example.com/x.jar".to_string()],
            file_size: 42,
        }]
    );
}

#[test]
fn header_and_dependencies_come_from_pack() {
    let index = ModrinthIndex::build(&pack(), &ResolvedSet::new());

    assert_eq!(index.format_version, 1);
    assert_eq!(index.game, "minecraft");
    assert_eq!(index.version_id, "1.2.0");
    assert_eq!(index.name, "Sky");
    assert_eq!(index.summary, "");
    assert_eq!(index.dependencies.minecraft, "1.12.2");
    assert_eq!(index.dependencies.fabric_loader, "0.14.19");
    assert!(index.files.is_empty());
}

#[test]
fn github_artifacts_are_left_out() {
    let mut set = ResolvedSet::new();
    set.insert(artifact(ProviderKind::Github, "gh.jar", None));
    set.insert(artifact(ProviderKind::Url, "raw.jar", Some("resourcepacks/")));

    let index = ModrinthIndex::build(&pack(), &set);

    assert_eq!(index.files.len(), 1);
    assert_eq!(index.files[0].path, "resourcepacks/raw.jar");
    assert_eq!(index.files[0].hashes.sha1, "");
    assert_eq!(index.files[0].file_size, 0);
}

#[test]
fn md5_hash_is_not_reported_as_sha1() {
    let mut cf = artifact(ProviderKind::CurseForge, "cf.jar", None);
    cf.hash = Some(ContentHash::md5("5d41402abc4b2a76b9719d911017c592"));
    let mut set = ResolvedSet::new();
    set.insert(cf);

    let index = ModrinthIndex::build(&pack(), &set);
    assert_eq!(index.files[0].hashes.sha1, "");
}

#[test]
fn written_json_uses_format_key_names() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pack").join(INDEX_FILE);
    let mut set = ResolvedSet::new();
    set.insert(artifact(ProviderKind::Modrinth, "x.jar", None));

    ModrinthIndex::build(&pack(), &set).write(&path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["formatVersion"], 1);
    assert_eq!(value["versionId"], "1.2.0");
    assert_eq!(value["dependencies"]["fabric-loader"], "0.14.19");
    assert_eq!(value["files"][0]["fileSize"], 0);
    assert_eq!(value["files"][0]["downloads"][0], "https://cdn.example.com/x.jar");
}
