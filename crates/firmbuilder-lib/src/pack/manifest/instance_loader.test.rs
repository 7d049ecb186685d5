use super::*;
use crate::networking::ContentHash;
use crate::pack::destination_path;
use std::io::{Cursor, Read};
use tempfile::TempDir;

fn artifact(name: &str, kind: ProviderKind, filename: &str) -> ResolvedArtifact {
    ResolvedArtifact {
        name: name.to_string(),
        kind,
        project_id: format!("{}-id", name),
        provider_id: None,
        url: format!("https://cdn.example.com/{}", filename),
        filename: filename.to_string(),
        hash: None,
        size: None,
        destination_override: None,
        destination: destination_path(None, filename),
        side: String::new(),
    }
}

#[test]
fn modrinth_section_carries_version_and_source_filename() {
    let mut set = ResolvedSet::new();
    let mut jei = artifact("JEI", ProviderKind::Modrinth, "jei.jar");
    jei.provider_id = Some("v123".to_string());
    jei.side = "client".to_string();
    set.insert(jei);

    assert_eq!(
        PackConfig(&set).to_string(),
        "[JEI]\n\
         type = modrinth\n\
         versionId = v123\n\
         destination = mods/jei.jar\n\
         sourceFileName = jei.jar\n\
         side = client\n"
    );
}

#[test]
fn curseforge_section_uses_recorded_file_id() {
    let mut set = ResolvedSet::new();
    let mut ae2 = artifact("AE2", ProviderKind::CurseForge, "ae2.jar");
    ae2.project_id = "223794".to_string();
    ae2.provider_id = Some("2296797".to_string());
    set.insert(ae2);

    let rendered = PackConfig(&set).to_string();

    assert!(rendered.contains("type = curseforge\n"));
    assert!(rendered.contains("projectId = 223794\n"));
    assert!(rendered.contains("fileId = 2296797\n"));
    assert!(rendered.ends_with("side = \n"));
}

#[test]
fn url_and_github_sections_use_url_type() {
    let mut set = ResolvedSet::new();
    let mut shim = artifact("Shim", ProviderKind::Github, "shim.jar");
    shim.hash = Some(ContentHash::md5("5d41402abc4b2a76b9719d911017c592"));
    set.insert(shim);

    let mut raw = artifact("Raw", ProviderKind::Url, "raw.jar");
    raw.destination_override = Some("mods/1.7.10/".to_string());
    raw.destination = destination_path(Some("mods/1.7.10/"), "raw.jar");
    set.insert(raw);

    assert_eq!(
        PackConfig(&set).to_string(),
        "[Shim]\n\
         type = url\n\
         url = https://cdn.example.com/shim.jar\n\
         destination = mods/shim.jar\n\
         MD5 = 5d41402abc4b2a76b9719d911017c592\n\
         side = \n\
         \n\
         [Raw]\n\
         type = url\n\
         url = https://cdn.example.com/raw.jar\n\
         destination = mods/1.7.10/raw.jar\n\
         side = \n"
    );
}

#[test]
fn sha1_hash_is_not_written_as_md5() {
    let mut set = ResolvedSet::new();
    let mut raw = artifact("Raw", ProviderKind::Github, "raw.jar");
    raw.hash = Some(ContentHash::sha1("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"));
    set.insert(raw);

    assert!(!PackConfig(&set).to_string().contains("MD5"));
}

#[test]
fn empty_set_renders_nothing() {
    assert_eq!(PackConfig(&ResolvedSet::new()).to_string(), "");
}

#[test]
fn write_pack_config_produces_text_and_archive() {
    let temp = TempDir::new().unwrap();
    let pack_dir = temp.path().join("pack");
    let archive = temp.path().join("bld/config/mcinstanceloader/pack.mcinstance");

    let mut set = ResolvedSet::new();
    set.insert(artifact("Raw", ProviderKind::Url, "raw.jar"));

    let written = write_pack_config(&set, &pack_dir, &archive).unwrap();

    let text = std::fs::read_to_string(&written).unwrap();
    assert!(text.starts_with("[Raw]\n"));

    let mut zip = zip::ZipArchive::new(Cursor::new(std::fs::read(&archive).unwrap())).unwrap();
    assert_eq!(zip.len(), 1);
    let mut entry = zip.by_name(PACK_ARCHIVE_ENTRY).unwrap();
    let mut archived = String::new();
    entry.read_to_string(&mut archived).unwrap();
    assert_eq!(archived, text);
}
