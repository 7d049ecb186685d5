//! Canned catalog responses for E2E tests
//!
//! Every helper produces the exact JSON shape the real provider returns, so
//! tests exercise the same deserialization path as a live build. URL helpers
//! delegate to the library clients to stay in sync with their query strings.

use anyhow::Result;
use firmbuilder_lib::api::{CurseForgeClient, GithubClient, ModrinthClient};
use firmbuilder_lib::networking::HashAlgorithm;
use firmbuilder_lib::pack::LoaderContext;
use firmbuilder_lib::testing::MockNetworkProvider;
use firmbuilder_lib::Fetcher;
use serde_json::{Value, json};
use std::io::{Cursor, Write};
use std::sync::Arc;
use zip::write::SimpleFileOptions;

pub const MODRINTH: &str = "http://modrinth.test";
pub const CURSEFORGE: &str = "http://curseforge.test";
pub const GITHUB: &str = "http://github.test";

/// Pinned Forge universal jar for 1.7.10
pub const FORGE_UNIVERSAL: &str = "https://maven.minecraftforge.net/net/minecraftforge/forge/1.7.10-10.13.4.1614-1.7.10/forge-1.7.10-10.13.4.1614-1.7.10-universal.jar";

/// Bootstrap mods installed for Forge 1.7.10
pub const BOOTSTRAP_MODS: [&str; 2] = ["cUtsYbG5", "ghjoiQAl"];

pub const SHIM_REPOSITORY: &str = "GTNewHorizons/lwjgl3ify";

fn url_probe() -> Arc<MockNetworkProvider> {
    Arc::new(MockNetworkProvider::new())
}

pub fn modrinth_versions_url(project_id: &str, context: &LoaderContext) -> String {
    ModrinthClient::with_base_url(url_probe(), MODRINTH.to_string())
        .versions_url(project_id, context)
}

pub fn curseforge_files_url(project_id: &str, context: &LoaderContext) -> String {
    CurseForgeClient::with_base_url(url_probe(), CURSEFORGE.to_string(), None)
        .files_url(project_id, context)
}

pub fn github_releases_url(repository: &str) -> String {
    GithubClient::with_base_url(url_probe(), GITHUB.to_string()).releases_url(repository)
}

pub fn github_assets_url(repository: &str) -> String {
    format!("{}/repos/{}/releases/1/assets", GITHUB, repository)
}

pub fn modrinth_download_url(project_id: &str, filename: &str) -> String {
    format!("https://cdn.modrinth.test/data/{}/{}", project_id, filename)
}

pub fn github_download_url(repository: &str, name: &str) -> String {
    format!("https://objects.github.test/{}/{}", repository, name)
}

pub fn curseforge_download_url(file_id: u64, filename: &str) -> String {
    format!("https://edge.forgecdn.test/files/{}/{}", file_id, filename)
}

/// A single-version Modrinth listing
pub fn modrinth_listing(
    project_id: &str,
    version_id: &str,
    filename: &str,
    sha1: Option<&str>,
    size: u64,
) -> Value {
    let hashes = match sha1 {
        Some(sha1) => json!({ "sha1": sha1 }),
        None => json!({}),
    };
    json!([{
        "id": version_id,
        "files": [{
            "filename": filename,
            "url": modrinth_download_url(project_id, filename),
            "hashes": hashes,
            "size": size
        }]
    }])
}

/// A single-file CurseForge files envelope
pub fn curseforge_listing(file_id: u64, filename: &str, sha1: &str, size: u64) -> Value {
    json!({
        "data": [{
            "id": file_id,
            "fileName": filename,
            "downloadUrl": curseforge_download_url(file_id, filename),
            "fileLength": size,
            "hashes": [
                { "value": "d41d8cd98f00b204e9800998ecf8427e", "algo": 2 },
                { "value": sha1, "algo": 1 }
            ]
        }]
    })
}

pub fn github_release(repository: &str) -> Value {
    json!([{ "assets_url": github_assets_url(repository) }])
}

pub fn github_assets(repository: &str, names: &[&str]) -> Value {
    let assets: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "browser_download_url": github_download_url(repository, name)
            })
        })
        .collect();
    Value::Array(assets)
}

/// In-memory zip with one file per `(name, contents)` pair
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, contents) in entries {
        writer.start_file(*name, options)?;
        writer.write_all(contents)?;
    }
    Ok(writer.finish()?.into_inner())
}

/// Hex digest of `bytes`, computed the way the fetcher verifies downloads
pub fn digest(bytes: &[u8], algorithm: HashAlgorithm) -> Result<String> {
    let scratch = tempfile::NamedTempFile::new()?;
    std::fs::write(scratch.path(), bytes)?;
    Ok(Fetcher::hash_file(scratch.path(), algorithm)?)
}
