//! Builds outside Forge 1.7.10 only produce the Modrinth pack

use anyhow::Result;
use firmbuilder_lib::application::{Commands, execute_command_with_session};
use firmbuilder_lib::pack::LoaderContext;
use firmbuilder_tests::HermeticSessionBuilder;
use firmbuilder_tests::fixtures::{self, MODRINTH};
use serde_json::json;

fn fabric_pack() -> serde_json::Value {
    json!({
        "name": "Sky",
        "loader": "fabric",
        "version": "2.3.0",
        "mcv": "1.12.2",
        "loaderversion": "0.15.11",
        "mods": [
            { "name": "X", "type": "modrinth", "projectid": "cUtsYbG5" },
            { "name": "Gone", "type": "modrinth", "projectid": "missing" },
            { "name": "Hodgepodge", "type": "github", "projectid": "GTNewHorizons/Hodgepodge" },
            { "name": "Raw", "type": "url", "projectid": "https://files.test/raw.jar" }
        ]
    })
}

#[tokio::test]
async fn fabric_build_writes_modrinth_pack_only() -> Result<()> {
    let context = LoaderContext::new("fabric", "1.12.2");
    let (session, network, env) = HermeticSessionBuilder::new()?
        .with_pack(&fabric_pack())?
        .with_source_file("config/sky.cfg", "cfg")?
        .with_json(
            fixtures::modrinth_versions_url("cUtsYbG5", &context),
            &fixtures::modrinth_listing("cUtsYbG5", "ver1", "x.jar", Some("abc123"), 42),
        )
        .with_json(fixtures::modrinth_versions_url("missing", &context), &json!([]))
        .build()?;

    execute_command_with_session(Commands::default(), &session).await?;

    assert!(env.exists("out/modrinth.zip"));
    for absent in ["multimc", "polymc", "technic", "curse"] {
        assert!(!env.exists(&format!("out/{}.zip", absent)), "unexpected {}.zip", absent);
    }
    assert!(!env.exists("pack/resources.packconfig"));
    assert!(!env.exists("bld/generic/instance.cfg"));

    let entries = env.archive_entries("out/modrinth.zip")?;
    assert!(entries.contains(&"modrinth/modrinth.index.json".to_string()));
    assert!(entries.contains(&"modrinth/overrides/config/sky.cfg".to_string()));

    let index = env.read_json("bld/modrinth/modrinth.index.json")?;
    assert_eq!(index["versionId"], "2.3.0");
    assert_eq!(index["dependencies"]["fabric-loader"], "0.15.11");
    assert_eq!(index["files"].as_array().map(Vec::len), Some(2));
    assert_eq!(index["files"][0]["path"], "mods/x.jar");
    assert_eq!(index["files"][0]["hashes"]["sha1"], "abc123");
    assert_eq!(index["files"][0]["fileSize"], 42);
    assert_eq!(index["files"][1]["path"], "mods/raw.jar");
    assert_eq!(index["files"][1]["downloads"][0], "https://files.test/raw.jar");

    // Only catalog queries: no downloads, no loader jar, no GitHub lookups
    for url in network.requests() {
        assert!(url.starts_with(MODRINTH), "unexpected request to {}", url);
    }
    Ok(())
}

#[tokio::test]
async fn modern_forge_skips_instance_loader_manifest() -> Result<()> {
    let context = LoaderContext::new("forge", "1.20.1");
    let (session, network, env) = HermeticSessionBuilder::new()?
        .with_pack(&json!({
            "name": "Modern",
            "loader": "forge",
            "version": "1.0.0",
            "mcv": "1.20.1",
            "mods": [
                { "name": "Create", "type": "curseforge", "projectid": "328085", "fileid": "4835191" }
            ]
        }))?
        .with_json(
            fixtures::curseforge_files_url("328085", &context),
            &fixtures::curseforge_listing(4835190, "create-1.20.1-0.5.1.f.jar", "c0ffee", 14_000_000),
        )
        .build()?;

    execute_command_with_session(Commands::default(), &session).await?;

    assert!(!env.exists("pack/resources.packconfig"));
    assert!(!env.exists("bld/technic"));
    assert_eq!(network.request_count(fixtures::FORGE_UNIVERSAL), 0);

    let index = env.read_json("pack/modrinth.index.json")?;
    assert_eq!(index["files"][0]["path"], "mods/create-1.20.1-0.5.1.f.jar");
    assert_eq!(index["files"][0]["hashes"]["sha1"], "c0ffee");
    assert_eq!(
        index["files"][0]["downloads"][0],
        fixtures::curseforge_download_url(4835190, "create-1.20.1-0.5.1.f.jar")
    );
    Ok(())
}

#[tokio::test]
async fn catalog_outage_fails_the_build() -> Result<()> {
    let context = LoaderContext::new("fabric", "1.12.2");
    let (session, _network, env) = HermeticSessionBuilder::new()?
        .with_pack(&fabric_pack())?
        .with_status(fixtures::modrinth_versions_url("cUtsYbG5", &context), 503)
        .build()?;

    let error = execute_command_with_session(Commands::default(), &session)
        .await
        .unwrap_err();

    assert!(error.to_string().contains("Failed to build pack"));
    assert!(format!("{:#}", error).contains("503"));
    assert!(!env.exists("out/modrinth.zip"));
    Ok(())
}

#[tokio::test]
async fn invalid_pack_file_fails_before_any_request() -> Result<()> {
    let (session, network, env) = HermeticSessionBuilder::new()?.build()?;
    env.write_file("pack.json", "{ not json")?;

    let result = execute_command_with_session(Commands::default(), &session).await;

    assert!(result.is_err());
    assert!(network.requests().is_empty());
    assert!(!env.exists("bld"));
    Ok(())
}

#[tokio::test]
async fn newest_file_without_download_fails_instead_of_falling_back() -> Result<()> {
    let context = LoaderContext::new("forge", "1.20.1");
    let (session, network, env) = HermeticSessionBuilder::new()?
        .with_pack(&json!({
            "name": "Modern",
            "loader": "forge",
            "version": "1.0.0",
            "mcv": "1.20.1",
            "mods": [ { "name": "Create", "type": "curseforge", "projectid": "328085" } ]
        }))?
        .with_json(
            fixtures::curseforge_files_url("328085", &context),
            &json!({
                "data": [
                    { "id": 999, "fileName": "create-new.jar", "downloadUrl": null, "fileLength": 2, "hashes": [] },
                    {
                        "id": 111,
                        "fileName": "create-old.jar",
                        "downloadUrl": fixtures::curseforge_download_url(111, "create-old.jar"),
                        "fileLength": 1,
                        "hashes": []
                    }
                ]
            }),
        )
        .build()?;

    let error = execute_command_with_session(Commands::default(), &session)
        .await
        .unwrap_err();

    assert!(format!("{:#}", error).contains("file 999 for '328085' has no download"));
    assert_eq!(
        network.request_count(&fixtures::curseforge_download_url(111, "create-old.jar")),
        0
    );
    assert!(!env.exists("out/modrinth.zip"));
    Ok(())
}
