//! Per-reference overrides and destination collisions

use anyhow::Result;
use firmbuilder_lib::application::{Commands, execute_command_with_session};
use firmbuilder_lib::pack::LoaderContext;
use firmbuilder_tests::HermeticSessionBuilder;
use firmbuilder_tests::fixtures;
use serde_json::json;

#[tokio::test]
async fn destination_override_replaces_mods_prefix() -> Result<()> {
    let context = LoaderContext::new("quilt", "1.20.1");
    let (session, _network, env) = HermeticSessionBuilder::new()?
        .with_pack(&json!({
            "name": "Looks",
            "loader": "quilt",
            "version": "1.0.0",
            "mcv": "1.20.1",
            "mods": [
                {
                    "name": "Faithful",
                    "type": "modrinth",
                    "projectid": "faithful32",
                    "destination": "resourcepacks/"
                },
                { "name": "Iris", "type": "modrinth", "projectid": "YL57xq9U", "destination": "" }
            ]
        }))?
        .with_json(
            fixtures::modrinth_versions_url("faithful32", &context),
            &fixtures::modrinth_listing("faithful32", "f1", "Faithful 32x.zip", None, 900),
        )
        .with_json(
            fixtures::modrinth_versions_url("YL57xq9U", &context),
            &fixtures::modrinth_listing("YL57xq9U", "i1", "iris-1.6.jar", None, 10),
        )
        .build()?;

    execute_command_with_session(Commands::default(), &session).await?;

    let index = env.read_json("pack/modrinth.index.json")?;
    assert_eq!(index["files"][0]["path"], "resourcepacks/Faithful 32x.zip");
    // An empty destination falls back to the mods folder
    assert_eq!(index["files"][1]["path"], "mods/iris-1.6.jar");
    Ok(())
}

#[tokio::test]
async fn later_reference_wins_a_destination_collision() -> Result<()> {
    let (session, _network, env) = HermeticSessionBuilder::new()?
        .with_pack(&json!({
            "name": "Dupes",
            "loader": "fabric",
            "version": "1.0.0",
            "mcv": "1.20.1",
            "mods": [
                { "name": "First", "type": "url", "projectid": "https://a.test/one/same.jar" },
                { "name": "Other", "type": "url", "projectid": "https://a.test/other.jar" },
                { "name": "Second", "type": "url", "projectid": "https://b.test/two/same.jar" }
            ]
        }))?
        .build()?;

    execute_command_with_session(Commands::default(), &session).await?;

    let index = env.read_json("pack/modrinth.index.json")?;
    let files = index["files"].as_array().cloned().unwrap_or_default();
    assert_eq!(files.len(), 2);
    // The replacement keeps the first reference's position
    assert_eq!(files[0]["path"], "mods/same.jar");
    assert_eq!(files[0]["downloads"][0], "https://b.test/two/same.jar");
    assert_eq!(files[1]["path"], "mods/other.jar");
    Ok(())
}

#[tokio::test]
async fn legacy_file_id_override_only_changes_recorded_id() -> Result<()> {
    let context = LoaderContext::new("forge", "1.7.10");
    let (session, _network, env) = HermeticSessionBuilder::new()?
        .with_pack(&json!({
            "name": "Pinned",
            "loader": "forge",
            "version": "1.0.0",
            "mcv": "1.7.10",
            "mods": [
                { "name": "Baubles", "type": "curseforge", "projectid": "227083", "fileid": "2224857" },
                { "name": "Botania", "type": "curseforge", "projectid": "225643" }
            ]
        }))?
        .with_legacy_forge_support()?
        .with_json(
            fixtures::curseforge_files_url("227083", &context),
            &fixtures::curseforge_listing(2290000, "Baubles-1.7.10-1.0.1.10.jar", "b1", 10),
        )
        .with_json(
            fixtures::curseforge_files_url("225643", &context),
            &fixtures::curseforge_listing(2283837, "Botania r1.8-249.jar", "b2", 20),
        )
        .build()?;

    execute_command_with_session(Commands::default(), &session).await?;

    let packconfig = env.read_to_string("pack/resources.packconfig")?;
    assert!(packconfig.contains(
        "[Baubles]\ntype = curseforge\nprojectId = 227083\nfileId = 2224857\ndestination = mods/Baubles-1.7.10-1.0.1.10.jar\n"
    ));
    assert!(packconfig.contains(
        "[Botania]\ntype = curseforge\nprojectId = 225643\nfileId = 2283837\ndestination = mods/Botania r1.8-249.jar\n"
    ));

    let index = env.read_json("pack/modrinth.index.json")?;
    assert_eq!(
        index["files"][0]["downloads"][0],
        fixtures::curseforge_download_url(2290000, "Baubles-1.7.10-1.0.1.10.jar")
    );
    Ok(())
}
