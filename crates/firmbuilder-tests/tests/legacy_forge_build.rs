//! Full Forge 1.7.10 build: every launcher target, bootstrap mods, the
//! Technic loader jar, the LWJGL3 shim and the instance-loader manifest.

use anyhow::Result;
use firmbuilder_lib::application::{Commands, execute_command_with_session};
use firmbuilder_lib::networking::HashAlgorithm;
use firmbuilder_tests::fixtures::{self, FORGE_UNIVERSAL};
use firmbuilder_tests::scenarios::{HODGEPODGE_JAR, legacy_session};

#[tokio::test]
async fn legacy_build_produces_every_launcher_archive() -> Result<()> {
    let (session, _network, env) = legacy_session()?;

    execute_command_with_session(Commands::default(), &session).await?;

    for archive in ["multimc", "polymc", "technic", "curse", "modrinth"] {
        assert!(env.exists(&format!("out/{}.zip", archive)), "missing {}.zip", archive);
    }
    assert!(!env.exists("out/generic.zip"));
    Ok(())
}

#[tokio::test]
async fn legacy_build_writes_instance_loader_manifest() -> Result<()> {
    let (session, _network, env) = legacy_session()?;

    execute_command_with_session(Commands::default(), &session).await?;

    let md5 = fixtures::digest(HODGEPODGE_JAR, HashAlgorithm::Md5)?;
    let expected = format!(
        "[Journeymap]\n\
         type = modrinth\n\
         versionId = jm-5.1.4\n\
         destination = mods/journeymap-1.7.10-5.1.4p2.jar\n\
         sourceFileName = journeymap-1.7.10-5.1.4p2.jar\n\
         side = client\n\
         \n\
         [Thaumcraft]\n\
         type = curseforge\n\
         projectId = 223628\n\
         fileId = 2227552\n\
         destination = mods/Thaumcraft-1.7.10-4.2.3.5.jar\n\
         side = both\n\
         \n\
         [Hodgepodge]\n\
         type = url\n\
         url = https://objects.github.test/GTNewHorizons/Hodgepodge/hodgepodge-2.5.0.jar\n\
         destination = mods/hodgepodge-2.5.0.jar\n\
         MD5 = {}\n\
         side = both\n\
         \n\
         [Shaders]\n\
         type = url\n\
         url = https://files.test/shaders/BSL_v8.2.zip\n\
         destination = shaderpacks/BSL_v8.2.zip\n\
         side = client\n",
        md5
    );

    assert_eq!(env.read_to_string("pack/resources.packconfig")?, expected);

    let packed = env.archive_entry(
        "bld/generic/.minecraft/config/mcinstanceloader/pack.mcinstance",
        "resources.packconfig",
    )?;
    assert_eq!(String::from_utf8(packed)?, expected);
    Ok(())
}

#[tokio::test]
async fn legacy_build_installs_bootstrap_mods_everywhere() -> Result<()> {
    let (session, _network, env) = legacy_session()?;

    execute_command_with_session(Commands::default(), &session).await?;

    assert_eq!(
        env.read_to_string("bld/generic/.minecraft/mods/mcinstanceloader-1.4.0.jar")?,
        "instance loader"
    );
    assert!(env.exists("bld/generic/.minecraft/mods/unimixins-all-1.7.10-0.1.19.jar"));
    assert!(env.exists("bld/generic/.minecraft/mods/local-tweaks.jar"));
    assert!(env.exists("tmp/mcinstanceloader-1.4.0.jar"));

    let technic = env.archive_entries("out/technic.zip")?;
    assert!(technic.contains(&"technic/mods/mcinstanceloader-1.4.0.jar".to_string()));
    assert!(technic.contains(&"technic/config/skyfactory.cfg".to_string()));
    assert!(technic.contains(&"technic/config/mcinstanceloader/pack.mcinstance".to_string()));

    let curse = env.archive_entries("out/curse.zip")?;
    assert!(curse.contains(&"curse/mods/unimixins-all-1.7.10-0.1.19.jar".to_string()));

    // Manifest-driven: declared mods are never bundled
    assert!(!technic.iter().any(|entry| entry.contains("journeymap")));
    Ok(())
}

#[tokio::test]
async fn legacy_build_installs_forge_into_technic() -> Result<()> {
    let (session, network, env) = legacy_session()?;

    execute_command_with_session(Commands::default(), &session).await?;

    assert_eq!(network.request_count(FORGE_UNIVERSAL), 1);
    assert_eq!(
        env.archive_entry("out/technic.zip", "technic/bin/modpack.jar")?,
        b"forge universal"
    );
    Ok(())
}

#[tokio::test]
async fn legacy_build_ships_lwjgl3_shim_to_polymc_only() -> Result<()> {
    let (session, network, env) = legacy_session()?;

    execute_command_with_session(Commands::default(), &session).await?;

    let polymc = env.archive_entries("out/polymc.zip")?;
    assert!(polymc.contains(&"polymc/.minecraft/mods/lwjgl3ify-2.1.5.jar".to_string()));
    assert!(polymc.contains(&"polymc/patches/me.eigenraven.lwjgl3ify.json".to_string()));
    assert!(polymc.contains(&"polymc/patches/org.lwjgl3.json".to_string()));
    assert!(polymc.contains(&"polymc/instance.cfg".to_string()));

    let multimc = env.archive_entries("out/multimc.zip")?;
    assert!(!multimc.iter().any(|entry| entry.contains("lwjgl3ify")));

    assert_eq!(
        network.request_count(&fixtures::github_download_url(
            fixtures::SHIM_REPOSITORY,
            "lwjgl3ify-2.1.5-dev.jar"
        )),
        0
    );
    Ok(())
}

#[tokio::test]
async fn legacy_build_pins_multimc_components() -> Result<()> {
    let (session, _network, env) = legacy_session()?;

    execute_command_with_session(Commands::default(), &session).await?;

    let descriptor = String::from_utf8(env.archive_entry("out/multimc.zip", "multimc/instance.cfg")?)?;
    assert!(descriptor.contains("InstanceType=OneSix"));
    assert!(descriptor.contains("name=Sky Factory"));

    let pins: serde_json::Value =
        serde_json::from_slice(&env.archive_entry("out/multimc.zip", "multimc/mmc-pack.json")?)?;
    let uids: Vec<&str> = pins["components"]
        .as_array()
        .map(|components| components.iter().filter_map(|c| c["uid"].as_str()).collect())
        .unwrap_or_default();
    assert!(uids.contains(&"net.minecraft"));
    assert!(uids.contains(&"net.minecraftforge"));
    Ok(())
}

#[tokio::test]
async fn workdir_component_pins_are_copied_verbatim() -> Result<()> {
    let (session, _network, env) = legacy_session()?;
    let pins = r#"{"components":[{"uid":"custom"}],"formatVersion":1}"#;
    env.write_file("8.json", pins)?;

    execute_command_with_session(Commands::default(), &session).await?;

    assert_eq!(env.read_to_string("bld/multimc/mmc-pack.json")?, pins);
    Ok(())
}

#[tokio::test]
async fn legacy_modrinth_index_skips_github_references() -> Result<()> {
    let (session, _network, env) = legacy_session()?;

    execute_command_with_session(Commands::default(), &session).await?;

    let index = env.read_json("bld/modrinth/modrinth.index.json")?;
    assert_eq!(index, env.read_json("pack/modrinth.index.json")?);
    assert_eq!(index["formatVersion"], 1);
    assert_eq!(index["game"], "minecraft");
    assert_eq!(index["versionId"], "1.0.0");
    assert_eq!(index["summary"], "Islands in the sky");
    assert_eq!(index["dependencies"]["minecraft"], "1.7.10");
    assert_eq!(index["dependencies"]["fabric-loader"], "0.14.19");

    let paths: Vec<&str> = index["files"]
        .as_array()
        .map(|files| files.iter().filter_map(|file| file["path"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(
        paths,
        vec![
            "mods/journeymap-1.7.10-5.1.4p2.jar",
            "mods/Thaumcraft-1.7.10-4.2.3.5.jar",
            "shaderpacks/BSL_v8.2.zip",
        ]
    );

    let thaumcraft = &index["files"][1];
    assert_eq!(thaumcraft["hashes"]["sha1"], "aa11");
    assert_eq!(thaumcraft["fileSize"], 2048);
    assert_eq!(
        thaumcraft["downloads"][0],
        fixtures::curseforge_download_url(2229999, "Thaumcraft-1.7.10-4.2.3.5.jar")
    );

    let shaders = &index["files"][2];
    assert_eq!(shaders["hashes"]["sha1"], "");
    assert_eq!(shaders["fileSize"], 0);
    Ok(())
}
