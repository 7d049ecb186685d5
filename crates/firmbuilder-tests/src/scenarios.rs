//! Ready-made packs shared across E2E suites

use crate::fixtures;
use crate::{HermeticSessionBuilder, MockNetworkProvider, TestEnvironment};
use anyhow::Result;
use firmbuilder_lib::application::{CommandSession, LiveConfigProvider};
use firmbuilder_lib::pack::LoaderContext;
use serde_json::{Value, json};
use std::sync::Arc;

pub const HODGEPODGE: &str = "GTNewHorizons/Hodgepodge";
pub const HODGEPODGE_JAR: &[u8] = b"hodgepodge";

pub type HermeticSession = (
    CommandSession<LiveConfigProvider>,
    Arc<MockNetworkProvider>,
    TestEnvironment,
);

pub fn legacy_context() -> LoaderContext {
    LoaderContext::new("forge", "1.7.10")
}

/// Forge 1.7.10 pack with one reference of every provider kind
pub fn legacy_pack() -> Value {
    json!({
        "name": "Sky Factory",
        "loader": "forge",
        "version": "1.0.0",
        "mcv": "1.7.10",
        "hashgit": true,
        "summary": "Islands in the sky",
        "mods": [
            { "name": "Journeymap", "type": "modrinth", "projectid": "lfHFW1mp", "side": "client" },
            { "name": "Thaumcraft", "type": "curseforge", "projectid": "223628", "fileid": "2227552", "side": "both" },
            { "name": "Hodgepodge", "type": "github", "projectid": HODGEPODGE, "side": "both" },
            {
                "name": "Shaders",
                "type": "url",
                "projectid": "https://files.test/shaders/BSL_v8.2.zip",
                "destination": "shaderpacks/",
                "side": "client"
            }
        ]
    })
}

/// Session for [`legacy_pack`] with every route a full build touches
pub fn legacy_session() -> Result<HermeticSession> {
    let context = legacy_context();
    HermeticSessionBuilder::new()?
        .with_pack(&legacy_pack())?
        .with_source_file("config/skyfactory.cfg", "islands=true")?
        .with_source_file("mods/local-tweaks.jar", "local")?
        .with_legacy_forge_support()?
        .with_json(
            fixtures::modrinth_versions_url("lfHFW1mp", &context),
            &fixtures::modrinth_listing(
                "lfHFW1mp",
                "jm-5.1.4",
                "journeymap-1.7.10-5.1.4p2.jar",
                Some("5f1b2c"),
                1024,
            ),
        )
        .with_json(
            fixtures::curseforge_files_url("223628", &context),
            &fixtures::curseforge_listing(2229999, "Thaumcraft-1.7.10-4.2.3.5.jar", "aa11", 2048),
        )
        .with_github_release(
            HODGEPODGE,
            &[
                ("hodgepodge-2.5.0.jar", HODGEPODGE_JAR.to_vec()),
                ("hodgepodge-2.5.0-dev.jar", b"dev".to_vec()),
            ],
        )
        .build()
}
