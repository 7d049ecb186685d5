use super::*;
use crate::api::{ModrinthClient, ProviderEndpoints};
use crate::networking::NetworkProvider;
use crate::pack::archive::write_single_entry;
use crate::pack::profile::{LEGACY_FORGE, STANDARD};
use crate::testing::{MockNetworkProvider, TempDirFixture};
use serde_json::json;

const MODRINTH: &str = "http://modrinth.test";
const GITHUB: &str = "http://github.test";
const FORGE_JAR: &str = "https://maven.minecraftforge.net/net/minecraftforge/forge/1.7.10-10.13.4.1614-1.7.10/forge-1.7.10-10.13.4.1614-1.7.10-universal.jar";

fn legacy_context() -> LoaderContext {
    LoaderContext::new("forge", "1.7.10")
}

fn endpoints() -> ProviderEndpoints {
    ProviderEndpoints {
        modrinth: MODRINTH.to_string(),
        github: GITHUB.to_string(),
        ..ProviderEndpoints::default()
    }
}

fn modrinth_version(filename: &str) -> serde_json::Value {
    json!([{
        "id": format!("{}-version", filename),
        "files": [{
            "filename": filename,
            "url": format!("https://cdn.test/{}", filename),
            "hashes": {},
            "size": 3
        }]
    }])
}

fn bootstrap_mock(context: &LoaderContext) -> MockNetworkProvider {
    let urls = ModrinthClient::with_base_url(
        Arc::new(MockNetworkProvider::new()),
        MODRINTH.to_string(),
    );
    MockNetworkProvider::new()
        .with_json(urls.versions_url("cUtsYbG5", context), &modrinth_version("mcil.jar"))
        .with_json(urls.versions_url("ghjoiQAl", context), &json!([]))
        .with_body("https://cdn.test/mcil.jar", "jar")
}

struct Harness {
    fixture: TempDirFixture,
    network: Arc<MockNetworkProvider>,
    builder: TreeBuilder,
    registry: Arc<ProviderRegistry>,
}

fn harness(profile: &'static TargetProfile, network: MockNetworkProvider) -> Harness {
    let fixture = TempDirFixture::new().unwrap();
    let network = Arc::new(network);
    let shared: Arc<dyn NetworkProvider> = network.clone();
    let layout = BuildLayout::new(fixture.path());
    let fetcher = Arc::new(Fetcher::new(shared.clone(), layout.staging_dir.clone()));
    let registry = Arc::new(ProviderRegistry::standard(shared, &endpoints(), None));
    let builder = TreeBuilder::new(layout, profile, fetcher);
    Harness {
        fixture,
        network,
        builder,
        registry,
    }
}

#[test]
fn layout_paths_follow_target_shapes() {
    let layout = BuildLayout::new("/work");

    assert_eq!(layout.mods_dir(Target::Generic), Path::new("/work/bld/generic/.minecraft/mods"));
    assert_eq!(layout.mods_dir(Target::Technic), Path::new("/work/bld/technic/mods"));
    assert_eq!(layout.mods_dir(Target::Modrinth), Path::new("/work/bld/modrinth/overrides/mods"));
    assert_eq!(layout.archive_path(Target::CurseForge), Some(PathBuf::from("/work/out/curse.zip")));
    assert_eq!(layout.archive_path(Target::Generic), None);
}

#[test]
fn copy_dir_contents_is_recursive_and_tolerates_missing_source() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("from/config/a.cfg", "a").unwrap();
    fixture.write_file("from/top.txt", "t").unwrap();

    let copied = copy_dir_contents(&fixture.join("from"), &fixture.join("to")).unwrap();
    assert_eq!(copied, 2);
    assert_eq!(fixture.read_file("to/config/a.cfg").unwrap(), "a");

    let none = copy_dir_contents(&fixture.join("absent"), &fixture.join("empty")).unwrap();
    assert_eq!(none, 0);
    assert!(fixture.join("empty").is_dir());
}

#[test]
fn ensure_directories_only_creates_profile_targets() {
    let legacy = harness(&LEGACY_FORGE, MockNetworkProvider::new());
    legacy.builder.ensure_directories().unwrap();
    for dir in [
        "bld/generic/.minecraft/config/mcinstanceloader",
        "bld/polymc/.minecraft/mods",
        "bld/technic/bin",
        "bld/curse/mods",
        "bld/modrinth/overrides/mods",
        "src/modpack",
        "tmp",
        "pack",
        "out",
    ] {
        assert!(legacy.fixture.join(dir).is_dir(), "{} missing", dir);
    }

    let standard = harness(&STANDARD, MockNetworkProvider::new());
    standard.builder.ensure_directories().unwrap();
    assert!(standard.fixture.join("bld/modrinth/overrides/mods").is_dir());
    assert!(!standard.fixture.join("bld/polymc").exists());
    assert!(!standard.fixture.join("bld/technic").exists());
}

#[test]
fn reset_removes_previous_trees_only() {
    let h = harness(&STANDARD, MockNetworkProvider::new());
    h.fixture.write_file("bld/generic/stale.txt", "old").unwrap();
    h.fixture.write_file("tmp/cached.jar", "keep").unwrap();

    h.builder.reset().unwrap();

    assert!(!h.fixture.file_exists("bld"));
    assert!(h.fixture.file_exists("tmp/cached.jar"));
}

#[test]
fn derived_targets_are_independent_copies() {
    let h = harness(&LEGACY_FORGE, MockNetworkProvider::new());
    h.builder.ensure_directories().unwrap();
    h.fixture.write_file("src/mods/a.jar", "a").unwrap();
    h.fixture.write_file("bld/generic/instance.cfg", "cfg").unwrap();
    h.builder.copy_sources().unwrap();

    h.builder.derive_targets().unwrap();

    for path in [
        "bld/multimc/.minecraft/mods/a.jar",
        "bld/polymc/.minecraft/mods/a.jar",
        "bld/technic/mods/a.jar",
        "bld/curse/mods/a.jar",
        "bld/modrinth/overrides/mods/a.jar",
    ] {
        assert!(h.fixture.file_exists(path), "{} missing", path);
    }
    assert!(h.fixture.file_exists("bld/multimc/instance.cfg"));
    assert!(!h.fixture.file_exists("bld/technic/instance.cfg"));

    std::fs::write(h.fixture.join("bld/technic/mods/a.jar"), "changed").unwrap();
    assert_eq!(h.fixture.read_file("bld/curse/mods/a.jar").unwrap(), "a");
}

#[tokio::test]
async fn bootstrap_mods_are_staged_and_installed() {
    let context = legacy_context();
    let h = harness(&LEGACY_FORGE, bootstrap_mock(&context));
    h.builder.ensure_directories().unwrap();
    let resolver = Resolver::new(h.registry.clone(), context);

    let installed = h.builder.install_bootstrap_mods(&resolver).await.unwrap();

    assert_eq!(installed, vec![h.fixture.join("bld/generic/.minecraft/mods/mcil.jar")]);
    assert_eq!(h.fixture.read_file("tmp/mcil.jar").unwrap(), "jar");
    assert_eq!(h.network.request_count("https://cdn.test/mcil.jar"), 1);
}

#[tokio::test]
async fn bootstrap_downloads_are_skipped_when_staged() {
    let context = legacy_context();
    let h = harness(&LEGACY_FORGE, bootstrap_mock(&context));
    h.builder.ensure_directories().unwrap();
    h.fixture.write_file("tmp/mcil.jar", "cached").unwrap();
    let resolver = Resolver::new(h.registry.clone(), context);

    h.builder.install_bootstrap_mods(&resolver).await.unwrap();

    assert_eq!(h.network.request_count("https://cdn.test/mcil.jar"), 0);
    assert_eq!(h.fixture.read_file("bld/generic/.minecraft/mods/mcil.jar").unwrap(), "cached");
}

#[tokio::test]
async fn legacy_loader_jar_lands_in_technic_bin() {
    let h = harness(&LEGACY_FORGE, MockNetworkProvider::new().with_body(FORGE_JAR, "forge"));
    h.builder.ensure_directories().unwrap();

    let installed = h.builder.install_loader_jar(&legacy_context()).await.unwrap();

    assert_eq!(installed, Some(h.fixture.join("bld/technic/bin/modpack.jar")));
    assert_eq!(h.fixture.read_file("bld/technic/bin/modpack.jar").unwrap(), "forge");
}

#[tokio::test]
async fn fabric_loader_jar_is_a_no_op() {
    let h = harness(&STANDARD, MockNetworkProvider::new());

    let installed = h
        .builder
        .install_loader_jar(&LoaderContext::new("fabric", "1.20.1"))
        .await
        .unwrap();

    assert_eq!(installed, None);
    assert!(h.network.requests().is_empty());
}

#[tokio::test]
async fn shim_unpacks_companion_and_installs_primary() {
    let scratch = TempDirFixture::new().unwrap();
    let companion = scratch.join("lwjgl3ify-multimc.zip");
    write_single_entry(&companion, "patches/me.eigenraven.lwjgl3ify.json", b"{}").unwrap();

    let assets = "http://github.test/repos/GTNewHorizons/lwjgl3ify/releases/1/assets";
    let network = MockNetworkProvider::new()
        .with_json(
            "http://github.test/repos/GTNewHorizons/lwjgl3ify/releases",
            &json!([{ "assets_url": assets }]),
        )
        .with_json(
            assets,
            &json!([
                { "name": "lwjgl3ify-2.0.jar", "browser_download_url": "https://dl.test/lwjgl3ify-2.0.jar" },
                { "name": "lwjgl3ify-2.0-dev.jar", "browser_download_url": "https://dl.test/lwjgl3ify-2.0-dev.jar" },
                { "name": "lwjgl3ify-2.0-multimc.zip", "browser_download_url": "https://dl.test/lwjgl3ify-2.0-multimc.zip" }
            ]),
        )
        .with_body("https://dl.test/lwjgl3ify-2.0.jar", "shim")
        .with_body(
            "https://dl.test/lwjgl3ify-2.0-multimc.zip",
            std::fs::read(&companion).unwrap(),
        );
    let h = harness(&LEGACY_FORGE, network);
    h.builder.ensure_directories().unwrap();

    h.builder
        .install_shims(&h.registry, &legacy_context())
        .await
        .unwrap();

    assert!(h.fixture.file_exists("bld/polymc/patches/me.eigenraven.lwjgl3ify.json"));
    assert_eq!(h.fixture.read_file("bld/polymc/.minecraft/mods/lwjgl3ify-2.0.jar").unwrap(), "shim");
    assert_eq!(h.network.request_count("https://dl.test/lwjgl3ify-2.0-dev.jar"), 0);
}

#[test]
fn component_pins_follow_profile() {
    let legacy = harness(&LEGACY_FORGE, MockNetworkProvider::new());
    assert_eq!(
        legacy.builder.install_component_pins().unwrap(),
        Some(PinSource::Builtin)
    );
    assert!(legacy.fixture.file_exists("bld/multimc/mmc-pack.json"));

    let standard = harness(&STANDARD, MockNetworkProvider::new());
    assert_eq!(standard.builder.install_component_pins().unwrap(), None);
}
