use super::*;
use crate::api::ModrinthClient;
use crate::pack::LoaderContext;
use crate::testing::{MockNetworkProvider, TempDirFixture};
use serde_json::json;

const MODRINTH: &str = "http://modrinth.test";

fn endpoints() -> ProviderEndpoints {
    ProviderEndpoints {
        modrinth: MODRINTH.to_string(),
        ..ProviderEndpoints::default()
    }
}

fn versions_url(project_id: &str, context: &LoaderContext) -> String {
    ModrinthClient::with_base_url(Arc::new(MockNetworkProvider::new()), MODRINTH.to_string())
        .versions_url(project_id, context)
}

fn orchestrator(fixture: &TempDirFixture, network: Arc<MockNetworkProvider>) -> BuildOrchestrator {
    BuildOrchestrator::new(
        fixture.path().to_path_buf(),
        fixture.join("pack.json"),
        network,
        endpoints(),
    )
}

fn fabric_pack(fixture: &TempDirFixture) {
    fixture
        .write_file(
            "pack.json",
            json!({
                "name": "Sky",
                "loader": "fabric",
                "version": "1.0.0",
                "mcv": "1.12.2",
                "mods": [
                    { "name": "X", "type": "modrinth", "projectid": "cUtsYbG5" },
                    { "name": "Gone", "type": "modrinth", "projectid": "missing" },
                    { "name": "Raw", "type": "url", "projectid": "https://files.test/raw.jar" }
                ]
            })
            .to_string(),
        )
        .unwrap();
}

fn fabric_network() -> MockNetworkProvider {
    let context = LoaderContext::new("fabric", "1.12.2");
    MockNetworkProvider::new()
        .with_json(
            versions_url("cUtsYbG5", &context),
            &json!([{
                "id": "ver1",
                "files": [{
                    "filename": "x.jar",
                    "url": "https://cdn.test/x.jar",
                    "hashes": { "sha1": "abc123" },
                    "size": 42
                }]
            }]),
        )
        .with_json(versions_url("missing", &context), &json!([]))
}

#[tokio::test]
async fn standard_build_produces_modrinth_archive_only() {
    let fixture = TempDirFixture::new().unwrap();
    fabric_pack(&fixture);
    fixture.write_file("src/config/sky.cfg", "cfg").unwrap();
    let network = Arc::new(fabric_network());

    let results = orchestrator(&fixture, network.clone())
        .execute_build_pipeline()
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].target, Target::Modrinth);
    assert_eq!(results[0].output_path, fixture.join("out/modrinth.zip"));
    assert_eq!(results[0].artifacts[0].name, "modrinth.zip");
    assert!(results[0].artifacts[0].size > 0);

    assert!(fixture.file_exists("bld/modrinth/overrides/config/sky.cfg"));
    assert!(!fixture.file_exists("bld/technic"));
    assert!(!fixture.file_exists("out/multimc.zip"));

    let index: ModrinthIndex =
        serde_json::from_str(&fixture.read_file("bld/modrinth/modrinth.index.json").unwrap())
            .unwrap();
    let paths: Vec<&str> = index.files.iter().map(|file| file.path.as_str()).collect();
    assert_eq!(paths, vec!["mods/x.jar", "mods/raw.jar"]);
    assert_eq!(index.files[0].hashes.sha1, "abc123");
    assert_eq!(index.files[0].file_size, 42);

    // Manifest-only: nothing is downloaded for a standard pack
    assert_eq!(network.request_count("https://cdn.test/x.jar"), 0);
    assert_eq!(network.request_count("https://files.test/raw.jar"), 0);
}

#[tokio::test]
async fn rebuild_starts_from_empty_build_dir() {
    let fixture = TempDirFixture::new().unwrap();
    fabric_pack(&fixture);
    let network = Arc::new(fabric_network());
    let orchestrator = orchestrator(&fixture, network);

    orchestrator.execute_build_pipeline().await.unwrap();
    fixture.write_file("bld/generic/stale.txt", "old").unwrap();
    orchestrator.execute_build_pipeline().await.unwrap();

    assert!(!fixture.file_exists("bld/generic/stale.txt"));
}

#[tokio::test]
async fn transport_failure_aborts_build() {
    let fixture = TempDirFixture::new().unwrap();
    fabric_pack(&fixture);
    let context = LoaderContext::new("fabric", "1.12.2");
    let network = Arc::new(fabric_network().with_status(versions_url("cUtsYbG5", &context), 500));

    let result = orchestrator(&fixture, network).execute_build_pipeline().await;

    assert!(matches!(result, Err(BuildError::Resolve(_))));
    assert!(!fixture.file_exists("out/modrinth.zip"));
}

#[tokio::test]
async fn missing_pack_file_is_fatal() {
    let fixture = TempDirFixture::new().unwrap();
    let result = orchestrator(&fixture, Arc::new(MockNetworkProvider::new()))
        .execute_build_pipeline()
        .await;

    assert!(matches!(result, Err(BuildError::PackSpec(_))));
}

#[test]
fn clean_removes_outputs_and_staging() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("bld/generic/a.txt", "a").unwrap();
    fixture.write_file("tmp/b.jar", "b").unwrap();
    fixture.write_file("src/mods/keep.jar", "k").unwrap();

    let removed = orchestrator(&fixture, Arc::new(MockNetworkProvider::new()))
        .clean()
        .unwrap();

    assert_eq!(removed, vec![fixture.join("bld"), fixture.join("tmp")]);
    assert!(fixture.file_exists("src/mods/keep.jar"));
}

#[test]
fn create_artifact_reports_size() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("out/curse.zip", "12345").unwrap();

    let artifact = create_artifact(&fixture.join("out/curse.zip")).unwrap();

    assert_eq!(artifact.name, "curse.zip");
    assert_eq!(artifact.size, 5);
}
