//! Hermetic test environment for E2E testing
//!
//! A `TestEnvironment` is a throwaway workdir. `HermeticSessionBuilder`
//! pairs one with a recording `MockNetworkProvider` pre-loaded with catalog
//! routes, so whole builds run without touching the network.

use crate::fixtures::{self, BOOTSTRAP_MODS, FORGE_UNIVERSAL, SHIM_REPOSITORY};
use anyhow::{Context, Result};
use firmbuilder_lib::application::{AppConfig, CommandSession, LiveConfigProvider};
use firmbuilder_lib::networking::HashAlgorithm;
use firmbuilder_lib::pack::LoaderContext;
use firmbuilder_lib::testing::MockNetworkProvider;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Isolated workdir holding `pack.json`, `src/` and every build output
pub struct TestEnvironment {
    /// Keeps the directory alive for the lifetime of the test
    pub temp_dir: TempDir,
    pub work_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let work_path = temp_dir.path().join("work");
        fs::create_dir_all(&work_path)?;

        Ok(Self {
            temp_dir,
            work_path,
        })
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.work_path.join(relative)
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    pub fn write_file(&self, relative: &str, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
    }

    pub fn write_pack(&self, pack: &Value) -> Result<()> {
        self.write_file("pack.json", serde_json::to_string_pretty(pack)?)
    }

    pub fn read_to_string(&self, relative: &str) -> Result<String> {
        let path = self.path(relative);
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }

    pub fn read_json(&self, relative: &str) -> Result<Value> {
        Ok(serde_json::from_str(&self.read_to_string(relative)?)?)
    }

    /// Entry names of a zip under the workdir, in archive order
    pub fn archive_entries(&self, relative: &str) -> Result<Vec<String>> {
        let archive = open_archive(&self.path(relative))?;
        Ok(archive.file_names().map(str::to_string).collect())
    }

    /// Contents of one entry of a zip under the workdir
    pub fn archive_entry(&self, relative: &str, entry: &str) -> Result<Vec<u8>> {
        let mut archive = open_archive(&self.path(relative))?;
        let mut file = archive
            .by_name(entry)
            .with_context(|| format!("{} has no entry {}", relative, entry))?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// App configuration pointing every provider at the mock hosts
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            workdir: Some(self.work_path.clone()),
            no_log_file: true,
            modrinth_base_url: fixtures::MODRINTH.to_string(),
            curseforge_base_url: fixtures::CURSEFORGE.to_string(),
            github_base_url: fixtures::GITHUB.to_string(),
            ..AppConfig::default()
        }
    }
}

fn open_archive(path: &Path) -> Result<zip::ZipArchive<fs::File>> {
    let file = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(zip::ZipArchive::new(file)?)
}

/// Builder for hermetic sessions with coordinated mock routes
pub struct HermeticSessionBuilder {
    env: TestEnvironment,
    network: MockNetworkProvider,
}

impl HermeticSessionBuilder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            env: TestEnvironment::new()?,
            network: MockNetworkProvider::new(),
        })
    }

    pub fn with_pack(self, pack: &Value) -> Result<Self> {
        self.env.write_pack(pack)?;
        Ok(self)
    }

    /// Drop a file under `src/`
    pub fn with_source_file(self, relative: &str, contents: &str) -> Result<Self> {
        self.env.write_file(&format!("src/{}", relative), contents)?;
        Ok(self)
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.network = self.network.with_body(url, body);
        self
    }

    pub fn with_json(mut self, url: impl Into<String>, value: &Value) -> Self {
        self.network = self.network.with_json(url, value);
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.network = self.network.with_status(url, status);
        self
    }

    /// Modrinth project with one downloadable version whose SHA-1 matches `body`
    pub fn with_modrinth_mod(
        self,
        context: &LoaderContext,
        project_id: &str,
        version_id: &str,
        filename: &str,
        body: &[u8],
    ) -> Result<Self> {
        let sha1 = fixtures::digest(body, HashAlgorithm::Sha1)?;
        let listing = fixtures::modrinth_listing(
            project_id,
            version_id,
            filename,
            Some(&sha1),
            body.len() as u64,
        );
        Ok(self
            .with_json(fixtures::modrinth_versions_url(project_id, context), &listing)
            .with_body(fixtures::modrinth_download_url(project_id, filename), body.to_vec()))
    }

    /// GitHub repository whose latest release carries `assets`
    pub fn with_github_release(self, repository: &str, assets: &[(&str, Vec<u8>)]) -> Self {
        let names: Vec<&str> = assets.iter().map(|(name, _)| *name).collect();
        let mut builder = self
            .with_json(
                fixtures::github_releases_url(repository),
                &fixtures::github_release(repository),
            )
            .with_json(
                fixtures::github_assets_url(repository),
                &fixtures::github_assets(repository, &names),
            );
        for (name, body) in assets {
            builder = builder.with_body(fixtures::github_download_url(repository, name), body.clone());
        }
        builder
    }

    /// Routes every Forge 1.7.10 build needs beyond the pack's own mods
    ///
    /// Bootstrap mods, the pinned Forge universal jar and the LWJGL3 shim
    /// with its `multimc` companion archive.
    pub fn with_legacy_forge_support(self) -> Result<Self> {
        let context = LoaderContext::new("forge", "1.7.10");
        let companion = fixtures::zip_bytes(&[
            ("patches/me.eigenraven.lwjgl3ify.json", b"{\"uid\":\"lwjgl3ify\"}".as_slice()),
            ("patches/org.lwjgl3.json", b"{\"uid\":\"org.lwjgl3\"}".as_slice()),
        ])?;

        Ok(self
            .with_modrinth_mod(
                &context,
                BOOTSTRAP_MODS[0],
                "mcil-1.4.0",
                "mcinstanceloader-1.4.0.jar",
                b"instance loader",
            )?
            .with_modrinth_mod(
                &context,
                BOOTSTRAP_MODS[1],
                "unimixins-0.1.19",
                "unimixins-all-1.7.10-0.1.19.jar",
                b"unimixins",
            )?
            .with_body(FORGE_UNIVERSAL, b"forge universal".to_vec())
            .with_github_release(
                SHIM_REPOSITORY,
                &[
                    ("lwjgl3ify-2.1.5.jar", b"lwjgl3ify".to_vec()),
                    ("lwjgl3ify-2.1.5-dev.jar", b"dev".to_vec()),
                    ("lwjgl3ify-2.1.5-forgePatches.jar", b"patches".to_vec()),
                    ("lwjgl3ify-2.1.5-multimc.zip", companion),
                ],
            ))
    }

    /// Finish the session; the network handle stays shared for assertions
    pub fn build(
        self,
    ) -> Result<(
        CommandSession<LiveConfigProvider>,
        Arc<MockNetworkProvider>,
        TestEnvironment,
    )> {
        let network = Arc::new(self.network);
        let session = CommandSession::new_with_providers(
            LiveConfigProvider::new(self.env.app_config()),
            network.clone(),
        );
        Ok((session, network, self.env))
    }
}
