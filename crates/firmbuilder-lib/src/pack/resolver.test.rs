use super::*;
use crate::api::{ArtifactProvider, Candidate, ProviderFuture};
use crate::networking::ContentHash;

/// Provider answering from a fixed table; unknown ids are "not found"
struct StubProvider {
    kind: ProviderKind,
    table: HashMap<String, Vec<Candidate>>,
}

impl StubProvider {
    fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            table: HashMap::new(),
        }
    }

    fn with(mut self, id: &str, candidates: Vec<Candidate>) -> Self {
        self.table.insert(id.to_string(), candidates);
        self
    }
}

impl ArtifactProvider for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn resolve<'a>(&'a self, identifier: &'a str, _context: &'a LoaderContext) -> ProviderFuture<'a> {
        let result = match identifier {
            "explode" => Err(ProviderError::InvalidUrl {
                url: "explode".to_string(),
            }),
            _ => Ok(self.table.get(identifier).cloned().unwrap_or_default()),
        };
        Box::pin(async move { result })
    }
}

fn candidate(kind: ProviderKind, id: &str, filename: &str) -> Candidate {
    Candidate {
        kind,
        provider_id: Some(id.to_string()),
        url: format!("https://cdn.test/{}", filename),
        filename: filename.to_string(),
        hash: Some(ContentHash::sha1(format!("sha-{}", id))),
        size: Some(10),
        companion_url: None,
    }
}

fn reference(name: &str, kind: ProviderKind, project_id: &str) -> ModReference {
    ModReference {
        name: name.to_string(),
        kind,
        project_id: project_id.to_string(),
        file_id: None,
        side: String::new(),
        destination: None,
    }
}

fn resolver() -> Resolver {
    let registry = ProviderRegistry::new()
        .with_provider(Box::new(
            StubProvider::new(ProviderKind::Modrinth)
                .with("cUtsYbG5", vec![candidate(ProviderKind::Modrinth, "ver1", "x.jar")])
                .with("dup", vec![candidate(ProviderKind::Modrinth, "ver2", "x.jar")])
                .with(
                    "two",
                    vec![
                        candidate(ProviderKind::Modrinth, "new", "two-2.jar"),
                        candidate(ProviderKind::Modrinth, "old", "two-1.jar"),
                    ],
                ),
        ))
        .with_provider(Box::new(StubProvider::new(ProviderKind::CurseForge).with(
            "32274",
            vec![candidate(ProviderKind::CurseForge, "4500200", "journeymap.jar")],
        )));

    Resolver::new(Arc::new(registry), LoaderContext::new("forge", "1.7.10"))
}

#[tokio::test]
async fn test_destination_follows_override_rule() {
    let resolver = resolver();
    let mut overridden = reference("X", ProviderKind::Modrinth, "cUtsYbG5");
    overridden.destination = Some("mods/1.7.10/".to_string());

    for (reference, prefix) in [
        (reference("X", ProviderKind::Modrinth, "cUtsYbG5"), None),
        (overridden, Some("mods/1.7.10/")),
    ] {
        let artifact = resolver.resolve(&reference).await.unwrap().unwrap();
        let expected = match prefix {
            Some(prefix) => format!("{}{}", prefix, artifact.filename),
            None => format!("mods/{}", artifact.filename),
        };
        assert_eq!(artifact.destination, expected);
        assert_eq!(artifact.destination_override.as_deref(), prefix);
    }
}

#[tokio::test]
async fn test_first_candidate_is_selected() {
    let artifact = resolver()
        .resolve(&reference("Two", ProviderKind::Modrinth, "two"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(artifact.provider_id.as_deref(), Some("new"));
    assert_eq!(artifact.filename, "two-2.jar");
}

#[tokio::test]
async fn test_curseforge_file_id_used_verbatim() {
    let mut journeymap = reference("Journeymap", ProviderKind::CurseForge, "32274");
    journeymap.file_id = Some("1111".to_string());

    let artifact = resolver().resolve(&journeymap).await.unwrap().unwrap();

    assert_eq!(artifact.provider_id.as_deref(), Some("1111"));
    // Location still comes from the provider's latest file
    assert_eq!(artifact.filename, "journeymap.jar");
}

#[tokio::test]
async fn test_file_id_ignored_for_modrinth() {
    let mut x = reference("X", ProviderKind::Modrinth, "cUtsYbG5");
    x.file_id = Some("pinned".to_string());

    let artifact = resolver().resolve(&x).await.unwrap().unwrap();
    assert_eq!(artifact.provider_id.as_deref(), Some("ver1"));
}

#[tokio::test]
async fn test_not_found_is_omitted() {
    let resolver = resolver();
    let missing = reference("Missing", ProviderKind::Modrinth, "nope");

    assert!(resolver.resolve(&missing).await.unwrap().is_none());

    let references = vec![
        reference("X", ProviderKind::Modrinth, "cUtsYbG5"),
        missing,
        reference("Journeymap", ProviderKind::CurseForge, "32274"),
    ];
    let set = resolver.resolve_all("test", &references).await.unwrap();

    let names: Vec<&str> = set.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["X", "Journeymap"]);
}

#[tokio::test]
async fn test_provider_failure_is_fatal() {
    let err = resolver()
        .resolve(&reference("Boom", ProviderKind::Modrinth, "explode"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Boom"));
}

#[tokio::test]
async fn test_unregistered_provider_is_fatal() {
    let err = resolver()
        .resolve(&reference("Gh", ProviderKind::Github, "owner/repo"))
        .await
        .unwrap_err();

    let ResolveError::Provider { source, .. } = err;
    assert!(matches!(source, ProviderError::Unsupported { .. }));
}

#[tokio::test]
async fn test_destination_collision_later_reference_wins_in_place() {
    let references = vec![
        reference("First", ProviderKind::Modrinth, "cUtsYbG5"),
        reference("Journeymap", ProviderKind::CurseForge, "32274"),
        reference("Second", ProviderKind::Modrinth, "dup"),
    ];

    let set = resolver().resolve_all("test", &references).await.unwrap();

    assert_eq!(set.len(), 2);
    let names: Vec<&str> = set.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Second", "Journeymap"]);
    assert_eq!(set.get("mods/x.jar").unwrap().provider_id.as_deref(), Some("ver2"));
}

#[test]
fn test_resolved_set_insert_returns_replaced() {
    let artifact = |name: &str| ResolvedArtifact {
        name: name.to_string(),
        kind: ProviderKind::Url,
        project_id: "https://cdn.test/a.jar".to_string(),
        provider_id: None,
        url: "https://cdn.test/a.jar".to_string(),
        filename: "a.jar".to_string(),
        hash: None,
        size: None,
        destination_override: None,
        destination: "mods/a.jar".to_string(),
        side: String::new(),
    };

    let mut set = ResolvedSet::new();
    assert!(set.is_empty());
    assert!(set.insert(artifact("one")).is_none());
    let replaced = set.insert(artifact("two")).unwrap();

    assert_eq!(replaced.name, "one");
    assert_eq!(set.len(), 1);
}
