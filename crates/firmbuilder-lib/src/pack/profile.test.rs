use super::*;

#[test]
fn test_forge_1_7_10_selects_legacy_profile() {
    let profile = select_profile(&LoaderContext::new("forge", "1.7.10"));

    assert_eq!(profile.name, "legacy-forge");
    assert_eq!(profile.bootstrap_mods, &["cUtsYbG5", "ghjoiQAl"]);
    assert!(profile.instance_descriptor);
    assert!(profile.instance_loader_manifest);
    assert!(profile.produces(Target::Technic));
    assert!(profile.produces(Target::PolyMc));
}

#[test]
fn test_modern_forge_selects_standard_profile() {
    let profile = select_profile(&LoaderContext::new("forge", "1.20.1"));

    assert_eq!(profile.name, "standard");
    assert!(profile.bootstrap_mods.is_empty());
    assert!(profile.loader_jar.is_none());
    assert!(profile.shims.is_empty());
    assert!(!profile.produces(Target::Technic));
    assert!(!profile.produces(Target::PolyMc));
}

#[test]
fn test_match_is_exact() {
    for (loader, version) in [("fabric", "1.7.10"), ("Forge", "1.7.10"), ("forge", "1.7.1")] {
        assert_eq!(
            select_profile(&LoaderContext::new(loader, version)).name,
            "standard",
            "{} {}",
            loader,
            version
        );
    }
}

#[test]
fn test_archived_targets_skip_generic() {
    let legacy: Vec<Target> = LEGACY_FORGE.archived_targets().collect();
    assert_eq!(
        legacy,
        vec![
            Target::MultiMc,
            Target::PolyMc,
            Target::Technic,
            Target::CurseForge,
            Target::Modrinth
        ]
    );

    let standard: Vec<Target> = STANDARD.archived_targets().collect();
    assert_eq!(standard, vec![Target::Modrinth]);
}

#[test]
fn test_profile_extras_target_produced_trees() {
    for profile in BUILTIN_PROFILES {
        if let Some(jar) = profile.loader_jar {
            assert!(profile.produces(jar.target), "{}", profile.name);
        }
        for shim in profile.shims {
            assert!(profile.produces(shim.target), "{}", profile.name);
        }
        if let Some(pins) = profile.component_pins {
            assert!(profile.produces(pins.target), "{}", profile.name);
        }
    }
}

#[test]
fn test_standard_marks_fabric_unimplemented() {
    assert!(STANDARD.unimplemented_loaders.contains(&"fabric"));
}
