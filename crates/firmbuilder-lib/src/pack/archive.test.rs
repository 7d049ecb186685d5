use super::*;
use std::io::{Cursor, Read};
use tempfile::TempDir;

fn entry_names(archive: &Path) -> Vec<String> {
    let bytes = std::fs::read(archive).unwrap();
    let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

fn sample_tree(root: &Path) -> PathBuf {
    let source = root.join("technic");
    std::fs::create_dir_all(source.join("mods")).unwrap();
    std::fs::create_dir_all(source.join("bin")).unwrap();
    std::fs::write(source.join("mods/b.jar"), b"bbb").unwrap();
    std::fs::write(source.join("mods/a.jar"), b"aaa").unwrap();
    std::fs::write(source.join("options.txt"), b"fov:70").unwrap();
    source
}

#[test]
fn entries_are_rooted_at_source_directory_name() {
    let temp = TempDir::new().unwrap();
    let source = sample_tree(temp.path());
    let output = temp.path().join("out/technic.zip");

    let count = zip_dir(&source, &output).unwrap();

    assert_eq!(
        entry_names(&output),
        vec![
            "technic/",
            "technic/bin/",
            "technic/mods/",
            "technic/mods/a.jar",
            "technic/mods/b.jar",
            "technic/options.txt",
        ]
    );
    assert_eq!(count, 6);
}

#[test]
fn archiving_same_tree_twice_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let source = sample_tree(temp.path());
    let first = temp.path().join("first.zip");
    let second = temp.path().join("second.zip");

    zip_dir(&source, &first).unwrap();
    zip_dir(&source, &second).unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn zip_then_extract_restores_contents() {
    let temp = TempDir::new().unwrap();
    let source = sample_tree(temp.path());
    let output = temp.path().join("technic.zip");
    let unpacked = temp.path().join("unpacked");

    zip_dir(&source, &output).unwrap();
    let files = extract(&output, &unpacked).unwrap();

    assert_eq!(files, 3);
    assert_eq!(std::fs::read(unpacked.join("technic/mods/a.jar")).unwrap(), b"aaa");
    assert_eq!(std::fs::read(unpacked.join("technic/options.txt")).unwrap(), b"fov:70");
    assert!(unpacked.join("technic/bin").is_dir());
}

#[test]
fn zip_dir_rejects_missing_source() {
    let temp = TempDir::new().unwrap();
    let result = zip_dir(&temp.path().join("absent"), &temp.path().join("x.zip"));
    assert!(matches!(result, Err(ArchiveError::InvalidSource { .. })));
}

#[test]
fn single_entry_archive_holds_one_file() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("config/pack.mcinstance");

    write_single_entry(&output, "resources.packconfig", b"[jei]\ntype = modrinth\n").unwrap();

    assert_eq!(entry_names(&output), vec!["resources.packconfig"]);
    let bytes = std::fs::read(&output).unwrap();
    let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut contents = String::new();
    zip.by_index(0).unwrap().read_to_string(&mut contents).unwrap();
    assert_eq!(contents, "[jei]\ntype = modrinth\n");
}

#[test]
fn extract_rejects_entries_escaping_output() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("evil.zip");
    write_single_entry(&archive, "../escape.txt", b"nope").unwrap();

    let result = extract(&archive, &temp.path().join("out"));

    assert!(matches!(result, Err(ArchiveError::UnsafeEntry { .. })));
    assert!(!temp.path().join("escape.txt").exists());
}

#[test]
fn extract_streams_entries_of_any_size() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("bundle.zip");
    let large: Vec<u8> = (0..3 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
    write_single_entry(&archive, "natives/lwjgl.so", &large).unwrap();

    let files = extract(&archive, &temp.path().join("out")).unwrap();

    assert_eq!(files, 1);
    assert_eq!(std::fs::read(temp.path().join("out/natives/lwjgl.so")).unwrap(), large);
}

#[test]
fn extract_writes_empty_entries() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("empty.zip");
    write_single_entry(&archive, "servers.dat", b"").unwrap();

    extract(&archive, &temp.path().join("out")).unwrap();

    assert_eq!(std::fs::metadata(temp.path().join("out/servers.dat")).unwrap().len(), 0);
}
