use super::*;

#[test]
fn test_creates_temp_dir_and_writes_file() -> io::Result<()> {
    let fixture = TempDirFixture::new()?;

    fixture.create_dir("src/config")?;
    fixture.write_file("src/config/options.cfg", "renderDistance=8")?;

    assert!(fixture.file_exists("src/config/options.cfg"));
    assert_eq!(fixture.read_file("src/config/options.cfg")?, "renderDistance=8");
    assert!(fixture.join("src/config").is_dir());

    Ok(())
}

#[test]
fn test_write_file_creates_parents() -> io::Result<()> {
    let fixture = TempDirFixture::new()?;

    fixture.write_file("tmp/nested/deep/mod.jar", [0u8, 1, 2])?;

    assert_eq!(fs::read(fixture.join("tmp/nested/deep/mod.jar"))?, vec![0, 1, 2]);
    Ok(())
}

#[test]
fn test_temp_dir_isolation() -> io::Result<()> {
    let fixture1 = TempDirFixture::new()?;
    let fixture2 = TempDirFixture::new()?;

    assert_ne!(fixture1.path(), fixture2.path());

    fixture1.write_file("pack.json", "{}")?;
    assert!(fixture1.file_exists("pack.json"));
    assert!(!fixture2.file_exists("pack.json"));

    Ok(())
}
