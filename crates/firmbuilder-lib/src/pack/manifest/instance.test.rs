use super::*;
use tempfile::TempDir;

#[test]
fn descriptor_lines() {
    assert_eq!(
        instance_descriptor("GT New Horizons"),
        "InstanceType=OneSix\niconKey=flame\nname=GT New Horizons\n"
    );
}

#[test]
fn write_descriptor_creates_parent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bld/generic").join(INSTANCE_FILE);

    write_instance_descriptor(&path, "Pack").unwrap();

    assert!(std::fs::read_to_string(&path).unwrap().ends_with("name=Pack\n"));
}

#[test]
fn builtin_pins_describe_forge_on_lwjgl2() {
    let pins = builtin_component_pins();
    let uids: Vec<&str> = pins["components"]
        .as_array()
        .unwrap()
        .iter()
        .map(|component| component["uid"].as_str().unwrap())
        .collect();

    assert_eq!(pins["formatVersion"], 1);
    assert_eq!(uids, vec!["org.lwjgl", "net.minecraft", "net.minecraftforge"]);
    assert_eq!(pins["components"][0]["version"], "2.9.4-nightly-20150209");
    assert_eq!(pins["components"][2]["version"], "10.13.4.1614");
}

#[test]
fn workdir_pins_are_copied_verbatim() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("8.json");
    let dest = temp.path().join("bld/multimc/mmc-pack.json");
    std::fs::write(&source, b"{\"custom\": true}").unwrap();

    assert_eq!(write_component_pins(&source, &dest).unwrap(), PinSource::Workdir);
    assert_eq!(std::fs::read(&dest).unwrap(), b"{\"custom\": true}");
}

#[test]
fn missing_pins_fall_back_to_builtin() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("mmc-pack.json");

    let source = write_component_pins(&temp.path().join("8.json"), &dest).unwrap();

    assert_eq!(source, PinSource::Builtin);
    let written: Value = serde_json::from_str(&std::fs::read_to_string(&dest).unwrap()).unwrap();
    assert_eq!(written, builtin_component_pins());
}
