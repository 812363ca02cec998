//! Staging a resource tree through the storage port

use pkt_storage::{BuildStorage, LocalDirectoryStorage, StorageError};
use std::fs;
use std::path::Path;

fn stage_all(storage: &dyn BuildStorage, prefix: &str, destination: &Path) -> Result<usize, StorageError> {
    let names = storage.list(prefix)?;
    for name in &names {
        let source = storage.fetch(name)?;
        let relative = name.trim_start_matches(prefix);
        let target = destination.join(relative);
        fs::create_dir_all(target.parent().unwrap())?;
        fs::copy(source, target)?;
    }
    Ok(names.len())
}

#[test]
fn test_round_trip_resource_tree() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalDirectoryStorage::new(dir.path().join("archive")).unwrap();

    let source = dir.path().join("source");
    fs::create_dir_all(source.join("construction_approach")).unwrap();
    fs::write(source.join("Master_Edge_List_Dict.json"), "{\"a-b\": {}}").unwrap();
    fs::write(
        source.join("construction_approach/subclass_construction_map.json"),
        "{\"2\": [\"SO_0001217\"]}",
    )
    .unwrap();

    storage
        .store(&source.join("Master_Edge_List_Dict.json"), "resources/Master_Edge_List_Dict.json")
        .unwrap();
    storage
        .store(
            &source.join("construction_approach/subclass_construction_map.json"),
            "resources/construction_approach/subclass_construction_map.json",
        )
        .unwrap();

    let staged = dir.path().join("staged");
    assert_eq!(stage_all(&storage, "resources/", &staged).unwrap(), 2);
    assert_eq!(
        fs::read_to_string(staged.join("construction_approach/subclass_construction_map.json")).unwrap(),
        "{\"2\": [\"SO_0001217\"]}"
    );
}

#[test]
fn test_stored_digest_tracks_content() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalDirectoryStorage::new(dir.path().join("archive")).unwrap();
    let local = dir.path().join("graph.nt");

    fs::write(&local, "<http://a/x> <http://a/p> <http://a/y> .\n").unwrap();
    let first = storage.store(&local, "kg/graph.nt").unwrap();
    let again = storage.store(&local, "kg/graph.nt").unwrap();
    assert_eq!(first.sha256, again.sha256);

    fs::write(&local, "").unwrap();
    let changed = storage.store(&local, "kg/graph.nt").unwrap();
    assert_ne!(first.sha256, changed.sha256);
    assert_eq!(changed.size_bytes, 0);
}
