//! Tests for the sink adapters

use tempfile::TempDir;

use varmap::sink::{DirSink, MemorySink, VariantSink};

#[test]
fn given_dir_sink_when_ensuring_container_twice_then_single_directory() {
    let temp = TempDir::new().unwrap();
    let mut sink = DirSink::new(temp.path());
    let root = sink.root();

    let first = sink.ensure_container(&root, "Acme_VS").unwrap();
    let second = sink.ensure_container(&root, "Acme_VS").unwrap();

    assert_eq!(first, second);
    assert!(temp.path().join("Acme_VS").is_dir());
    let entries = std::fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn given_dir_sink_when_ensuring_item_twice_then_existing_content_is_kept() {
    let temp = TempDir::new().unwrap();
    let mut sink = DirSink::new(temp.path());
    let root = sink.root();
    let container = sink.ensure_container(&root, "Color").unwrap();

    let first = sink.ensure_item(&container, "Red").unwrap();
    let item_path = temp.path().join("Color").join("Red");
    std::fs::write(&item_path, "annotated").unwrap();

    let second = sink.ensure_item(&container, "Red").unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read_to_string(&item_path).unwrap(), "annotated");
}

#[test]
fn given_dir_sink_when_nesting_containers_then_directories_nest() {
    let temp = TempDir::new().unwrap();
    let mut sink = DirSink::new(temp.path());
    let root = sink.root();

    let product = sink.ensure_container(&root, "Widget").unwrap();
    let set = sink.ensure_container(&product, "Color").unwrap();
    sink.ensure_item(&set, "Red").unwrap();

    assert!(temp.path().join("Widget").join("Color").join("Red").is_file());
}

#[test]
fn given_memory_sink_as_trait_object_when_ensuring_then_idempotent() {
    let mut memory = MemorySink::new("/game");
    let sink: &mut dyn VariantSink = &mut memory;
    let root = sink.root();

    let c1 = sink.ensure_container(&root, "Widget").unwrap();
    let c2 = sink.ensure_container(&root, "Widget").unwrap();
    let i1 = sink.ensure_item(&c1, "Red").unwrap();
    let i2 = sink.ensure_item(&c2, "Red").unwrap();

    assert_eq!(c1, c2);
    assert_eq!(i1, i2);
    assert_eq!(memory.containers().len(), 1);
    assert_eq!(memory.items().len(), 1);
}
