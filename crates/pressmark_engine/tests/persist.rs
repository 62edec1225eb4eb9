use std::fs;

use pressmark_core::{PostItem, RawItem};
use pressmark_engine::{ensure_output_dir, AtomicFileWriter, OutputWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("site").join("assets");
    assert!(!nested.exists());
    ensure_output_dir(&nested).unwrap();
    ensure_output_dir(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("doc.markdown", "hello").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write_bytes("doc.markdown", b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("doc.markdown", "data").is_err());
    assert!(!file_path.with_file_name("doc.markdown").exists());
}

#[test]
fn output_writer_places_item_under_type_directory() {
    let temp = TempDir::new().unwrap();
    let raw = RawItem {
        title: "About".into(),
        status: "publish".into(),
        post_type: Some("page".into()),
        post_date: "2021-01-02 03:04:05".into(),
        ..RawItem::default()
    };
    let item = PostItem::from_raw(&raw).unwrap();
    let writer = OutputWriter::new(temp.path().to_path_buf());

    writer.write(&item, "first").unwrap();
    let path = writer.write(&item, "second").unwrap();

    assert_eq!(path, temp.path().join("_pages").join("2021-01-02-about.markdown"));
    assert_eq!(fs::read_to_string(path).unwrap(), "second");
}
