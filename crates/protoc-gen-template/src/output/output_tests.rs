#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

fn generated(path: &str, content: &str) -> GeneratedFile {
    GeneratedFile {
        path: path.into(),
        content: content.into(),
    }
}

fn names(files: &[File]) -> Vec<&str> {
    files.iter().map(|f| f.name()).collect()
}

#[test]
fn collect___overwrite___keeps_existing_paths() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("order.ts"), "old").unwrap();

    let files = collect(vec![generated("order.ts", "new")], true, dir.path());

    assert_eq!(names(&files), vec!["order.ts"]);
    assert_eq!(files[0].content(), "new");
}

#[test]
fn collect___no_overwrite___skips_existing_paths() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("order.ts"), "old").unwrap();

    let files = collect(
        vec![generated("order.ts", "new"), generated("customer.ts", "new")],
        false,
        dir.path(),
    );

    assert_eq!(names(&files), vec!["customer.ts"]);
}

#[test]
fn collect___duplicate_paths___first_wins() {
    let dir = TempDir::new().unwrap();

    let files = collect(
        vec![generated("all.ts", "first"), generated("all.ts", "second")],
        true,
        dir.path(),
    );

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].content(), "first");
}

#[test]
fn write_all___creates_nested_directories() {
    let dir = TempDir::new().unwrap();
    let files = collect(vec![generated("models/order.ts", "x")], true, dir.path());

    write_all(&files, dir.path()).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("models/order.ts")).unwrap(),
        "x"
    );
}
