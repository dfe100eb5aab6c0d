//! Scenario: packaging modes and staging layout.

use std::fs;

use terrastack::{App, AssetType, Stack, StackError};

#[test]
fn file_asset_keeps_extension() {
    let work = tempfile::tempdir().unwrap();
    let script = work.path().join("bootstrap.sh");
    fs::write(&script, "#!/bin/sh\necho hi\n").unwrap();

    let app = App::new(work.path().join("out"));
    let mut stack = Stack::new(&app, "files").unwrap();
    let asset = stack.add_asset("script", &script, AssetType::File).unwrap();

    assert!(asset.file_name().ends_with(".sh"));
    assert_eq!(fs::read(asset.staged_path()).unwrap(), fs::read(&script).unwrap());
    assert!(asset.path().starts_with("assets/script/"));
}

#[test]
fn directory_asset_is_copied_tree() {
    let work = tempfile::tempdir().unwrap();
    let site = work.path().join("site");
    fs::create_dir_all(site.join("css")).unwrap();
    fs::write(site.join("index.html"), "<h1>hi</h1>").unwrap();
    fs::write(site.join("css/app.css"), "body{}").unwrap();

    let app = App::new(work.path().join("out"));
    let mut stack = Stack::new(&app, "site").unwrap();
    let asset = stack.add_asset("site", &site, AssetType::Directory).unwrap();

    assert!(asset.staged_path().join("index.html").is_file());
    assert!(asset.staged_path().join("css/app.css").is_file());
    assert!(!asset.file_name().contains('.'));
}

#[test]
fn missing_source_writes_nothing() {
    let work = tempfile::tempdir().unwrap();
    let outdir = work.path().join("out");
    let app = App::new(&outdir);
    let mut stack = Stack::new(&app, "demo").unwrap();

    let err = stack
        .add_asset("gone", work.path().join("does-not-exist"), AssetType::Archive)
        .unwrap_err();

    assert!(matches!(err, StackError::PathNotFound { .. }));
    assert!(stack.assets().is_empty());
    assert!(!outdir.exists());
}

#[test]
fn assetignore_excludes_entries() {
    let work = tempfile::tempdir().unwrap();
    let src = work.path().join("lambda");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("index.py"), "pass\n").unwrap();

    let app = App::new(work.path().join("out"));
    let mut stack = Stack::new(&app, "a").unwrap();
    let clean = stack.add_asset("clean", &src, AssetType::Directory).unwrap();

    fs::write(src.join(".assetignore"), "*.log\n").unwrap();
    fs::write(src.join("debug.log"), "noise").unwrap();
    let ignored = stack.add_asset("ignored", &src, AssetType::Directory).unwrap();

    assert_eq!(clean.hash(), ignored.hash());
    assert!(!ignored.staged_path().join("debug.log").exists());
}
