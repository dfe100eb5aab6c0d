//! Property tests for content-addressed asset identity.

use std::fs;
use std::path::Path;

use proptest::prelude::*;

use terrastack::domain::ports::Packager;
use terrastack::{AssetType, LocalPackager};

fn file_tree() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    let name = proptest::string::string_regex("[a-z]{1,8}(\\.[a-z]{1,3})?").unwrap();
    let content = proptest::collection::vec(any::<u8>(), 0..256);
    proptest::collection::btree_map(name, content, 1..6)
        .prop_map(|files| files.into_iter().collect())
}

fn write_tree(root: &Path, files: &[(String, Vec<u8>)]) {
    fs::create_dir_all(root).unwrap();
    for (name, content) in files {
        fs::write(root.join(name), content).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: identical content at different paths yields the same token.
    #[test]
    fn property_same_content_same_token(files in file_tree()) {
        let work = tempfile::tempdir().unwrap();
        let a = work.path().join("a");
        let b = work.path().join("nested/b");
        write_tree(&a, &files);
        write_tree(&b, &files);

        let packager = LocalPackager::new();
        let first = packager.package(&a, AssetType::Archive, &work.path().join("stage-a")).unwrap();
        let second = packager.package(&b, AssetType::Archive, &work.path().join("stage-b")).unwrap();

        prop_assert_eq!(&first.hash, &second.hash);
        prop_assert_eq!(&first.file_name, &second.file_name);
        prop_assert_eq!(
            fs::read(&first.staged_path).unwrap(),
            fs::read(&second.staged_path).unwrap()
        );
    }

    /// PROPERTY: changing one byte of one file changes the token.
    #[test]
    fn property_one_byte_change_changes_token(
        files in file_tree(),
        pick in any::<prop::sample::Index>(),
        offset in any::<prop::sample::Index>(),
    ) {
        let work = tempfile::tempdir().unwrap();
        let root = work.path().join("src");
        write_tree(&root, &files);

        let packager = LocalPackager::new();
        let before = packager.hash(&root, AssetType::Archive).unwrap();

        let (name, content) = &files[pick.index(files.len())];
        let mut changed = content.clone();
        if changed.is_empty() {
            changed.push(0);
        } else {
            let i = offset.index(changed.len());
            changed[i] = changed[i].wrapping_add(1);
        }
        fs::write(root.join(name), &changed).unwrap();

        let after = packager.hash(&root, AssetType::Archive).unwrap();
        prop_assert_ne!(before.short(), after.short());
    }

    /// PROPERTY: a single-file asset hashes to sha256 of its bytes.
    #[test]
    fn property_file_hash_is_sha256_of_bytes(content in proptest::collection::vec(any::<u8>(), 0..512)) {
        let work = tempfile::tempdir().unwrap();
        let path = work.path().join("blob.bin");
        fs::write(&path, &content).unwrap();

        let hash = LocalPackager::new().hash(&path, AssetType::File).unwrap();
        prop_assert_eq!(hash, terrastack::ContentHash::from_bytes(&content));
    }
}

#[test]
fn missing_path_is_not_found_and_writes_nothing() {
    let work = tempfile::tempdir().unwrap();
    let staging = work.path().join("stage");

    let err = LocalPackager::new()
        .package(&work.path().join("nope"), AssetType::Archive, &staging)
        .unwrap_err();

    assert!(matches!(err, terrastack::StackError::PathNotFound { .. }));
    assert!(!staging.exists());
}
