use meetpack_core::{Error, LanguageManifest, SourceTree};
use tempfile::TempDir;

#[test]
fn codes_are_manifest_keys_in_sorted_order() {
    let manifest =
        LanguageManifest::parse(r#"{"fr": "French", "en": "English", "de": {"x": 1}}"#).unwrap();

    let codes: Vec<&str> = manifest.codes().collect();
    assert_eq!(codes, vec!["de", "en", "fr"]);
    assert_eq!(manifest.len(), 3);
    assert!(manifest.contains("en"));
    assert!(!manifest.contains("xx"));
}

#[test]
fn empty_object_has_no_codes() {
    let manifest = LanguageManifest::parse("{}").unwrap();
    assert!(manifest.is_empty());
}

#[test]
fn load_reports_parse_error_with_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("languages.json");
    std::fs::write(&path, "[not, an, object").unwrap();

    let err = LanguageManifest::load(&path).unwrap_err();
    assert!(matches!(err, Error::ManifestParse { .. }));
    assert!(err.to_string().contains("languages.json"));
}

#[test]
fn load_reports_missing_file() {
    let tmp = TempDir::new().unwrap();

    let err = LanguageManifest::load(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::ManifestRead { .. }));
}

// ── SourceTree ──

#[test]
fn open_requires_existing_directory() {
    let tmp = TempDir::new().unwrap();

    let err = SourceTree::open(tmp.path().join("missing")).unwrap_err();
    assert!(matches!(err, Error::SourceMissing(_)));
}

#[test]
fn open_requires_language_manifest() {
    let tmp = TempDir::new().unwrap();

    let err = SourceTree::open(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::ManifestMissing(_)));
}

#[test]
fn open_accepts_tree_with_manifest() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir(tmp.path().join("lang")).unwrap();
    std::fs::write(tmp.path().join("lang/languages.json"), "{}").unwrap();

    let tree = SourceTree::open(tmp.path()).unwrap();
    assert_eq!(tree.root(), tmp.path());
}

#[test]
fn virtual_paths_are_rooted_at_source() {
    let tree = SourceTree::new("/src/meet");

    assert_eq!(
        tree.resolve_virtual("/config.js"),
        std::path::PathBuf::from("/src/meet/config.js")
    );
    assert_eq!(
        tree.resolve_virtual("//static/head.html"),
        std::path::PathBuf::from("/src/meet/static/head.html")
    );
    assert_eq!(
        tree.resolve_virtual("title.html"),
        std::path::PathBuf::from("/src/meet/title.html")
    );
}

#[test]
fn country_locale_points_into_i18n_dataset() {
    let tree = SourceTree::new("/src/meet");

    assert_eq!(
        tree.country_locale("en"),
        std::path::PathBuf::from("/src/meet/node_modules/i18n-iso-countries/langs/en.json")
    );
}
