//! Tests for TreeService: source precedence, import errors, export writing

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use tagtree::application::ApplicationError;
use tagtree::config::{ExportConfig, Settings};
use tagtree::domain::{seed_tree, ChildTemplate, RawNode};
use tagtree::infrastructure::traits::{FileSystem, InMemoryFileSystem, RealFileSystem};
use tagtree::infrastructure::ServiceContainer;
use tagtree::util::testing::init_test_setup;

const SMALL_TREE: &str = r#"{"name": "tags", "children": [{"name": "rust", "data": "crab"}]}"#;

fn memory_container(fs: InMemoryFileSystem, settings: Settings) -> ServiceContainer {
    init_test_setup();
    ServiceContainer::with_deps(settings, Arc::new(fs))
}

fn small_tree() -> RawNode {
    RawNode::branch("tags", vec![RawNode::leaf("rust", "crab")])
}

// ============================================================
// Source precedence
// ============================================================

#[rstest]
fn given_no_input_and_no_seed_file_when_loading_then_builtin_seed() {
    let container = memory_container(InMemoryFileSystem::new(), Settings::default());
    let raw = container.tree_service.load_raw(None).unwrap();
    assert_eq!(raw, seed_tree());
}

#[rstest]
fn given_seed_file_when_loading_without_input_then_reads_seed_file() {
    let fs = InMemoryFileSystem::new().with_file("/trees/seed.json", SMALL_TREE);
    let settings = Settings {
        seed_file: Some(PathBuf::from("/trees/seed.json")),
        ..Settings::default()
    };
    let container = memory_container(fs, settings);

    assert_eq!(container.tree_service.load_raw(None).unwrap(), small_tree());
}

#[rstest]
fn given_input_and_seed_file_when_loading_then_input_wins() {
    let fs = InMemoryFileSystem::new()
        .with_file("/trees/seed.json", r#"{"name": "from-seed"}"#)
        .with_file("/work/input.json", SMALL_TREE);
    let settings = Settings {
        seed_file: Some(PathBuf::from("/trees/seed.json")),
        ..Settings::default()
    };
    let container = memory_container(fs, settings);

    let raw = container
        .tree_service
        .load_raw(Some(Path::new("/work/input.json")))
        .unwrap();
    assert_eq!(raw, small_tree());
}

// ============================================================
// Import errors
// ============================================================

#[rstest]
fn given_missing_input_when_loading_then_file_not_found() {
    let container = memory_container(InMemoryFileSystem::new(), Settings::default());
    let err = container
        .tree_service
        .load_raw(Some(Path::new("/nope.json")))
        .unwrap_err();
    assert!(matches!(err, ApplicationError::FileNotFound(ref p) if p == Path::new("/nope.json")));
}

#[rstest]
fn given_directory_as_input_when_loading_then_not_a_file() {
    init_test_setup();
    let temp = TempDir::new().unwrap();
    let container = ServiceContainer::with_deps(Settings::default(), Arc::new(RealFileSystem));

    let err = container
        .tree_service
        .load_raw(Some(temp.path()))
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotAFile(ref p) if p == temp.path()));
}

#[rstest]
#[case::not_json("this is not json")]
#[case::missing_name(r#"{"children": []}"#)]
#[case::wrong_type(r#"{"name": "x", "data": 42}"#)]
fn given_malformed_input_when_loading_then_import_error(#[case] content: &str) {
    let fs = InMemoryFileSystem::new().with_file("/bad.json", content);
    let container = memory_container(fs, Settings::default());

    let err = container
        .tree_service
        .load_raw(Some(Path::new("/bad.json")))
        .unwrap_err();
    match err {
        ApplicationError::Import { source_name, .. } => assert_eq!(source_name, "/bad.json"),
        other => panic!("expected import error, got {:?}", other),
    }
}

#[rstest]
fn given_stdin_text_when_parsing_then_uses_source_name_in_errors() {
    let container = memory_container(InMemoryFileSystem::new(), Settings::default());
    let err = container.tree_service.parse("[", "<stdin>").unwrap_err();
    assert!(err.to_string().contains("<stdin>"));
}

// ============================================================
// Sessions and export
// ============================================================

#[rstest]
fn given_configured_template_when_adding_child_then_uses_template() {
    let settings = Settings {
        new_child: ChildTemplate {
            name: "tag".into(),
            data: "todo".into(),
        },
        ..Settings::default()
    };
    let container = memory_container(InMemoryFileSystem::new(), settings);
    let mut session = container.tree_service.open_session(None).unwrap();

    let root_id = session.root().unwrap().id.clone();
    assert!(session.add_child(&root_id));

    let exported = session.export().unwrap();
    let children = exported.children.unwrap();
    assert_eq!(children.last(), Some(&RawNode::leaf("tag", "todo")));
}

#[rstest]
fn given_indent_setting_when_exporting_then_uses_indent() {
    let settings = Settings {
        export: ExportConfig { indent: 4 },
        ..Settings::default()
    };
    let fs = InMemoryFileSystem::new().with_file("/t.json", r#"{"name": "a", "data": "b"}"#);
    let container = memory_container(fs, settings);
    let session = container
        .tree_service
        .open_session(Some(Path::new("/t.json")))
        .unwrap();

    let text = container.tree_service.export_text(&session).unwrap();
    assert_eq!(text, "{\n    \"name\": \"a\",\n    \"data\": \"b\"\n}");
}

#[rstest]
fn given_session_when_writing_export_to_memory_then_file_ends_with_newline() {
    let fs = Arc::new(InMemoryFileSystem::new());
    let container = ServiceContainer::with_deps(Settings::default(), fs.clone());
    let session = container.tree_service.open_session(None).unwrap();

    container
        .tree_service
        .write_export(&session, Path::new("/out/tree.json"))
        .unwrap();

    let written = fs.read_to_string(Path::new("/out/tree.json")).unwrap();
    assert!(written.ends_with("}\n"));
    let reparsed: RawNode = serde_json::from_str(&written).unwrap();
    assert_eq!(reparsed, seed_tree());
}

#[rstest]
fn given_real_fs_when_writing_export_then_creates_parent_dirs_and_round_trips() {
    init_test_setup();
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input.json");
    std::fs::write(&input, SMALL_TREE).unwrap();
    let output = temp.path().join("nested/dir/out.json");

    let container = ServiceContainer::with_deps(Settings::default(), Arc::new(RealFileSystem));
    let mut session = container.tree_service.open_session(Some(&input)).unwrap();
    let rust = session.root().unwrap().child_refs()[0].id.clone();
    assert!(session.update_data(&rust, "ferris"));

    container.tree_service.write_export(&session, &output).unwrap();

    let reloaded = container.tree_service.load_raw(Some(&output)).unwrap();
    assert_eq!(
        reloaded,
        RawNode::branch("tags", vec![RawNode::leaf("rust", "ferris")])
    );
}
