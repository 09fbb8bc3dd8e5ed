//! Tests for copy-on-write updates over identified trees

use std::collections::HashSet;
use std::rc::Rc;

use rstest::{fixture, rstest};

use tagtree::domain::{
    add_child, assign_ids, find_by_path, rename, seed_tree, toggle_collapse, update_data,
    update_node, ChildTemplate, NodeId, RawNode, TagNodeRef,
};
use tagtree::util::testing::{collect_ids, collect_refs, init_test_setup};

#[fixture]
fn seed() -> TagNodeRef {
    init_test_setup();
    assign_ids(&seed_tree())
}

fn node_at(root: &TagNodeRef, path: &str) -> TagNodeRef {
    let segments: Vec<&str> = path.split('/').collect();
    find_by_path(root, &segments).expect("node exists")
}

// ============================================================
// Identity Assignment
// ============================================================

#[rstest]
fn given_seed_tree_when_assigning_ids_then_ids_are_pairwise_distinct(seed: TagNodeRef) {
    let ids = collect_ids(&seed);
    let unique: HashSet<&NodeId> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[rstest]
fn given_wide_tree_when_assigning_ids_then_ids_are_pairwise_distinct() {
    let children = (0..200)
        .map(|i| RawNode::leaf(format!("n{}", i), "same"))
        .collect();
    let root = assign_ids(&RawNode::branch("root", children));

    let ids = collect_ids(&root);
    let unique: HashSet<&NodeId> = ids.iter().collect();
    assert_eq!(ids.len(), 201);
    assert_eq!(unique.len(), 201);
}

// ============================================================
// Structural sharing
// ============================================================

#[rstest]
#[case("root/child1")]
#[case("root/child1/child1-child2")]
#[case("root/child2")]
fn given_target_when_updating_then_off_path_subtrees_are_shared(
    seed: TagNodeRef,
    #[case] path: &str,
) {
    let target = node_at(&seed, path);
    let updated = update_node(&seed, &target.id, toggle_collapse);

    // Nodes on the root-to-target path, by id
    let segments: Vec<&str> = path.split('/').collect();
    let on_path: HashSet<NodeId> = (1..=segments.len())
        .map(|n| find_by_path(&seed, &segments[..n]).unwrap().id.clone())
        .collect();

    let before = collect_refs(&seed);
    let after = collect_refs(&updated);
    assert_eq!(before.len(), after.len());
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!(old.id, new.id);
        if on_path.contains(&old.id) {
            assert!(!Rc::ptr_eq(old, new), "{} should be rebuilt", old.name);
        } else {
            assert!(Rc::ptr_eq(old, new), "{} should be shared", old.name);
        }
    }
}

#[rstest]
fn given_missing_id_when_updating_then_returns_same_root(seed: TagNodeRef) {
    let updated = update_node(&seed, &NodeId::from("nonexistent-id"), toggle_collapse);
    assert!(Rc::ptr_eq(&updated, &seed));
}

#[rstest]
fn given_bare_root_when_updating_missing_id_then_returns_same_root() {
    let root = assign_ids(&RawNode::named("alone"));
    let updated = update_node(&root, &NodeId::from("x"), |n| rename(n, "y"));
    assert!(Rc::ptr_eq(&updated, &root));
}

// ============================================================
// Toggle scenario
// ============================================================

#[rstest]
fn given_seed_when_toggling_child1_twice_then_restores_flag_and_shares_rest(seed: TagNodeRef) {
    let child1 = node_at(&seed, "root/child1");

    let once = update_node(&seed, &child1.id, toggle_collapse);
    let toggled = node_at(&once, "root/child1");
    assert!(toggled.is_collapsed);
    assert!(!once.is_collapsed);
    assert!(Rc::ptr_eq(&once.child_refs()[1], &seed.child_refs()[1]));
    assert!(Rc::ptr_eq(
        &toggled.child_refs()[0],
        &child1.child_refs()[0]
    ));

    let twice = update_node(&once, &child1.id, toggle_collapse);
    assert!(!node_at(&twice, "root/child1").is_collapsed);
    assert!(Rc::ptr_eq(&twice.child_refs()[1], &seed.child_refs()[1]));
    assert_eq!(*twice, *seed);
}

// ============================================================
// Add child
// ============================================================

#[rstest]
#[case("root/child2")]
#[case("root/child1/child1-child1")]
fn given_leaf_with_data_when_adding_child_then_data_removed_and_single_child_added(
    seed: TagNodeRef,
    #[case] path: &str,
) {
    let target = node_at(&seed, path);
    assert!(target.data.is_some());
    assert!(target.children.is_none());

    let updated = update_node(&seed, &target.id, |n| add_child(n, &ChildTemplate::default()));
    let node = node_at(&updated, path);

    assert_eq!(node.data, None);
    let children = node.children.as_ref().expect("children created");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name, "New Child");
    assert_eq!(children[0].data.as_deref(), Some("Data"));
    assert!(!children[0].is_collapsed);
}

#[rstest]
fn given_collapsed_branch_when_adding_child_then_appends_and_expands(seed: TagNodeRef) {
    let child1 = node_at(&seed, "root/child1");
    let collapsed = update_node(&seed, &child1.id, toggle_collapse);

    let updated = update_node(&collapsed, &child1.id, |n| {
        add_child(n, &ChildTemplate::default())
    });
    let node = node_at(&updated, "root/child1");

    assert!(!node.is_collapsed);
    let names: Vec<&str> = node.child_refs().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["child1-child1", "child1-child2", "New Child"]);
    assert!(Rc::ptr_eq(&node.child_refs()[0], &child1.child_refs()[0]));

    let ids = collect_ids(&updated);
    let unique: HashSet<&NodeId> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

// ============================================================
// Data and rename
// ============================================================

#[rstest]
fn given_leaf_when_updating_data_then_only_data_changes(seed: TagNodeRef) {
    let target = node_at(&seed, "root/child1/child1-child2");
    let updated = update_node(&seed, &target.id, |n| update_data(n, "c1-c2 Rust"));

    let node = node_at(&updated, "root/child1/child1-child2");
    assert_eq!(node.data.as_deref(), Some("c1-c2 Rust"));
    assert_eq!(node.id, target.id);
    assert_eq!(node.is_collapsed, target.is_collapsed);
}

#[rstest]
fn given_node_when_renaming_then_id_is_kept(seed: TagNodeRef) {
    let target = node_at(&seed, "root/child2");
    let updated = update_node(&seed, &target.id, |n| rename(n, "ChildTwo"));

    let node = node_at(&updated, "root/ChildTwo");
    assert_eq!(node.id, target.id);
    assert!(find_by_path(&updated, &["root", "child2"]).is_err());
}
