use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{NodeId, TagNode, TagNodeRef};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // RUST_LOG wins; otherwise show everything from this crate
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tagtree=trace"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Pre-order list of every node id in the tree.
pub fn collect_ids(root: &TagNode) -> Vec<NodeId> {
    let mut ids = vec![root.id.clone()];
    for child in root.child_refs() {
        ids.extend(collect_ids(child));
    }
    ids
}

/// Pre-order list of every node reference in the tree.
pub fn collect_refs(root: &TagNodeRef) -> Vec<TagNodeRef> {
    let mut refs = vec![TagNodeRef::clone(root)];
    for child in root.child_refs() {
        refs.extend(collect_refs(child));
    }
    refs
}
