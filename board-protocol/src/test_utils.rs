use rand::Rng;

use crate::model::snapshot::{EdgeSnapshot, NodeSnapshot, SyncRequest};

pub fn make_test_id(prefix: &str) -> String {
    format!("{}-{:016x}", prefix, rand::thread_rng().gen::<u64>())
}

pub fn make_test_node_with_content(
    id: &str,
    client_tag: &str,
    position: (f64, f64),
    content: ::serde_json::Value,
) -> NodeSnapshot {
    NodeSnapshot {
        id: id.to_string(),
        node_type: client_tag.to_string(),
        position_x: position.0,
        position_y: position.1,
        content,
    }
}

pub fn make_test_node(id: &str, x: f64, y: f64) -> NodeSnapshot {
    make_test_node_with_content(
        id,
        crate::model::client_node_types::TEXT_NODE,
        (x, y),
        ::serde_json::json!({ "text": id }),
    )
}

pub fn make_test_edge(source: &str, target: &str) -> EdgeSnapshot {
    EdgeSnapshot {
        source: source.to_string(),
        target: target.to_string(),
        label: None,
    }
}

pub fn make_test_labeled_edge(
    source: &str,
    target: &str,
    label: &str,
) -> EdgeSnapshot {
    EdgeSnapshot {
        label: Some(label.to_string()),
        ..make_test_edge(source, target)
    }
}

/// A chain `n0 -> n1 -> ... -> n{count-1}` laid out on a diagonal.
pub fn make_test_chain(count: usize) -> SyncRequest {
    let nodes: Vec<NodeSnapshot> = (0..count)
        .map(|i| make_test_node(&format!("n{}", i), i as f64 * 10.0, i as f64 * 20.0))
        .collect();

    let edges = nodes
        .windows(2)
        .map(|pair| make_test_edge(&pair[0].id, &pair[1].id))
        .collect();

    SyncRequest::new(nodes, edges)
}
