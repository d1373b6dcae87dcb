//! Projection between the editor's in-memory graph and the wire snapshot.

use board_protocol::model::board::BoardGraph;
use board_protocol::model::client_node_types;
use board_protocol::model::snapshot::{EdgeSnapshot, NodeSnapshot, SyncRequest};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize,
)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A node as the editor holds it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditorNode {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// An edge as the editor holds it. The label may be any value the editor
/// can render; only plain strings are persisted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditorEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<serde_json::Value>,
}

pub fn extract_node(node: &EditorNode) -> NodeSnapshot {
    NodeSnapshot {
        id: node.id.clone(),
        node_type: node
            .node_type
            .clone()
            .unwrap_or_else(|| client_node_types::TEXT_NODE.to_string()),
        position_x: node.position.x,
        position_y: node.position.y,
        content: node.data.clone(),
    }
}

pub fn extract_edge(edge: &EditorEdge) -> EdgeSnapshot {
    EdgeSnapshot {
        source: edge.source.clone(),
        target: edge.target.clone(),
        label: match &edge.label {
            Some(serde_json::Value::String(label)) => Some(label.clone()),
            _ => None,
        },
    }
}

pub fn extract_snapshot(
    nodes: &[EditorNode],
    edges: &[EditorEdge],
) -> SyncRequest {
    SyncRequest::new(
        nodes.iter().map(extract_node).collect(),
        edges.iter().map(extract_edge).collect(),
    )
}

/// Rebuilds editor state from a board read from the server.
pub fn hydrate(graph: &BoardGraph) -> (Vec<EditorNode>, Vec<EditorEdge>) {
    let nodes = graph
        .nodes
        .iter()
        .map(|node| EditorNode {
            id: node.id.clone(),
            node_type: Some(node.node_type.client_tag().to_string()),
            position: Position {
                x: node.position_x,
                y: node.position_y,
            },
            data: node.content.clone(),
        })
        .collect();

    let edges = graph
        .connections
        .iter()
        .map(|connection| EditorEdge {
            id: connection.id.clone(),
            source: connection.source_id.clone(),
            target: connection.target_id.clone(),
            label: connection.label.clone().map(serde_json::Value::String),
        })
        .collect();

    (nodes, edges)
}

#[cfg(test)]
pub mod tests {
    use board_protocol::model::board::{Board, BoardConnection, BoardGraph, BoardNode};
    use board_protocol::model::node_type::NodeType;
    use serde_json::json;

    fn make_editor_node(id: &str, node_type: Option<&str>) -> super::EditorNode {
        super::EditorNode {
            id: id.to_string(),
            node_type: node_type.map(str::to_string),
            position: super::Position { x: 1.0, y: 2.0 },
            data: json!({ "text": id, "nested": { "k": [1, 2] } }),
        }
    }

    fn make_editor_edge(
        source: &str,
        target: &str,
        label: Option<serde_json::Value>,
    ) -> super::EditorEdge {
        super::EditorEdge {
            id: format!("{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            label,
        }
    }

    #[test]
    fn test_extract_defaults_missing_type_to_text_node() {
        let snapshot = super::extract_snapshot(
            &[
                make_editor_node("a", None),
                make_editor_node("b", Some("youtubeNode")),
                make_editor_node("c", Some("chatNode")),
            ],
            &[],
        );

        let types: Vec<&str> = snapshot
            .nodes
            .iter()
            .map(|node| node.node_type.as_str())
            .collect();

        assert_eq!(types, vec!["textNode", "youtubeNode", "chatNode"]);
    }

    #[test]
    fn test_extract_passes_content_and_position_through() {
        let node = make_editor_node("a", Some("textNode"));
        let snapshot = super::extract_node(&node);

        assert_eq!(snapshot.id, "a");
        assert_eq!(snapshot.position_x, 1.0);
        assert_eq!(snapshot.position_y, 2.0);
        assert_eq!(snapshot.content, node.data);
    }

    #[test]
    fn test_extract_keeps_only_string_labels() {
        let snapshot = super::extract_snapshot(
            &[],
            &[
                make_editor_edge("a", "b", Some(json!("causes"))),
                make_editor_edge("b", "c", Some(json!({ "rich": true }))),
                make_editor_edge("c", "a", None),
            ],
        );

        let labels: Vec<Option<&str>> = snapshot
            .edges
            .iter()
            .map(|edge| edge.label.as_deref())
            .collect();

        assert_eq!(labels, vec![Some("causes"), None, None]);
        assert_eq!(snapshot.edges[1].source, "b");
        assert_eq!(snapshot.edges[1].target, "c");
    }

    #[test]
    fn test_editor_node_deserializes_editor_json() {
        let node: super::EditorNode = serde_json::from_value(json!({
            "id": "n1",
            "position": { "x": 3.0, "y": 4.0 },
            "data": { "text": "hello" },
            "selected": true
        }))
        .unwrap();

        assert_eq!(node.node_type, None);
        assert_eq!(node.position, super::Position { x: 3.0, y: 4.0 });
    }

    #[test]
    fn test_hydrate_then_extract_reproduces_persisted_graph() {
        let now = chrono::Utc::now();

        let make_node = |id: &str, node_type: NodeType, x: f64| BoardNode {
            id: id.to_string(),
            board_id: "b1".to_string(),
            node_type,
            position_x: x,
            position_y: -x,
            width: 250.0,
            height: 150.0,
            content: json!({ "id": id }),
            created_at: now,
            updated_at: now,
        };

        let graph = BoardGraph {
            board: Board {
                id: "b1".to_string(),
                name: "Board".to_string(),
                description: None,
                owner_id: "owner".to_string(),
                created_at: now,
                updated_at: now,
            },
            nodes: vec![
                make_node("t", NodeType::Text, 1.0),
                make_node("y", NodeType::Youtube, 2.0),
                make_node("i", NodeType::Image, 3.0),
            ],
            connections: vec![BoardConnection {
                id: "c1".to_string(),
                source_id: "t".to_string(),
                target_id: "y".to_string(),
                label: Some("embeds".to_string()),
            }],
        };

        let (nodes, edges) = super::hydrate(&graph);

        assert_eq!(edges[0].id, "c1");

        let snapshot = super::extract_snapshot(&nodes, &edges);

        for (persisted, extracted) in graph.nodes.iter().zip(snapshot.nodes.iter()) {
            assert_eq!(persisted.id, extracted.id);
            assert_eq!(
                NodeType::from_client_tag(&extracted.node_type),
                persisted.node_type
            );
            assert_eq!(persisted.position_x, extracted.position_x);
            assert_eq!(persisted.position_y, extracted.position_y);
            assert_eq!(persisted.content, extracted.content);
        }

        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.edges[0].label.as_deref(), Some("embeds"));
    }
}
