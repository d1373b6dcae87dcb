use ::board_protocol::model::node_type::NodeType;
use ::board_protocol::model::snapshot::SyncRequest;
use ::log::*;
use ::std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlannedNode {
    pub id: String,
    pub node_type: NodeType,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub content: ::serde_json::Value,
    /// Position in the snapshot, used as the read order.
    pub ordinal: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlannedConnection {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub label: Option<String>,
    pub ordinal: i32,
}

/// Rows that replace a board's entire graph. Built without touching the
/// store so every store executes the same contract: canonical node types,
/// client node ids preserved, dangling edges dropped.
#[derive(Clone, Debug)]
pub(crate) struct ReplacePlan {
    pub board_id: String,
    pub nodes: Vec<PlannedNode>,
    pub connections: Vec<PlannedConnection>,
    pub dropped_edges: usize,
    pub duplicate_nodes: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ReplaceOutcome {
    Replaced,
    BoardNotFound,
}

impl ReplacePlan {
    pub(crate) fn from_snapshot(
        board_id: &str,
        snapshot: SyncRequest,
    ) -> ReplacePlan {
        let node_count = snapshot.nodes.len();

        // last occurrence of a repeated id wins
        let mut seen = HashSet::new();
        let mut nodes: Vec<PlannedNode> = snapshot
            .nodes
            .into_iter()
            .rev()
            .filter(|node| seen.insert(node.id.clone()))
            .map(|node| PlannedNode {
                node_type: NodeType::from_client_tag(&node.node_type),
                id: node.id,
                position_x: node.position_x,
                position_y: node.position_y,
                width: ::board_protocol::model::node_defaults::WIDTH,
                height: ::board_protocol::model::node_defaults::HEIGHT,
                content: node.content,
                ordinal: 0,
            })
            .collect();
        nodes.reverse();

        for (ordinal, node) in nodes.iter_mut().enumerate() {
            node.ordinal = ordinal as i32;
        }

        let duplicate_nodes = node_count - nodes.len();

        if duplicate_nodes > 0 {
            warn!(
                "board {} snapshot repeats {} node ids",
                board_id, duplicate_nodes
            );
        }

        let edge_count = snapshot.edges.len();

        let connections: Vec<PlannedConnection> = snapshot
            .edges
            .into_iter()
            .filter(|edge| {
                seen.contains(&edge.source) && seen.contains(&edge.target)
            })
            .enumerate()
            .map(|(ordinal, edge)| PlannedConnection {
                id: ::uuid::Uuid::new_v4().to_string(),
                source_id: edge.source,
                target_id: edge.target,
                label: edge.label,
                ordinal: ordinal as i32,
            })
            .collect();

        let dropped_edges = edge_count - connections.len();

        ReplacePlan {
            board_id: board_id.to_string(),
            nodes,
            connections,
            dropped_edges,
            duplicate_nodes,
        }
    }

    pub(crate) fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|node| node.id.as_str()).collect()
    }
}
