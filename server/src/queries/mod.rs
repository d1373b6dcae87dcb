use ::board_protocol::model::board::{
    Board, BoardConnection, BoardListItem, BoardNode, NodeCount,
};
use ::board_protocol::model::node_type::NodeType;
use ::chrono::{DateTime, Utc};

pub(crate) mod delete_board;
pub(crate) mod delete_board_graph;
pub(crate) mod delete_node;
pub(crate) mod insert_board;
pub(crate) mod insert_connection_batch;
pub(crate) mod insert_node;
pub(crate) mod insert_node_batch;
pub(crate) mod select_board;
pub(crate) mod select_board_graph;
pub(crate) mod select_boards;
pub(crate) mod select_user;
pub(crate) mod touch_board;
pub(crate) mod update_board;
pub(crate) mod update_node;
pub(crate) mod upsert_user;

#[derive(::sqlx::FromRow)]
pub(crate) struct BoardRow {
    id: String,
    name: String,
    description: Option<String>,
    owner_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Board {
        Board {
            id: row.id,
            name: row.name,
            description: row.description,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(::sqlx::FromRow)]
pub(crate) struct BoardListRow {
    id: String,
    name: String,
    description: Option<String>,
    updated_at: DateTime<Utc>,
    node_count: i64,
}

impl From<BoardListRow> for BoardListItem {
    fn from(row: BoardListRow) -> BoardListItem {
        BoardListItem {
            id: row.id,
            name: row.name,
            description: row.description,
            updated_at: row.updated_at,
            count: NodeCount {
                nodes: row.node_count,
            },
        }
    }
}

#[derive(::sqlx::FromRow)]
pub(crate) struct NodeRow {
    id: String,
    board_id: String,
    node_type: NodeType,
    position_x: f64,
    position_y: f64,
    width: f64,
    height: f64,
    content: ::serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<NodeRow> for BoardNode {
    fn from(row: NodeRow) -> BoardNode {
        BoardNode {
            id: row.id,
            board_id: row.board_id,
            node_type: row.node_type,
            position_x: row.position_x,
            position_y: row.position_y,
            width: row.width,
            height: row.height,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(::sqlx::FromRow)]
pub(crate) struct ConnectionRow {
    id: String,
    source_id: String,
    target_id: String,
    label: Option<String>,
}

impl From<ConnectionRow> for BoardConnection {
    fn from(row: ConnectionRow) -> BoardConnection {
        BoardConnection {
            id: row.id,
            source_id: row.source_id,
            target_id: row.target_id,
            label: row.label,
        }
    }
}
