use ::anyhow::Result;
use ::board_protocol::model::board::{
    Board, BoardGraph, BoardListItem, BoardNode,
};
use ::board_protocol::model::node_type::NodeType;
use ::board_protocol::model::requests::{UpdateBoardRequest, UpdateNodeRequest};

use crate::sync::{ReplaceOutcome, ReplacePlan};
use crate::user::User;

#[derive(Clone, Debug)]
pub(crate) struct NewBoard {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: String,
}

#[derive(Clone, Debug)]
pub(crate) struct NewNode {
    pub id: String,
    pub node_type: NodeType,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub content: ::serde_json::Value,
}

/// Durable owner of boards, nodes and connections.
///
/// Every mutation of a board's graph that comes from the editor goes
/// through `replace_graph`, which must be all-or-nothing.
#[async_trait::async_trait]
pub(crate) trait BoardStore: Send + Sync {
    async fn ping(&self) -> bool;

    async fn ensure_user(&self, user: &User) -> Result<()>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    async fn list_boards(&self) -> Result<Vec<BoardListItem>>;
    async fn get_board(&self, board_id: &str) -> Result<Option<BoardGraph>>;
    async fn create_board(&self, board: NewBoard) -> Result<Board>;
    async fn update_board(
        &self,
        board_id: &str,
        update: &UpdateBoardRequest,
    ) -> Result<Option<Board>>;
    async fn delete_board(&self, board_id: &str) -> Result<bool>;

    /// `None` when the board does not exist.
    async fn create_node(
        &self,
        board_id: &str,
        node: NewNode,
    ) -> Result<Option<BoardNode>>;
    async fn update_node(
        &self,
        board_id: &str,
        node_id: &str,
        update: &UpdateNodeRequest,
    ) -> Result<Option<BoardNode>>;
    async fn delete_node(&self, board_id: &str, node_id: &str) -> Result<bool>;

    async fn replace_graph(&self, plan: &ReplacePlan) -> Result<ReplaceOutcome>;
}
