use ::anyhow::Result;
use ::board_protocol::model::board::{
    dedupe_connections, Board, BoardConnection, BoardGraph, BoardListItem,
    BoardNode, NodeCount,
};
use ::board_protocol::model::requests::{UpdateBoardRequest, UpdateNodeRequest};
use ::chrono::Utc;
use ::std::collections::{HashMap, HashSet};

use crate::store::interface::{self, NewBoard, NewNode};
use crate::sync::{ReplaceOutcome, ReplacePlan};
use crate::user::User;

struct StoredConnection {
    ordinal: i32,
    connection: BoardConnection,
}

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    boards: HashMap<String, Board>,
    nodes: Vec<BoardNode>,
    connections: Vec<StoredConnection>,
}

impl Tables {
    /// Removes matching nodes and, like the foreign key cascade, every
    /// connection with either endpoint among them.
    fn remove_nodes<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&BoardNode) -> bool,
    {
        let removed: HashSet<String> = self
            .nodes
            .iter()
            .filter(|node| predicate(node))
            .map(|node| node.id.clone())
            .collect();

        self.nodes.retain(|node| !removed.contains(&node.id));
        self.connections.retain(|stored| {
            !removed.contains(&stored.connection.source_id)
                && !removed.contains(&stored.connection.target_id)
        });

        removed.len()
    }

    fn board_graph(&self, board: &Board) -> BoardGraph {
        let mut nodes: Vec<BoardNode> = self
            .nodes
            .iter()
            .filter(|node| node.board_id == board.id)
            .cloned()
            .collect();

        // stable, so nodes from one replace keep their snapshot order
        nodes.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let node_ids: HashSet<&str> =
            nodes.iter().map(|node| node.id.as_str()).collect();

        let mut connections: Vec<&StoredConnection> = self
            .connections
            .iter()
            .filter(|stored| {
                node_ids.contains(stored.connection.source_id.as_str())
                    || node_ids.contains(stored.connection.target_id.as_str())
            })
            .collect();

        connections.sort_by(|a, b| {
            a.ordinal
                .cmp(&b.ordinal)
                .then_with(|| a.connection.id.cmp(&b.connection.id))
        });

        let connections: Vec<BoardConnection> = connections
            .into_iter()
            .map(|stored| stored.connection.clone())
            .collect();

        BoardGraph {
            board: board.clone(),
            nodes,
            connections: dedupe_connections(connections),
        }
    }
}

/// Board Store kept in process memory. Mirrors the relational store's
/// cascades and its all-or-nothing replace; nothing survives a restart.
pub(crate) struct MemoryStore {
    tables: ::tokio::sync::RwLock<Tables>,
}

impl MemoryStore {
    pub(crate) fn new() -> MemoryStore {
        MemoryStore {
            tables: ::tokio::sync::RwLock::new(Tables::default()),
        }
    }
}

#[async_trait::async_trait]
impl interface::BoardStore for MemoryStore {
    async fn ping(&self) -> bool {
        true
    }

    async fn ensure_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;

        if tables.users.contains_key(&user.id) {
            return Ok(());
        }

        if tables.users.values().any(|existing| existing.email == user.email) {
            ::anyhow::bail!("email {} already belongs to another user", user.email);
        }

        tables.users.insert(user.id.clone(), user.clone());

        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(user_id).cloned())
    }

    async fn list_boards(&self) -> Result<Vec<BoardListItem>> {
        let tables = self.tables.read().await;

        let mut boards: Vec<BoardListItem> = tables
            .boards
            .values()
            .map(|board| BoardListItem {
                id: board.id.clone(),
                name: board.name.clone(),
                description: board.description.clone(),
                updated_at: board.updated_at,
                count: NodeCount {
                    nodes: tables
                        .nodes
                        .iter()
                        .filter(|node| node.board_id == board.id)
                        .count() as i64,
                },
            })
            .collect();

        boards.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(boards)
    }

    async fn get_board(&self, board_id: &str) -> Result<Option<BoardGraph>> {
        let tables = self.tables.read().await;

        Ok(tables
            .boards
            .get(board_id)
            .map(|board| tables.board_graph(board)))
    }

    async fn create_board(&self, board: NewBoard) -> Result<Board> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&board.owner_id) {
            ::anyhow::bail!("owner {} does not exist", board.owner_id);
        }

        if tables.boards.contains_key(&board.id) {
            ::anyhow::bail!("board {} already exists", board.id);
        }

        let now = Utc::now();

        let created = Board {
            id: board.id,
            name: board.name,
            description: board.description,
            owner_id: board.owner_id,
            created_at: now,
            updated_at: now,
        };

        tables.boards.insert(created.id.clone(), created.clone());

        Ok(created)
    }

    async fn update_board(
        &self,
        board_id: &str,
        update: &UpdateBoardRequest,
    ) -> Result<Option<Board>> {
        let mut tables = self.tables.write().await;

        let Some(board) = tables.boards.get_mut(board_id) else {
            return Ok(None);
        };

        if let Some(name) = &update.name {
            board.name = name.clone();
        }

        if let Some(description) = &update.description {
            board.description = Some(description.clone());
        }

        board.updated_at = Utc::now();

        Ok(Some(board.clone()))
    }

    async fn delete_board(&self, board_id: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;

        if tables.boards.remove(board_id).is_none() {
            return Ok(false);
        }

        tables.remove_nodes(|node| node.board_id == board_id);

        Ok(true)
    }

    async fn create_node(
        &self,
        board_id: &str,
        node: NewNode,
    ) -> Result<Option<BoardNode>> {
        let mut tables = self.tables.write().await;

        if !tables.boards.contains_key(board_id) {
            return Ok(None);
        }

        if tables.nodes.iter().any(|existing| existing.id == node.id) {
            ::anyhow::bail!("node {} already exists", node.id);
        }

        let now = Utc::now();

        let created = BoardNode {
            id: node.id,
            board_id: board_id.to_string(),
            node_type: node.node_type,
            position_x: node.position_x,
            position_y: node.position_y,
            width: node.width,
            height: node.height,
            content: node.content,
            created_at: now,
            updated_at: now,
        };

        tables.nodes.push(created.clone());

        Ok(Some(created))
    }

    async fn update_node(
        &self,
        board_id: &str,
        node_id: &str,
        update: &UpdateNodeRequest,
    ) -> Result<Option<BoardNode>> {
        let mut tables = self.tables.write().await;

        let Some(node) = tables
            .nodes
            .iter_mut()
            .find(|node| node.id == node_id && node.board_id == board_id)
        else {
            return Ok(None);
        };

        if let Some(node_type) = update.node_type {
            node.node_type = node_type;
        }
        if let Some(position_x) = update.position_x {
            node.position_x = position_x;
        }
        if let Some(position_y) = update.position_y {
            node.position_y = position_y;
        }
        if let Some(width) = update.width {
            node.width = width;
        }
        if let Some(height) = update.height {
            node.height = height;
        }
        if let Some(content) = &update.content {
            node.content = content.clone();
        }

        node.updated_at = Utc::now();

        Ok(Some(node.clone()))
    }

    async fn delete_node(&self, board_id: &str, node_id: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;

        let removed = tables
            .remove_nodes(|node| node.id == node_id && node.board_id == board_id);

        Ok(removed > 0)
    }

    async fn replace_graph(&self, plan: &ReplacePlan) -> Result<ReplaceOutcome> {
        let mut tables = self.tables.write().await;

        if !tables.boards.contains_key(&plan.board_id) {
            return Ok(ReplaceOutcome::BoardNotFound);
        }

        // Validate before mutating so a failure leaves the board untouched.
        let planned_ids = plan.node_ids();

        if let Some(conflict) = tables.nodes.iter().find(|node| {
            node.board_id != plan.board_id && planned_ids.contains(node.id.as_str())
        }) {
            ::anyhow::bail!(
                "node {} already belongs to board {}",
                conflict.id,
                conflict.board_id
            );
        }

        let board_node_ids: HashSet<String> = tables
            .nodes
            .iter()
            .filter(|node| node.board_id == plan.board_id)
            .map(|node| node.id.clone())
            .collect();

        tables.connections.retain(|stored| {
            !board_node_ids.contains(&stored.connection.source_id)
        });

        tables.remove_nodes(|node| node.board_id == plan.board_id);

        let now = Utc::now();

        for node in plan.nodes.iter() {
            tables.nodes.push(BoardNode {
                id: node.id.clone(),
                board_id: plan.board_id.clone(),
                node_type: node.node_type,
                position_x: node.position_x,
                position_y: node.position_y,
                width: node.width,
                height: node.height,
                content: node.content.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        for connection in plan.connections.iter() {
            tables.connections.push(StoredConnection {
                ordinal: connection.ordinal,
                connection: BoardConnection {
                    id: connection.id.clone(),
                    source_id: connection.source_id.clone(),
                    target_id: connection.target_id.clone(),
                    label: connection.label.clone(),
                },
            });
        }

        if let Some(board) = tables.boards.get_mut(&plan.board_id) {
            board.updated_at = now;
        }

        Ok(ReplaceOutcome::Replaced)
    }
}
