use ::anyhow::Result;
use ::board_protocol::model::board::{
    dedupe_connections, Board, BoardGraph, BoardListItem, BoardNode,
};
use ::board_protocol::model::requests::{UpdateBoardRequest, UpdateNodeRequest};
use ::log::*;
use ::sqlx::Executor;

use crate::queries;
use crate::store::interface::{self, NewBoard, NewNode};
use crate::sync::{ReplaceOutcome, ReplacePlan};
use crate::user::User;

pub(crate) async fn prepare_database(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
) -> Result<()> {
    transaction.execute(include_str!("schema.sql")).await?;

    Ok(())
}

/// Begins a transaction whose statements all read one snapshot, so a graph
/// read spanning several queries never mixes two replaces.
pub(crate) async fn begin_snapshot_read(
    pool: &::sqlx::PgPool,
) -> Result<::sqlx::Transaction<'static, ::sqlx::Postgres>> {
    let mut transaction = pool.begin().await?;

    ::sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *transaction)
        .await?;

    Ok(transaction)
}

pub(crate) async fn load_board_graph(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
) -> Result<Option<BoardGraph>> {
    let Some(board) = queries::select_board::select(transaction, board_id).await?
    else {
        return Ok(None);
    };

    let nodes =
        queries::select_board_graph::select_nodes(transaction, board_id).await?;

    let connections =
        queries::select_board_graph::select_connections(transaction, board_id)
            .await?;

    Ok(Some(BoardGraph {
        board,
        nodes,
        connections: dedupe_connections(connections),
    }))
}

/// Runs the whole replace inside the given transaction. The caller commits
/// on `Replaced`; on any error the transaction is dropped and rolled back.
pub(crate) async fn replace_board_graph(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    plan: &ReplacePlan,
) -> Result<ReplaceOutcome> {
    if !queries::select_board::select_for_update(transaction, &plan.board_id)
        .await?
    {
        return Ok(ReplaceOutcome::BoardNotFound);
    }

    let removed_connections = queries::delete_board_graph::delete_connections(
        transaction,
        &plan.board_id,
    )
    .await?;

    let removed_nodes =
        queries::delete_board_graph::delete_nodes(transaction, &plan.board_id)
            .await?;

    let mut node_batch = queries::insert_node_batch::Batch::new();

    for node in plan.nodes.iter() {
        node_batch.append(node);
    }

    queries::insert_node_batch::insert(transaction, &plan.board_id, node_batch)
        .await?;

    let mut connection_batch = queries::insert_connection_batch::Batch::new();

    for connection in plan.connections.iter() {
        connection_batch.append(connection);
    }

    queries::insert_connection_batch::insert(transaction, connection_batch)
        .await?;

    queries::touch_board::touch(transaction, &plan.board_id).await?;

    debug!(
        "board {} replaced {} nodes and {} connections",
        plan.board_id, removed_nodes, removed_connections
    );

    Ok(ReplaceOutcome::Replaced)
}

pub(crate) struct PostgresStore {
    pool: ::sqlx::PgPool,
}

impl PostgresStore {
    pub(crate) fn new(pool: ::sqlx::PgPool) -> PostgresStore {
        PostgresStore { pool }
    }
}

#[async_trait::async_trait]
impl interface::BoardStore for PostgresStore {
    async fn ping(&self) -> bool {
        ::sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }

    async fn ensure_user(&self, user: &User) -> Result<()> {
        let mut transaction = self.pool.begin().await?;
        queries::upsert_user::upsert(&mut transaction, user).await?;
        transaction.commit().await?;

        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let mut transaction = self.pool.begin().await?;
        let user = queries::select_user::select(&mut transaction, user_id).await?;
        transaction.commit().await?;

        Ok(user)
    }

    async fn list_boards(&self) -> Result<Vec<BoardListItem>> {
        let mut transaction = self.pool.begin().await?;
        let boards = queries::select_boards::select(&mut transaction).await?;
        transaction.commit().await?;

        Ok(boards)
    }

    async fn get_board(&self, board_id: &str) -> Result<Option<BoardGraph>> {
        let mut transaction = begin_snapshot_read(&self.pool).await?;
        let graph = load_board_graph(&mut transaction, board_id).await?;
        transaction.commit().await?;

        Ok(graph)
    }

    async fn create_board(&self, board: NewBoard) -> Result<Board> {
        let mut transaction = self.pool.begin().await?;
        let created =
            queries::insert_board::insert(&mut transaction, &board).await?;
        transaction.commit().await?;

        Ok(created)
    }

    async fn update_board(
        &self,
        board_id: &str,
        update: &UpdateBoardRequest,
    ) -> Result<Option<Board>> {
        let mut transaction = self.pool.begin().await?;
        let updated =
            queries::update_board::update(&mut transaction, board_id, update)
                .await?;
        transaction.commit().await?;

        Ok(updated)
    }

    async fn delete_board(&self, board_id: &str) -> Result<bool> {
        let mut transaction = self.pool.begin().await?;
        let deleted =
            queries::delete_board::delete(&mut transaction, board_id).await?;
        transaction.commit().await?;

        Ok(deleted)
    }

    async fn create_node(
        &self,
        board_id: &str,
        node: NewNode,
    ) -> Result<Option<BoardNode>> {
        let mut transaction = self.pool.begin().await?;
        let created =
            queries::insert_node::insert(&mut transaction, board_id, &node)
                .await?;
        transaction.commit().await?;

        Ok(created)
    }

    async fn update_node(
        &self,
        board_id: &str,
        node_id: &str,
        update: &UpdateNodeRequest,
    ) -> Result<Option<BoardNode>> {
        let mut transaction = self.pool.begin().await?;
        let updated = queries::update_node::update(
            &mut transaction,
            board_id,
            node_id,
            update,
        )
        .await?;
        transaction.commit().await?;

        Ok(updated)
    }

    async fn delete_node(&self, board_id: &str, node_id: &str) -> Result<bool> {
        let mut transaction = self.pool.begin().await?;
        let deleted =
            queries::delete_node::delete(&mut transaction, board_id, node_id)
                .await?;
        transaction.commit().await?;

        Ok(deleted)
    }

    async fn replace_graph(&self, plan: &ReplacePlan) -> Result<ReplaceOutcome> {
        let mut transaction = self.pool.begin().await?;

        let outcome = replace_board_graph(&mut transaction, plan).await?;

        match outcome {
            ReplaceOutcome::Replaced => transaction.commit().await?,
            ReplaceOutcome::BoardNotFound => transaction.rollback().await?,
        }

        Ok(outcome)
    }
}
