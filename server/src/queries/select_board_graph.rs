use ::board_protocol::model::board::{BoardConnection, BoardNode};

pub(crate) async fn select_nodes(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
) -> ::anyhow::Result<::std::vec::Vec<BoardNode>> {
    let query = "
        SELECT
            id,
            board_id,
            node_type,
            position_x,
            position_y,
            width,
            height,
            content,
            created_at,
            updated_at
        FROM
            nodes
        WHERE
            board_id = $1
        ORDER BY
            created_at ASC,
            ordinal ASC,
            id ASC
    ";

    let rows = ::sqlx::query_as::<_, super::NodeRow>(query)
        .bind(board_id)
        .fetch_all(&mut **transaction)
        .await?;

    Ok(rows.into_iter().map(BoardNode::from).collect())
}

/// Connections with either endpoint on the board.
pub(crate) async fn select_connections(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
) -> ::anyhow::Result<::std::vec::Vec<BoardConnection>> {
    let query = "
        SELECT
            id,
            source_id,
            target_id,
            label
        FROM
            connections
        WHERE
            source_id IN (SELECT id FROM nodes WHERE board_id = $1)
        OR
            target_id IN (SELECT id FROM nodes WHERE board_id = $1)
        ORDER BY
            ordinal ASC,
            id ASC
    ";

    let rows = ::sqlx::query_as::<_, super::ConnectionRow>(query)
        .bind(board_id)
        .fetch_all(&mut **transaction)
        .await?;

    Ok(rows.into_iter().map(BoardConnection::from).collect())
}
