/// Removes every connection that starts at one of the board's nodes.
pub(crate) async fn delete_connections(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
) -> ::anyhow::Result<u64> {
    let query = "
        DELETE FROM connections
        WHERE source_id IN (
            SELECT id FROM nodes WHERE board_id = $1
        )
    ";

    let result = ::sqlx::query(query)
        .bind(board_id)
        .execute(&mut **transaction)
        .await?;

    Ok(result.rows_affected())
}

/// Removes the board's nodes. Connections still pointing at them are
/// removed by the foreign key cascade.
pub(crate) async fn delete_nodes(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
) -> ::anyhow::Result<u64> {
    let query = "
        DELETE FROM nodes
        WHERE board_id = $1
    ";

    let result = ::sqlx::query(query)
        .bind(board_id)
        .execute(&mut **transaction)
        .await?;

    Ok(result.rows_affected())
}
