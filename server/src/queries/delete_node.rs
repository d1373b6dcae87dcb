pub(crate) async fn delete(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
    node_id: &str,
) -> ::anyhow::Result<bool> {
    let query = "
        DELETE FROM nodes
        WHERE id = $2
        AND board_id = $1
    ";

    let result = ::sqlx::query(query)
        .bind(board_id)
        .bind(node_id)
        .execute(&mut **transaction)
        .await?;

    Ok(result.rows_affected() > 0)
}
