pub(crate) async fn delete(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
) -> ::anyhow::Result<bool> {
    let query = "
        DELETE FROM boards
        WHERE id = $1
    ";

    let result = ::sqlx::query(query)
        .bind(board_id)
        .execute(&mut **transaction)
        .await?;

    Ok(result.rows_affected() > 0)
}
