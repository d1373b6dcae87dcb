pub(crate) async fn touch(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
) -> ::anyhow::Result<()> {
    let query = "
        UPDATE boards
        SET updated_at = NOW()
        WHERE id = $1
    ";

    ::sqlx::query(query)
        .bind(board_id)
        .execute(&mut **transaction)
        .await?;

    Ok(())
}
