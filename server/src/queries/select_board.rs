use ::board_protocol::model::board::Board;

pub(crate) async fn select(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
) -> ::anyhow::Result<Option<Board>> {
    let query = "
        SELECT
            id,
            name,
            description,
            owner_id,
            created_at,
            updated_at
        FROM
            boards
        WHERE
            id = $1
    ";

    let row = ::sqlx::query_as::<_, super::BoardRow>(query)
        .bind(board_id)
        .fetch_optional(&mut **transaction)
        .await?;

    Ok(row.map(Board::from))
}

/// Locks the board row until the transaction ends so that concurrent
/// replaces of the same board run one after another.
pub(crate) async fn select_for_update(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
) -> ::anyhow::Result<bool> {
    let query = "
        SELECT
            id
        FROM
            boards
        WHERE
            id = $1
        FOR UPDATE
    ";

    let row = ::sqlx::query_scalar::<_, String>(query)
        .bind(board_id)
        .fetch_optional(&mut **transaction)
        .await?;

    Ok(row.is_some())
}
