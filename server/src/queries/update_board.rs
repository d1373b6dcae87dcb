use ::board_protocol::model::board::Board;
use ::board_protocol::model::requests::UpdateBoardRequest;

pub(crate) async fn update(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
    update: &UpdateBoardRequest,
) -> ::anyhow::Result<Option<Board>> {
    let query = "
        UPDATE
            boards
        SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            updated_at = NOW()
        WHERE
            id = $1
        RETURNING
            id,
            name,
            description,
            owner_id,
            created_at,
            updated_at
    ";

    let row = ::sqlx::query_as::<_, super::BoardRow>(query)
        .bind(board_id)
        .bind(&update.name)
        .bind(&update.description)
        .fetch_optional(&mut **transaction)
        .await?;

    Ok(row.map(Board::from))
}
