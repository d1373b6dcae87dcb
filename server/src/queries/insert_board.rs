use ::board_protocol::model::board::Board;

pub(crate) async fn insert(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board: &crate::store::interface::NewBoard,
) -> ::anyhow::Result<Board> {
    let query = "
        INSERT INTO boards (
            id,
            name,
            description,
            owner_id
        )
        VALUES (
            $1,
            $2,
            $3,
            $4
        )
        RETURNING
            id,
            name,
            description,
            owner_id,
            created_at,
            updated_at
    ";

    let row = ::sqlx::query_as::<_, super::BoardRow>(query)
        .bind(&board.id)
        .bind(&board.name)
        .bind(&board.description)
        .bind(&board.owner_id)
        .fetch_one(&mut **transaction)
        .await?;

    Ok(Board::from(row))
}
