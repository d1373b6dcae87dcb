use ::board_protocol::model::board::BoardListItem;

pub(crate) async fn select(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
) -> ::anyhow::Result<::std::vec::Vec<BoardListItem>> {
    let query = "
        SELECT
            boards.id,
            boards.name,
            boards.description,
            boards.updated_at,
            (
                SELECT COUNT(*)
                FROM nodes
                WHERE nodes.board_id = boards.id
            ) AS node_count
        FROM
            boards
        ORDER BY
            boards.updated_at DESC
    ";

    let rows = ::sqlx::query_as::<_, super::BoardListRow>(query)
        .fetch_all(&mut **transaction)
        .await?;

    Ok(rows.into_iter().map(BoardListItem::from).collect())
}
