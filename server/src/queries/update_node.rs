use ::board_protocol::model::board::BoardNode;
use ::board_protocol::model::requests::UpdateNodeRequest;

pub(crate) async fn update(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
    node_id: &str,
    update: &UpdateNodeRequest,
) -> ::anyhow::Result<Option<BoardNode>> {
    let query = "
        UPDATE
            nodes
        SET
            node_type = COALESCE($3, node_type),
            position_x = COALESCE($4, position_x),
            position_y = COALESCE($5, position_y),
            width = COALESCE($6, width),
            height = COALESCE($7, height),
            content = COALESCE($8, content),
            updated_at = NOW()
        WHERE
            id = $2
        AND
            board_id = $1
        RETURNING
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
    ";

    let row = ::sqlx::query_as::<_, super::NodeRow>(query)
        .bind(board_id)
        .bind(node_id)
        .bind(update.node_type)
        .bind(update.position_x)
        .bind(update.position_y)
        .bind(update.width)
        .bind(update.height)
        .bind(&update.content)
        .fetch_optional(&mut **transaction)
        .await?;

    Ok(row.map(BoardNode::from))
}
