use ::board_protocol::model::board::BoardNode;

/// Inserts a single node if the board exists.
pub(crate) async fn insert(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
    node: &crate::store::interface::NewNode,
) -> ::anyhow::Result<Option<BoardNode>> {
    let query = "
        INSERT INTO nodes (
            id,
            board_id,
            node_type,
            position_x,
            position_y,
            width,
            height,
            content
        )
        SELECT
            $2,
            boards.id,
            $3,
            $4,
            $5,
            $6,
            $7,
            $8
        FROM
            boards
        WHERE
            boards.id = $1
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
        .bind(&node.id)
        .bind(node.node_type)
        .bind(node.position_x)
        .bind(node.position_y)
        .bind(node.width)
        .bind(node.height)
        .bind(&node.content)
        .fetch_optional(&mut **transaction)
        .await?;

    Ok(row.map(BoardNode::from))
}
