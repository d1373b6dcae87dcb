pub(crate) struct Batch {
    p_id: Vec<String>,
    p_node_type: Vec<String>,
    p_position_x: Vec<f64>,
    p_position_y: Vec<f64>,
    p_width: Vec<f64>,
    p_height: Vec<f64>,
    p_content: Vec<::serde_json::Value>,
    p_ordinal: Vec<i32>,
}

impl Batch {
    pub(crate) fn new() -> Batch {
        Batch {
            p_id: vec![],
            p_node_type: vec![],
            p_position_x: vec![],
            p_position_y: vec![],
            p_width: vec![],
            p_height: vec![],
            p_content: vec![],
            p_ordinal: vec![],
        }
    }

    pub(crate) fn append(&mut self, node: &crate::sync::PlannedNode) {
        self.p_id.push(node.id.clone());
        self.p_node_type.push(node.node_type.as_str().to_string());
        self.p_position_x.push(node.position_x);
        self.p_position_y.push(node.position_y);
        self.p_width.push(node.width);
        self.p_height.push(node.height);
        self.p_content.push(node.content.clone());
        self.p_ordinal.push(node.ordinal);
    }

    pub(crate) fn len(&self) -> usize {
        self.p_id.len()
    }
}

pub(crate) async fn insert(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    board_id: &str,
    batch: Batch,
) -> ::anyhow::Result<()> {
    if batch.len() == 0 {
        return Ok(());
    }

    let query = "
        INSERT INTO nodes (
            id,
            board_id,
            node_type,
            position_x,
            position_y,
            width,
            height,
            content,
            ordinal
        )
        SELECT
            p.id,
            $1,
            p.node_type::node_type,
            p.position_x,
            p.position_y,
            p.width,
            p.height,
            p.content,
            p.ordinal
        FROM
            unnest(
                $2::text [],
                $3::text [],
                $4::float8 [],
                $5::float8 [],
                $6::float8 [],
                $7::float8 [],
                $8::jsonb [],
                $9::int4 []
            ) AS p (
                id,
                node_type,
                position_x,
                position_y,
                width,
                height,
                content,
                ordinal
            );
    ";

    ::sqlx::query(query)
        .bind(board_id)
        .bind(batch.p_id)
        .bind(batch.p_node_type)
        .bind(batch.p_position_x)
        .bind(batch.p_position_y)
        .bind(batch.p_width)
        .bind(batch.p_height)
        .bind(batch.p_content)
        .bind(batch.p_ordinal)
        .execute(&mut **transaction)
        .await?;

    Ok(())
}
