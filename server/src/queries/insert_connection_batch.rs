pub(crate) struct Batch {
    p_id: Vec<String>,
    p_source_id: Vec<String>,
    p_target_id: Vec<String>,
    p_label: Vec<Option<String>>,
    p_ordinal: Vec<i32>,
}

impl Batch {
    pub(crate) fn new() -> Batch {
        Batch {
            p_id: vec![],
            p_source_id: vec![],
            p_target_id: vec![],
            p_label: vec![],
            p_ordinal: vec![],
        }
    }

    pub(crate) fn append(&mut self, connection: &crate::sync::PlannedConnection) {
        self.p_id.push(connection.id.clone());
        self.p_source_id.push(connection.source_id.clone());
        self.p_target_id.push(connection.target_id.clone());
        self.p_label.push(connection.label.clone());
        self.p_ordinal.push(connection.ordinal);
    }

    pub(crate) fn len(&self) -> usize {
        self.p_id.len()
    }
}

pub(crate) async fn insert(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    batch: Batch,
) -> ::anyhow::Result<()> {
    if batch.len() == 0 {
        return Ok(());
    }

    let query = "
        INSERT INTO connections (
            id,
            source_id,
            target_id,
            label,
            ordinal
        )
        SELECT
            *
        FROM
            unnest(
                $1::text [],
                $2::text [],
                $3::text [],
                $4::text [],
                $5::int4 []
            );
    ";

    ::sqlx::query(query)
        .bind(batch.p_id)
        .bind(batch.p_source_id)
        .bind(batch.p_target_id)
        .bind(batch.p_label)
        .bind(batch.p_ordinal)
        .execute(&mut **transaction)
        .await?;

    Ok(())
}
