#[derive(::sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: Option<String>,
}

pub(crate) async fn select(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    user_id: &str,
) -> ::anyhow::Result<Option<crate::user::User>> {
    let query = "
        SELECT
            id,
            email,
            name
        FROM
            users
        WHERE
            id = $1
    ";

    let row = ::sqlx::query_as::<_, UserRow>(query)
        .bind(user_id)
        .fetch_optional(&mut **transaction)
        .await?;

    Ok(row.map(|row| crate::user::User {
        id: row.id,
        email: row.email,
        name: row.name,
    }))
}
