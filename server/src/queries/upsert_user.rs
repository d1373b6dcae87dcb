pub(crate) async fn upsert(
    transaction: &mut ::sqlx::Transaction<'_, ::sqlx::Postgres>,
    user: &crate::user::User,
) -> ::anyhow::Result<()> {
    let query = "
        INSERT INTO users (
            id,
            email,
            name
        )
        VALUES (
            $1,
            $2,
            $3
        )
        ON CONFLICT (id) DO NOTHING;
    ";

    ::sqlx::query(query)
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.name)
        .execute(&mut **transaction)
        .await?;

    Ok(())
}
