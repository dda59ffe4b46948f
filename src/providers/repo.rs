use sqlx::{FromRow, MySqlPool};

/// Fields inserted by the registration handler. `profile_image` is the
/// stored upload path or the placeholder.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postcode: String,
    pub mobile: String,
    pub email: String,
    pub occupation: String,
    pub profile_image: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ProviderSummaryRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub occupation: String,
    pub profile_image: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ProviderDetailRow {
    pub first_name: String,
    pub last_name: String,
    pub occupation: String,
    pub profile_image: String,
    pub mobile: String,
    pub description: Option<String>,
}

pub async fn insert(db: &MySqlPool, user: &NewUser) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users
            (first_name, last_name, age, address, city, country, postcode,
             mobile, email, occupation, profile_image)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.age)
    .bind(&user.address)
    .bind(&user.city)
    .bind(&user.country)
    .bind(&user.postcode)
    .bind(&user.mobile)
    .bind(&user.email)
    .bind(&user.occupation)
    .bind(&user.profile_image)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn list_by_occupation(
    db: &MySqlPool,
    occupation: &str,
) -> anyhow::Result<Vec<ProviderSummaryRow>> {
    let rows = sqlx::query_as::<_, ProviderSummaryRow>(
        r#"
        SELECT id, first_name, last_name, occupation, profile_image
        FROM users
        WHERE occupation = ?
        "#,
    )
    .bind(occupation)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &MySqlPool, id: i32) -> anyhow::Result<Option<ProviderDetailRow>> {
    let row = sqlx::query_as::<_, ProviderDetailRow>(
        r#"
        SELECT first_name, last_name, occupation, profile_image, mobile, description
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}
