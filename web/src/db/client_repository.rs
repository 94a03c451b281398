use booking_types::{Client, NewClient, PaymentTerms};
use sqlx::postgres::PgRow;
use sqlx::Row;

type DbResult<T> = Result<T, sqlx::Error>;

/// Client columns plus booking aggregates. Cancelled bookings do not count
/// toward revenue.
const CLIENT_SELECT: &str = "
    SELECT c.id, c.company, c.contact_name, c.email, c.phone, c.website,
           c.address, c.terms, c.industry_tags, c.notes, c.created_at,
           COALESCE(SUM(b.rate_cents) FILTER (
               WHERE b.status IN ('confirmed', 'completed') AND b.rate_cents >= 0
           ), 0)::BIGINT AS revenue_cents,
           COUNT(b.id) FILTER (WHERE b.status <> 'cancelled') AS bookings_count,
           MAX(b.created_at) AS last_booking_at
    FROM clients c
    LEFT JOIN bookings b ON b.client_id = c.id";

fn client_from_row(row: &PgRow) -> Client {
    Client {
        id: row.get("id"),
        company: row.get("company"),
        contact_name: row.get("contact_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        website: row.get("website"),
        address: row.get("address"),
        terms: PaymentTerms::parse(&row.get::<String, _>("terms")).unwrap_or_default(),
        industry_tags: row.get("industry_tags"),
        notes: row.get("notes"),
        revenue_cents: row.get("revenue_cents"),
        bookings_count: row.get("bookings_count"),
        last_booking_at: row.get("last_booking_at"),
        created_at: row.get("created_at"),
    }
}

fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub async fn list_clients(agency_id: i64) -> DbResult<Vec<Client>> {
    let pool = crate::db::pool::get_pool()?;

    let rows = sqlx::query(&format!(
        "{CLIENT_SELECT}
         WHERE c.agency_id = $1
         GROUP BY c.id
         ORDER BY lower(c.company), c.id"
    ))
    .bind(agency_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(client_from_row).collect())
}

pub async fn get_client(agency_id: i64, client_id: i64) -> DbResult<Option<Client>> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(&format!(
        "{CLIENT_SELECT}
         WHERE c.agency_id = $1 AND c.id = $2
         GROUP BY c.id"
    ))
    .bind(agency_id)
    .bind(client_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(client_from_row))
}

pub async fn insert_client(agency_id: i64, client: &NewClient) -> DbResult<Client> {
    let pool = crate::db::pool::get_pool()?;

    let row = sqlx::query(
        "INSERT INTO clients (
             agency_id, company, contact_name, email, phone, website, address,
             terms, industry_tags, notes
         )
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING id",
    )
    .bind(agency_id)
    .bind(client.company.trim())
    .bind(client.contact_name.trim())
    .bind(blank_to_none(&client.email))
    .bind(blank_to_none(&client.phone))
    .bind(blank_to_none(&client.website))
    .bind(blank_to_none(&client.address))
    .bind(client.terms.as_str())
    .bind(&client.industry_tags)
    .bind(blank_to_none(&client.notes))
    .fetch_one(pool)
    .await?;

    let id: i64 = row.get("id");
    get_client(agency_id, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn update_client(
    agency_id: i64,
    client_id: i64,
    client: &NewClient,
) -> DbResult<Option<Client>> {
    let pool = crate::db::pool::get_pool()?;

    let updated = sqlx::query(
        "UPDATE clients SET
             company = $3, contact_name = $4, email = $5, phone = $6,
             website = $7, address = $8, terms = $9, industry_tags = $10,
             notes = $11
         WHERE agency_id = $1 AND id = $2",
    )
    .bind(agency_id)
    .bind(client_id)
    .bind(client.company.trim())
    .bind(client.contact_name.trim())
    .bind(blank_to_none(&client.email))
    .bind(blank_to_none(&client.phone))
    .bind(blank_to_none(&client.website))
    .bind(blank_to_none(&client.address))
    .bind(client.terms.as_str())
    .bind(&client.industry_tags)
    .bind(blank_to_none(&client.notes))
    .execute(pool)
    .await?;

    if updated.rows_affected() == 0 {
        return Ok(None);
    }
    get_client(agency_id, client_id).await
}

/// Moves the source's bookings onto the target, unions industry tags, then
/// deletes the source. Returns the merged target, or `None` when either
/// client is missing.
pub async fn merge_clients(agency_id: i64, source_id: i64, target_id: i64) -> DbResult<Option<Client>> {
    let pool = crate::db::pool::get_pool()?;
    let mut tx = pool.begin().await?;

    let found = sqlx::query(
        "SELECT COUNT(*) AS found FROM clients WHERE agency_id = $1 AND id IN ($2, $3)",
    )
    .bind(agency_id)
    .bind(source_id)
    .bind(target_id)
    .fetch_one(&mut *tx)
    .await?;
    if found.get::<i64, _>("found") != 2 {
        return Ok(None);
    }

    sqlx::query(
        "UPDATE bookings
         SET client_id = $3,
             client_name = (SELECT company FROM clients WHERE id = $3),
             updated_at = now()
         WHERE agency_id = $1 AND client_id = $2",
    )
    .bind(agency_id)
    .bind(source_id)
    .bind(target_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE clients AS t
         SET industry_tags = ARRAY(
                 SELECT DISTINCT unnest(t.industry_tags || s.industry_tags)
             ),
             notes = COALESCE(t.notes, s.notes),
             email = COALESCE(t.email, s.email),
             phone = COALESCE(t.phone, s.phone)
         FROM clients AS s
         WHERE t.agency_id = $1 AND t.id = $3 AND s.id = $2",
    )
    .bind(agency_id)
    .bind(source_id)
    .bind(target_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM clients WHERE agency_id = $1 AND id = $2")
        .bind(agency_id)
        .bind(source_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    get_client(agency_id, target_id).await
}
