use booking_types::{
    Campaign, CampaignStatus, Contract, ContractStatus, Creator, License, LicenseStatus,
    PaymentStatus,
};
use sqlx::Row;

type DbResult<T> = Result<T, sqlx::Error>;

pub async fn list_campaigns(brand_id: i64) -> DbResult<Vec<Campaign>> {
    let pool = crate::db::pool::get_pool()?;

    let rows = sqlx::query(
        "SELECT id, name, creators, status, budget_cents, escrow_cents,
                assets_delivered, go_live, license_expiry, due_date, territory,
                channels, duration_days
         FROM brand_campaigns
         WHERE brand_id = $1
         ORDER BY created_at DESC, id DESC",
    )
    .bind(brand_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Campaign {
            id: row.get("id"),
            name: row.get("name"),
            creators: row.get("creators"),
            status: CampaignStatus::parse(&row.get::<String, _>("status"))
                .unwrap_or(CampaignStatus::Draft),
            budget_cents: row.get("budget_cents"),
            escrow_cents: row.get("escrow_cents"),
            assets_delivered: row.get("assets_delivered"),
            go_live: row.get("go_live"),
            license_expiry: row.get("license_expiry"),
            due_date: row.get("due_date"),
            territory: row.get("territory"),
            channels: row.get("channels"),
            duration_days: row.get("duration_days"),
        })
        .collect())
}

pub async fn list_contracts(brand_id: i64) -> DbResult<Vec<Contract>> {
    let pool = crate::db::pool::get_pool()?;

    let rows = sqlx::query(
        "SELECT id, project_name, creator_name, creator_handle, status,
                signed_date, expiration_date, territory, channels,
                total_fee_cents, platform_fee_cents, payment_status, deliverables
         FROM brand_contracts
         WHERE brand_id = $1
         ORDER BY created_at DESC, id DESC",
    )
    .bind(brand_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Contract {
            id: row.get("id"),
            project_name: row.get("project_name"),
            creator_name: row.get("creator_name"),
            creator_handle: row.get("creator_handle"),
            status: ContractStatus::parse(&row.get::<String, _>("status"))
                .unwrap_or(ContractStatus::PendingSignature),
            signed_date: row.get("signed_date"),
            expiration_date: row.get("expiration_date"),
            territory: row.get("territory"),
            channels: row.get("channels"),
            total_fee_cents: row.get("total_fee_cents"),
            platform_fee_cents: row.get("platform_fee_cents"),
            payment_status: PaymentStatus::parse(&row.get::<String, _>("payment_status"))
                .unwrap_or(PaymentStatus::InEscrow),
            deliverables: row.get("deliverables"),
        })
        .collect())
}

pub async fn list_licenses(brand_id: i64) -> DbResult<Vec<License>> {
    let pool = crate::db::pool::get_pool()?;

    let rows = sqlx::query(
        "SELECT id, asset_name, creator_name, territory, start_date, end_date,
                channels, status
         FROM brand_licenses
         WHERE brand_id = $1
         ORDER BY end_date, id",
    )
    .bind(brand_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| License {
            id: row.get("id"),
            asset_name: row.get("asset_name"),
            creator_name: row.get("creator_name"),
            territory: row.get("territory"),
            start_date: row.get("start_date"),
            end_date: row.get("end_date"),
            channels: row.get("channels"),
            status: LicenseStatus::parse(&row.get::<String, _>("status"))
                .unwrap_or(LicenseStatus::Active),
        })
        .collect())
}

/// Marketplace listing shared by every brand.
pub async fn list_creators() -> DbResult<Vec<Creator>> {
    let pool = crate::db::pool::get_pool()?;

    let rows = sqlx::query(
        "SELECT id, name, location, tagline, followers, engagement_pct,
                price_cents, turnaround, tags, verified, creator_type
         FROM marketplace_creators
         ORDER BY verified DESC, followers DESC, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Creator {
            id: row.get("id"),
            name: row.get("name"),
            location: row.get("location"),
            tagline: row.get("tagline"),
            followers: row.get("followers"),
            engagement_pct: row.get("engagement_pct"),
            price_cents: row.get("price_cents"),
            turnaround: row.get("turnaround"),
            tags: row.get("tags"),
            verified: row.get("verified"),
            creator_type: row.get("creator_type"),
        })
        .collect())
}
