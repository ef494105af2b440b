//! Organization seeding.

use std::collections::HashMap;
use std::time::Instant;

use ozp_db::sample_data::SAMPLE_ORGANIZATIONS;
use sqlx::PgPool;

/// Inserts the sample organizations, returning ids keyed by short name.
///
/// Existing rows are kept, so re-seeding is harmless.
pub async fn seed_organizations(
    db: &PgPool,
) -> Result<HashMap<String, i64>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🏛️  Seeding {} organizations...", SAMPLE_ORGANIZATIONS.len());

    let mut tx = db.begin().await?;
    for (short_name, title) in SAMPLE_ORGANIZATIONS {
        sqlx::query(
            "INSERT INTO organizations (short_name, title) VALUES ($1, $2)
             ON CONFLICT (short_name) DO NOTHING",
        )
        .bind(short_name)
        .bind(title)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    let rows: Vec<(String, i64)> = sqlx::query_as("SELECT short_name, id FROM organizations")
        .fetch_all(db)
        .await?;

    println!("   ✓ Seeded organizations in {:?}", start_time.elapsed());

    Ok(rows.into_iter().collect())
}

pub async fn clear_organizations(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing organizations...");

    let result = sqlx::query("DELETE FROM organizations").execute(db).await?;

    println!(
        "   ✓ Deleted {} organizations in {:?}",
        result.rows_affected(),
        start_time.elapsed()
    );

    Ok(result.rows_affected())
}
