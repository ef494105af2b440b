//! Database seeding.
//!
//! `seed_all` writes the sample organizations and profiles (ids 1 through
//! 11 on a fresh database) followed by any generated USER profiles.

pub mod models;
pub mod organizations;
pub mod profiles;

use std::time::Instant;

use ozp_db::sample_data::{SAMPLE_ORGANIZATIONS, SAMPLE_PROFILES};
use sqlx::PgPool;

pub use models::{ProfileSeed, SeedConfig};

/// Seeds the sample dataset plus `config.extra_users` generated profiles.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...");

    let sample_usernames: Vec<String> = SAMPLE_PROFILES
        .iter()
        .map(|p| p.username.to_string())
        .collect();
    if profiles::count_existing(db, &sample_usernames).await? > 0 {
        return Err("Sample profiles already exist. Run `clear-seed` first.".into());
    }

    let organization_ids = organizations::seed_organizations(db).await?;

    let mut seeds: Vec<ProfileSeed> = SAMPLE_PROFILES.iter().map(ProfileSeed::from).collect();
    if config.extra_users > 0 {
        let member_of: Vec<&str> = SAMPLE_ORGANIZATIONS.iter().map(|(short, _)| *short).collect();
        seeds.extend(profiles::generate_extra_users(config.extra_users, &member_of));
    }

    profiles::insert_profiles_batch(db, &seeds, &organization_ids).await?;

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    Ok(())
}

/// Removes all profiles, accounts and organizations.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🧹 Clearing seeded data...");

    profiles::clear_profiles(db).await?;
    organizations::clear_organizations(db).await?;

    println!("\n✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}
