//! Account and profile seeding.
//!
//! Provides functions for generating fake USER profiles and inserting
//! profiles (accounts, role groups, memberships) into the database.

use std::collections::HashMap;
use std::time::Instant;

use fake::Fake;
use fake::faker::name::en::*;
use ozp_models::Role;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};

use super::models::ProfileSeed;

/// Generates `count` USER profiles with fake names.
///
/// Usernames are lowercase ASCII and carry the index, so they stay unique
/// across a batch even when names repeat.
pub fn generate_extra_users(count: usize, member_of: &[&str]) -> Vec<ProfileSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            let username = format!(
                "{}{}{}",
                first_name.chars().next().unwrap_or('u').to_ascii_lowercase(),
                last_name
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_lowercase(),
                idx + 1
            );

            let organizations = member_of
                .get(idx % member_of.len().max(1))
                .map(|short_name| vec![short_name.to_string()])
                .unwrap_or_default();

            ProfileSeed {
                username,
                display_name: format!("{} {}", first_name, last_name),
                role: Role::User,
                organizations,
                stewarded_organizations: Vec::new(),
            }
        })
        .collect()
}

/// Inserts profiles in batches, returns the number inserted.
pub async fn insert_profiles_batch(
    db: &PgPool,
    seeds: &[ProfileSeed],
    organization_ids: &HashMap<String, i64>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} profiles...", seeds.len());

    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 1000;

    for chunk in seeds.chunks(BATCH_SIZE) {
        insert_profiles_chunk(&mut tx, chunk, organization_ids).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} profiles in {:?}",
        seeds.len(),
        start_time.elapsed()
    );

    Ok(seeds.len())
}

async fn insert_profiles_chunk(
    tx: &mut Transaction<'_, Postgres>,
    seeds: &[ProfileSeed],
    organization_ids: &HashMap<String, i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    if seeds.is_empty() {
        return Ok(());
    }

    // RETURNING order is not guaranteed for INSERT ... SELECT, so every id is
    // joined back on a key.
    let usernames: Vec<String> = seeds.iter().map(|s| s.username.clone()).collect();
    let account_ids: HashMap<String, i64> = sqlx::query_as::<_, (i64, String)>(
        "INSERT INTO accounts (username) SELECT * FROM UNNEST($1::TEXT[]) RETURNING id, username",
    )
    .bind(&usernames)
    .fetch_all(&mut **tx)
    .await?
    .into_iter()
    .map(|(id, username)| (username, id))
    .collect();

    let mut seed_account_ids = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let account_id = account_ids
            .get(&seed.username)
            .ok_or_else(|| format!("Account not created: {}", seed.username))?;
        seed_account_ids.push(*account_id);
    }

    let group_names: Vec<String> = seeds.iter().map(|s| s.role.as_str().to_string()).collect();
    sqlx::query(
        "INSERT INTO account_groups (account_id, name)
         SELECT * FROM UNNEST($1::BIGINT[], $2::TEXT[])",
    )
    .bind(&seed_account_ids)
    .bind(&group_names)
    .execute(&mut **tx)
    .await?;

    let display_names: Vec<String> = seeds.iter().map(|s| s.display_name.clone()).collect();
    let profile_by_account: HashMap<i64, i64> = sqlx::query_as::<_, (i64, i64)>(
        "INSERT INTO profiles (account_id, display_name)
         SELECT * FROM UNNEST($1::BIGINT[], $2::TEXT[])
         RETURNING account_id, id",
    )
    .bind(&seed_account_ids)
    .bind(&display_names)
    .fetch_all(&mut **tx)
    .await?
    .into_iter()
    .collect();

    let profile_ids: HashMap<String, i64> = account_ids
        .into_iter()
        .filter_map(|(username, account_id)| {
            profile_by_account
                .get(&account_id)
                .map(|profile_id| (username, *profile_id))
        })
        .collect();

    for (table, stewarded) in [
        ("profile_organizations", false),
        ("profile_stewarded_organizations", true),
    ] {
        let (pairs_profile, pairs_organization) =
            membership_pairs(seeds, &profile_ids, organization_ids, stewarded)?;

        if pairs_profile.is_empty() {
            continue;
        }

        sqlx::query(&format!(
            "INSERT INTO {table} (profile_id, organization_id)
             SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[])"
        ))
        .bind(&pairs_profile)
        .bind(&pairs_organization)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Column arrays of `(profile_id, organization_id)` rows for either the
/// membership or the stewardship join table.
fn membership_pairs(
    seeds: &[ProfileSeed],
    profile_ids: &HashMap<String, i64>,
    organization_ids: &HashMap<String, i64>,
    stewarded: bool,
) -> Result<(Vec<i64>, Vec<i64>), String> {
    let mut pairs_profile = Vec::new();
    let mut pairs_organization = Vec::new();

    for seed in seeds {
        let profile_id = profile_ids
            .get(&seed.username)
            .ok_or_else(|| format!("Profile not created: {}", seed.username))?;
        let short_names = if stewarded {
            &seed.stewarded_organizations
        } else {
            &seed.organizations
        };
        for short_name in short_names {
            let organization_id = organization_ids
                .get(short_name)
                .ok_or_else(|| format!("Unknown organization: {}", short_name))?;
            pairs_profile.push(*profile_id);
            pairs_organization.push(*organization_id);
        }
    }

    Ok((pairs_profile, pairs_organization))
}

/// Number of seeded accounts whose username is in `usernames`.
pub async fn count_existing(
    db: &PgPool,
    usernames: &[String],
) -> Result<i64, Box<dyn std::error::Error>> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE username = ANY($1)")
        .bind(usernames)
        .fetch_one(db)
        .await?;
    Ok(count)
}

/// Removes every account and profile.
pub async fn clear_profiles(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing profiles and accounts...");

    let result = sqlx::query("DELETE FROM accounts").execute(db).await?;

    println!(
        "   ✓ Deleted {} accounts in {:?}",
        result.rows_affected(),
        start_time.elapsed()
    );

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_extra_users() {
        let users = generate_extra_users(50, &["Minitrue", "Minipax"]);
        assert_eq!(users.len(), 50);

        let mut names: Vec<_> = users.iter().map(|u| u.username.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 50);

        for user in &users {
            assert_eq!(user.role, Role::User);
            assert!(user.stewarded_organizations.is_empty());
            assert_eq!(user.organizations.len(), 1);
            assert!(
                user.username
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn test_generate_without_organizations() {
        let users = generate_extra_users(3, &[]);
        assert!(users.iter().all(|u| u.organizations.is_empty()));
    }

    fn seed(username: &str, organizations: &[&str], stewarded: &[&str]) -> ProfileSeed {
        ProfileSeed {
            username: username.to_string(),
            display_name: username.to_string(),
            role: Role::OrgSteward,
            organizations: organizations.iter().map(|s| s.to_string()).collect(),
            stewarded_organizations: stewarded.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_membership_pairs_join_on_username() {
        let seeds = vec![
            seed("wsmith", &["Minitrue"], &["Minitrue"]),
            seed("obrien", &["Miniluv"], &["Miniluv", "Minipax"]),
        ];
        // Ids deliberately out of input order.
        let profile_ids = HashMap::from([("obrien".to_string(), 10), ("wsmith".to_string(), 20)]);
        let organization_ids = HashMap::from([
            ("Minitrue".to_string(), 1),
            ("Minipax".to_string(), 2),
            ("Miniluv".to_string(), 3),
        ]);

        let members = membership_pairs(&seeds, &profile_ids, &organization_ids, false).unwrap();
        assert_eq!(members, (vec![20, 10], vec![1, 3]));

        let stewards = membership_pairs(&seeds, &profile_ids, &organization_ids, true).unwrap();
        assert_eq!(stewards, (vec![20, 10, 10], vec![1, 3, 2]));
    }

    #[test]
    fn test_membership_pairs_report_missing_ids() {
        let seeds = vec![seed("julia", &["Minitrue"], &[])];
        let organization_ids = HashMap::from([("Minitrue".to_string(), 1)]);

        let err = membership_pairs(&seeds, &HashMap::new(), &organization_ids, false).unwrap_err();
        assert_eq!(err, "Profile not created: julia");

        let profile_ids = HashMap::from([("julia".to_string(), 2)]);
        let err = membership_pairs(&seeds, &profile_ids, &HashMap::new(), false).unwrap_err();
        assert_eq!(err, "Unknown organization: Minitrue");
    }
}
