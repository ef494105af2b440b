//! PostgreSQL profile store.
//!
//! Profiles are loaded in two steps: the matching profile rows first, then
//! their groups and organizations in one batched query each (`= ANY($1)`).

use std::collections::HashMap;

use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use ozp_models::{
    Account, Group, Organization, OrganizationRef, Profile, ProfileChanges, ProfileId,
    ProfileQuery, Role, organizations,
};

use crate::error::{StoreError, StoreResult};
use crate::repository::ProfileRepository;

const PROFILE_COLUMNS: &str = r#"
    SELECT p.id, p.display_name, p.is_new_user, a.id AS account_id, a.username
    FROM profiles p
    JOIN accounts a ON a.id = p.account_id
    JOIN profile_highest_roles hr ON hr.profile_id = p.id
"#;

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: ProfileId,
    display_name: String,
    is_new_user: bool,
    account_id: i64,
    username: String,
}

#[derive(Debug, FromRow)]
struct GroupRow {
    account_id: i64,
    name: String,
}

#[derive(Debug, FromRow)]
struct ProfileOrganizationRow {
    profile_id: ProfileId,
    #[sqlx(flatten)]
    organization: Organization,
}

#[derive(Clone, Debug)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn hydrate(&self, rows: Vec<ProfileRow>) -> StoreResult<Vec<Profile>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let profile_ids: Vec<i64> = rows.iter().map(|r| r.id.get()).collect();
        let account_ids: Vec<i64> = rows.iter().map(|r| r.account_id).collect();

        let group_rows = sqlx::query_as::<_, GroupRow>(
            "SELECT account_id, name FROM account_groups WHERE account_id = ANY($1)",
        )
        .bind(&account_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut groups: HashMap<i64, Vec<Group>> = HashMap::new();
        for row in group_rows {
            let name = row
                .name
                .parse::<Role>()
                .map_err(|_| StoreError::UnknownGroup(row.name.clone()))?;
            groups.entry(row.account_id).or_default().push(Group { name });
        }

        let mut members = self
            .organizations_by_profile("profile_organizations", &profile_ids)
            .await?;
        let mut stewards = self
            .organizations_by_profile("profile_stewarded_organizations", &profile_ids)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut account_groups = groups.remove(&row.account_id).unwrap_or_default();
                account_groups.sort_by_key(|g| g.name);
                Profile {
                    id: row.id,
                    display_name: row.display_name,
                    is_new_user: row.is_new_user,
                    user: Account {
                        username: row.username,
                        groups: account_groups,
                    },
                    organizations: members.remove(&row.id).unwrap_or_default(),
                    stewarded_organizations: stewards.remove(&row.id).unwrap_or_default(),
                }
            })
            .collect())
    }

    /// `table` is one of the two fixed join tables; it is never user input.
    async fn organizations_by_profile(
        &self,
        table: &'static str,
        profile_ids: &[i64],
    ) -> StoreResult<HashMap<ProfileId, Vec<Organization>>> {
        let sql = format!(
            "SELECT j.profile_id, o.id, o.short_name, o.title \
             FROM {table} j JOIN organizations o ON o.id = j.organization_id \
             WHERE j.profile_id = ANY($1) \
             ORDER BY o.title, o.id"
        );
        let rows = sqlx::query_as::<_, ProfileOrganizationRow>(&sql)
            .bind(profile_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_profile: HashMap<ProfileId, Vec<Organization>> = HashMap::new();
        for row in rows {
            by_profile
                .entry(row.profile_id)
                .or_default()
                .push(row.organization);
        }
        for list in by_profile.values_mut() {
            *list = organizations::normalize(std::mem::take(list));
        }
        Ok(by_profile)
    }

    async fn find_one(
        &self,
        condition: &str,
        value: QueryValue<'_>,
    ) -> StoreResult<Option<Profile>> {
        let sql = format!("{PROFILE_COLUMNS} WHERE {condition}");
        let query = sqlx::query_as::<_, ProfileRow>(&sql);
        let row = match value {
            QueryValue::Id(id) => query.bind(id).fetch_optional(&self.pool).await?,
            QueryValue::Text(text) => query.bind(text).fetch_optional(&self.pool).await?,
        };

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }
}

enum QueryValue<'a> {
    Id(ProfileId),
    Text(&'a str),
}

/// Finds the organization named by `org_ref` (title first, then short name),
/// creating it when nothing matches.
async fn resolve_organization(
    tx: &mut Transaction<'_, Postgres>,
    org_ref: &OrganizationRef,
) -> StoreResult<i64> {
    if org_ref.title.is_none() && org_ref.short_name.is_none() {
        return Err(StoreError::EmptyOrganizationRef);
    }

    let existing = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id FROM organizations
        WHERE title = $1 OR short_name = $2
        ORDER BY (title = $1) DESC NULLS LAST
        LIMIT 1
        "#,
    )
    .bind(org_ref.title.as_deref())
    .bind(org_ref.short_name.as_deref())
    .fetch_optional(&mut **tx)
    .await?;
    if let Some(id) = existing {
        return Ok(id);
    }

    let (short_name, title) = org_ref.new_organization_names();
    debug!(%title, %short_name, "Creating organization");
    let created = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO organizations (short_name, title)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        RETURNING id
        "#,
    )
    .bind(&short_name)
    .bind(&title)
    .fetch_optional(&mut **tx)
    .await?;

    match created {
        Some(id) => Ok(id),
        // The derived short name or title collided with an existing row.
        None => Ok(sqlx::query_scalar::<_, i64>(
            "SELECT id FROM organizations WHERE short_name = $1 OR title = $2 LIMIT 1",
        )
        .bind(&short_name)
        .bind(&title)
        .fetch_one(&mut **tx)
        .await?),
    }
}

impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ProfileId) -> StoreResult<Option<Profile>> {
        self.find_one("p.id = $1", QueryValue::Id(id)).await
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Profile>> {
        self.find_one("a.username = $1", QueryValue::Text(username)).await
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ProfileQuery) -> StoreResult<Vec<Profile>> {
        let levels: Option<Vec<i32>> = query
            .roles
            .as_ref()
            .map(|roles| roles.iter().map(|r| i32::from(r.level())).collect());

        let sql = format!(
            "{PROFILE_COLUMNS} \
             WHERE ($1::INT[] IS NULL OR hr.role_level = ANY($1)) \
             AND ($2::TEXT IS NULL OR starts_with(a.username, $2)) \
             ORDER BY p.id"
        );
        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(levels)
            .bind(query.username_starts_with.as_deref())
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Profiles matched");
        self.hydrate(rows).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: ProfileId, changes: ProfileChanges) -> StoreResult<Option<Profile>> {
        let mut tx = self.pool.begin().await?;

        let locked =
            sqlx::query_scalar::<_, i64>("SELECT id FROM profiles WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        if let Some(display_name) = &changes.display_name {
            sqlx::query("UPDATE profiles SET display_name = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(display_name)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(is_new_user) = changes.is_new_user {
            sqlx::query("UPDATE profiles SET is_new_user = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(is_new_user)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(refs) = &changes.stewarded_organizations {
            let mut organization_ids = Vec::with_capacity(refs.len());
            for org_ref in refs {
                organization_ids.push(resolve_organization(&mut tx, org_ref).await?);
            }

            sqlx::query("DELETE FROM profile_stewarded_organizations WHERE profile_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                INSERT INTO profile_stewarded_organizations (profile_id, organization_id)
                SELECT $1, UNNEST($2::BIGINT[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(id)
            .bind(&organization_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        self.find_by_id(id).await
    }
}
