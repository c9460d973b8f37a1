use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres, QueryBuilder, Row, postgres::PgRow};
use uuid::Uuid;

use charter_core::{
    ActivationOutcome, Email, Identity, Page, Password, PendingQuery, Role, SortKey, User,
    UserStore, UserStoreError,
};

const IDENTITY_COLUMNS: &str =
    "id, first_name, last_name, email, role, company, is_active, email_verified, created_at";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: sqlx::PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User) -> Result<Identity, UserStoreError> {
        let password = user.password().clone();
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let created_at = Utc::now();

        let query = sqlx::query(
            r#"
                INSERT INTO users
                    (id, first_name, last_name, email, password_hash, role, company,
                     is_active, email_verified, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, FALSE, $8)
            "#,
        )
        .bind(user.id())
        .bind(user.name().first())
        .bind(user.name().last())
        .bind(user.email().expose())
        .bind(password_hash.expose_secret())
        .bind(user.role().as_str())
        .bind(user.company())
        .bind(created_at);

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(Identity::from_new_user(&user, created_at))
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Identity, UserStoreError> {
        let sql = format!("SELECT {IDENTITY_COLUMNS}, password_hash FROM users WHERE email = $1");
        let query = sqlx::query(&sql).bind(email.expose());

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?
            .ok_or(UserStoreError::UserNotFound)?;

        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        verify_password_hash(Secret::from(password_hash), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        identity_from_row(&row)
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<Identity, UserStoreError> {
        let sql = format!("SELECT {IDENTITY_COLUMNS} FROM users WHERE email = $1");
        let query = sqlx::query(&sql).bind(email.expose());

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?
            .ok_or(UserStoreError::UserNotFound)?;

        identity_from_row(&row)
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn get_user_by_id(&self, id: Uuid) -> Result<Identity, UserStoreError> {
        let sql = format!("SELECT {IDENTITY_COLUMNS} FROM users WHERE id = $1");
        let query = sqlx::query(&sql).bind(id);

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?
            .ok_or(UserStoreError::UserNotFound)?;

        identity_from_row(&row)
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(
        &self,
        email: &Email,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE email = $2")
            .bind(password_hash.expose_secret())
            .bind(email.expose())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Marking email as verified", skip_all)]
    async fn mark_email_verified(&self, email: &Email) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET email_verified = TRUE WHERE email = $1")
            .bind(email.expose())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Activating user in PostgreSQL", skip_all)]
    async fn activate_user(&self, id: Uuid) -> Result<ActivationOutcome, UserStoreError> {
        let result =
            sqlx::query("UPDATE users SET is_active = TRUE WHERE id = $1 AND is_active = FALSE")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() > 0 {
            return Ok(ActivationOutcome::Activated);
        }

        // Nothing updated: either the user is already active or it does not exist.
        let row = sqlx::query("SELECT is_active FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        match row {
            Some(_) => Ok(ActivationOutcome::AlreadyActive),
            None => Err(UserStoreError::UserNotFound),
        }
    }

    #[tracing::instrument(name = "Deleting user from PostgreSQL", skip_all)]
    async fn delete_user(&self, id: Uuid) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Listing pending users from PostgreSQL", skip_all)]
    async fn list_pending(&self, query: &PendingQuery) -> Result<Page<Identity>, UserStoreError> {
        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) AS total FROM users WHERE is_active = FALSE");
        push_search_filter(&mut count_builder, query);

        let total: i64 = count_builder
            .build()
            .fetch_one(&self.pool)
            .await
            .and_then(|row| row.try_get("total"))
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {IDENTITY_COLUMNS} FROM users WHERE is_active = FALSE"
        ));
        push_search_filter(&mut builder, query);

        builder.push(match query.sort {
            SortKey::NewestFirst => " ORDER BY created_at DESC",
            SortKey::OldestFirst => " ORDER BY created_at ASC",
            SortKey::NameAsc => " ORDER BY lower(first_name || ' ' || last_name) ASC",
            SortKey::NameDesc => " ORDER BY lower(first_name || ' ' || last_name) DESC",
        });

        builder.push(" LIMIT ");
        builder.push_bind(i64::from(query.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(query.offset() as i64);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let items = rows
            .iter()
            .map(identity_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total: total as u64,
        })
    }
}

fn push_search_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &PendingQuery) {
    if let Some(term) = &query.search {
        let pattern = format!("%{}%", escape_like_pattern(term));
        builder.push(" AND (first_name || ' ' || last_name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR email ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR company ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
}

// `%` and `_` are pattern metacharacters in ILIKE; the search term is a
// literal substring.
fn escape_like_pattern(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn identity_from_row(row: &PgRow) -> Result<Identity, UserStoreError> {
    let unexpected = |e: sqlx::Error| UserStoreError::UnexpectedError(e.to_string());

    let email: String = row.try_get("email").map_err(unexpected)?;
    let email = Email::try_from(Secret::from(email))
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

    let role: String = row.try_get("role").map_err(unexpected)?;
    let role: Role = role
        .parse()
        .map_err(|e: charter_core::UserError| UserStoreError::UnexpectedError(e.to_string()))?;

    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;

    Ok(Identity {
        id: row.try_get("id").map_err(unexpected)?,
        first_name: row.try_get("first_name").map_err(unexpected)?,
        last_name: row.try_get("last_name").map_err(unexpected)?,
        email,
        role,
        company: row.try_get("company").map_err(unexpected)?,
        is_active: row.try_get("is_active").map_err(unexpected)?,
        email_verified: row.try_get("email_verified").map_err(unexpected)?,
        created_at,
    })
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();
    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            )
            .verify_password(
                password_candidate.as_ref().expose_secret().as_bytes(),
                &expected_password_hash,
            )
            .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            let hasher = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            );
            hasher
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}
