use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{email::Email, password::Password, person_name::PersonName, role::Role};

/// Field-level validation failures for user input.
#[derive(Debug, Error, PartialEq)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Name must not be empty")]
    InvalidName,
    #[error("Unknown role: {0}")]
    InvalidRole(String),
    #[error("Company name must not be empty")]
    InvalidCompany,
}

/// A registration aggregate: everything needed to create an identity.
///
/// Owns the plaintext [`Password`]; user stores decide how to persist it
/// (the Postgres store hashes, the in-memory store compares directly).
/// Activation and verification flags are not carried here - every new user
/// starts inactive and unverified.
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    name: PersonName,
    email: Email,
    password: Password,
    role: Role,
    company: Option<String>,
}

impl User {
    pub fn new(
        name: PersonName,
        email: Email,
        password: Password,
        role: Role,
        company: Option<String>,
    ) -> Result<Self, UserError> {
        let company = match company {
            Some(raw) => {
                let trimmed = raw.trim().to_string();
                if trimmed.is_empty() {
                    return Err(UserError::InvalidCompany);
                }
                Some(trimmed)
            }
            None => None,
        };

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            password,
            role,
            company,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn password_matches(&self, candidate: &Password) -> bool {
        &self.password == candidate
    }
}

/// Snapshot of a stored identity, without secrets.
///
/// This is what login returns, what `/auth/me` re-validates against, and -
/// with `is_active == false` - the item the approval workflow lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub role: Role,
    pub company: Option<String>,
    pub is_active: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Snapshot of a freshly registered user: inactive and unverified.
    pub fn from_new_user(user: &User, created_at: DateTime<Utc>) -> Self {
        Self {
            id: user.id(),
            first_name: user.name().first().to_string(),
            last_name: user.name().last().to_string(),
            email: user.email().clone(),
            role: user.role(),
            company: user.company().map(str::to_string),
            is_active: false,
            email_verified: false,
            created_at,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
