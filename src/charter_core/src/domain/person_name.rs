use super::user::UserError;

const MAX_NAME_LENGTH: usize = 100;

/// First and last name of a registrant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    first: String,
    last: String,
}

impl PersonName {
    pub fn parse(first: impl Into<String>, last: impl Into<String>) -> Result<Self, UserError> {
        let first = validate_part(first.into())?;
        let last = validate_part(last.into())?;
        Ok(Self { first, last })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    /// "First Last", the way listings and emails address the user.
    pub fn display(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

fn validate_part(part: String) -> Result<String, UserError> {
    let trimmed = part.trim().to_string();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(UserError::InvalidName);
    }
    Ok(trimmed)
}
