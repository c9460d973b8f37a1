pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    listing::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PendingQuery, SortKey, SortKeyError},
    password::Password,
    person_name::PersonName,
    role::Role,
    user::{Identity, User, UserError},
    verification::{TokenPurpose, VerificationToken},
};

pub use ports::{
    repositories::{
        ActivationOutcome, BannedTokenStore, BannedTokenStoreError, UserStore, UserStoreError,
        VerificationTokenStore, VerificationTokenStoreError,
    },
    services::EmailClient,
};
