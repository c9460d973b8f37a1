//! # Charter - Franchise Network Identity Service Library
//!
//! This is a facade crate that re-exports all public APIs from the portal
//! service components. Use this crate to get access to the registration,
//! session and approval functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! charter = { path = "../charter" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Identity`, `Role`, etc.
//! - **Repository traits**: `UserStore`, `VerificationTokenStore`, `BannedTokenStore`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `ApproveUserUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `RedisBannedTokenStore`, `PostmarkEmailClient`, etc.
//! - **Service**: `PortalService` - The main entry point for the portal service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use charter_core::*;
}

// Re-export most commonly used core types at the root level
pub use charter_core::{
    Email, Identity, Page, Password, PendingQuery, PersonName, Role, SortKey, TokenPurpose, User,
    UserError, VerificationToken,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use charter_core::{
        BannedTokenStore, BannedTokenStoreError, UserStore, UserStoreError,
        VerificationTokenStore, VerificationTokenStoreError,
    };
}

// Re-export repository traits at root level
pub use charter_core::{
    ActivationOutcome, BannedTokenStore, BannedTokenStoreError, EmailClient, UserStore,
    UserStoreError, VerificationTokenStore, VerificationTokenStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use charter_application::*;
}

// Re-export use cases at root level
pub use charter_application::{
    ApproveUserUseCase, ForgotPasswordUseCase, ListPendingUseCase, LoginUseCase, LogoutUseCase,
    RegisterUseCase, RejectUserUseCase, ResendVerificationUseCase, ResetPasswordUseCase,
    VerifyEmailUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use charter_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use charter_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use charter_adapters::email::*;
    }

    /// JWT session token utilities
    pub mod auth {
        pub use charter_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use charter_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use charter_adapters::{
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{
        HashMapUserStore, HashMapVerificationTokenStore, HashSetBannedTokenStore,
        PostgresUserStore, RedisBannedTokenStore, RedisVerificationTokenStore,
    },
};

// ============================================================================
// Portal Service (Main Entry Point)
// ============================================================================

/// Main portal service
pub use charter_service::{PortalService, configure_postgresql, configure_redis, get_redis_client};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
