pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use use_cases::{
    approve_user::{ApproveUserError, ApproveUserUseCase},
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase},
    list_pending::{ListPendingError, ListPendingUseCase},
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    register::{RegisterError, RegisterUseCase},
    reject_user::{RejectUserError, RejectUserUseCase},
    resend_verification::{
        ResendOutcome, ResendVerificationError, ResendVerificationUseCase,
    },
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    verify_email::{VerifyEmailError, VerifyEmailUseCase},
};
