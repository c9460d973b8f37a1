pub mod approve_user;
pub mod forgot_password;
pub mod list_pending;
pub mod login;
pub mod logout;
pub mod register;
pub mod reject_user;
pub mod resend_verification;
pub mod reset_password;
pub mod verify_email;
