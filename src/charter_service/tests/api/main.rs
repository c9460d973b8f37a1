mod helpers;

mod approvals;
mod login;
mod register;
mod verification;
