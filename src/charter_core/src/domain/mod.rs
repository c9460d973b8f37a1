pub mod email;
pub mod listing;
pub mod password;
pub mod person_name;
pub mod role;
pub mod user;
pub mod verification;
