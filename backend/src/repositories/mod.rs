pub mod access_record;
pub mod blog;
pub mod follow;
pub mod session;
pub mod user;
