//! Authentication: password hashing, JWT sessions, and the request extractor.

pub mod current_user;
pub mod password;
pub mod session;
