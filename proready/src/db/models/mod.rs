//! Database-layer request/response models, kept separate from the API DTOs.

pub mod notes;
pub mod resources;
pub mod resumes;
pub mod roadmaps;
pub mod sessions;
pub mod streaks;
pub mod users;
