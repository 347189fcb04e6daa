pub mod auth;
pub mod notes;
pub mod resources;
pub mod resumes;
pub mod roadmaps;
pub mod sessions;
pub mod streaks;
