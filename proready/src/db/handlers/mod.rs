//! Database repositories, one per table.

pub mod notes;
pub mod repository;
pub mod resources;
pub mod resumes;
pub mod roadmaps;
pub mod sessions;
pub mod streaks;
pub mod users;

pub use notes::Notes;
pub use repository::Repository;
pub use resources::Resources;
pub use resumes::Resumes;
pub use roadmaps::Roadmaps;
pub use sessions::Sessions;
pub use streaks::Streaks;
pub use users::Users;
