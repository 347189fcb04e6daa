//! Shared identifier types used across the API, auth, and database layers.

use uuid::Uuid;

pub type UserId = Uuid;
pub type ResourceId = Uuid;
pub type SessionId = Uuid;
pub type NoteId = Uuid;
pub type ResumeId = Uuid;
pub type RoadmapId = Uuid;

/// Shorten a UUID for log fields (first group only).
pub fn abbrev_uuid(id: &Uuid) -> String {
    let s = id.to_string();
    s.split('-').next().unwrap_or(&s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbrev_uuid() {
        let id: Uuid = "a1b2c3d4-0000-0000-0000-000000000000".parse().unwrap();
        assert_eq!(abbrev_uuid(&id), "a1b2c3d4");
    }
}
