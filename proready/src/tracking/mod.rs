//! Pure progress-tracking logic: streak day arithmetic and session analytics.

pub mod analytics;
pub mod streak;
