//! Application services for profiles and badges.

mod directory;

pub use directory::{ProfileService, ProfileServiceError, ProfileServiceResult, UpdateProfileRequest};
