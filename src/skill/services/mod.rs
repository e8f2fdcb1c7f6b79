//! Application services for skill offering and discovery.

mod catalogue;

pub use catalogue::{
    OfferSkillRequest, SkillSearchRequest, SkillService, SkillServiceError, SkillServiceResult,
};
