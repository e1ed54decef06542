pub mod mutation;
pub mod rate_limit;
pub mod recommendation;
pub mod timeline;

pub use mutation::MutationService;
pub use rate_limit::{RateLimitAction, RateLimiter};
pub use recommendation::RecommendationEngine;
pub use timeline::TimelineService;
