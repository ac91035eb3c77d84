//! Application services for feedback promotion.

mod promoter;

pub use promoter::{FeedbackPromoter, PromotionOutcome};
