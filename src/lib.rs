//! fitplan: personalization and recommendation engine.
//!
//! Turns a validated user profile into a seven-day workout plan and a
//! culturally/budget-constrained diet plan. The pipeline runs in a strict
//! order: biometrics → model inference → note interpretation → plan
//! generation, and is a pure deterministic function of the profile and the
//! loaded model bundle.

pub mod error;
pub mod models;
pub mod services;

pub use error::EngineError;
pub use models::RecommendationResult;
pub use services::PlanGenerationService;
