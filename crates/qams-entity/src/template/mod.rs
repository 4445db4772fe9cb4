//! Onboarding template entities.

pub mod model;

pub use model::{CreateTemplate, OnboardingTemplate, TemplateType, UpdateTemplate};
