//! Accreditation lookup entities.

pub mod model;

pub use model::Accreditation;
