//! Client (tenant organization) entities.

pub mod model;

pub use model::{Client, ClientMembership, ClientType, CreateClient, UpdateClient};
