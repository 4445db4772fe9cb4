//! Generic list-and-filter view over any [`Resource`](qams_client::traits::Resource).

pub mod view;

pub use view::{ListState, ListView};
