//! Core types and trait definitions for the Gazette news API.
//!
//! No HTTP or database dependencies live here. Every other crate in the
//! workspace depends on it.

pub mod article;
pub mod comment;
pub mod error;
pub mod id;
pub mod query;
pub mod seed;
pub mod store;
pub mod topic;
pub mod user;
pub mod validate;

pub use error::{Error, Missing, Reference, Result};
