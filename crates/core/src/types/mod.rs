//! Core types for Cantina.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod email;
pub mod id;
pub mod order;
pub mod status;

pub use catalog::{Category, Product};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Order, OrderCustomer, OrderLine};
pub use status::*;
