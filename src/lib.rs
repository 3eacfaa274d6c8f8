//! # Lista Core
//!
//! Core list state and view logic for the Lista to-do app.
//!
//! This crate provides the fundamental types and operations for managing a
//! single in-memory to-do list without any dependency on specific UI
//! implementations: a canonical item store, a derived filter view, and a
//! mutation facade that a UI layer drives from its event handlers.

pub mod domain;
pub mod error;
pub mod service;
pub mod view;

// Re-export commonly used types
pub use domain::{
    item::{Item, ItemId, MAX_TEXT_LEN},
    store::{ChangeKind, ItemStore, StoreEvent, StoreSnapshot},
};
pub use error::{ListaError, Result};
pub use service::TodoService;
pub use view::FilterView;
