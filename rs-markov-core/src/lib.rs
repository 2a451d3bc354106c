//! Word-level Markov chain text generation from chat history.
//!
//! This crate provides:
//! - Token normalization tuned for chat messages (mentions and punctuation dropped)
//! - A variable-order Markov model with weighted-random sentence generation
//! - A key-ordered on-disk store for raw message text
//! - Channel synchronisation against an abstract chat service
//!
//! The trained model is never persisted: it is rebuilt from the stored
//! corpus on every run.

/// Error types shared by every layer of the crate.
pub mod error;

/// Markov model, its frequency table and generation settings.
pub mod model;

/// Raw message storage, corpus access and channel synchronisation.
pub mod corpus;

/// File helpers (store paths, atomic writes).
///
/// Not exposed
pub(crate) mod io;

pub use error::{MarkovError, StoreError, SyncError};
pub use model::generation_config::GenerationConfig;
pub use model::markov_model::MarkovModel;
