//! Top-level module for the Markov chain generator.
//!
//! This module provides a word-level Markov text generator, including:
//! - Token normalization (`token`)
//! - Sliding context windows (`Context`)
//! - The context → next-token count table (`FrequencyTable`)
//! - Training and generation (`MarkovModel`)
//! - Validated generation settings (`GenerationConfig`)

/// Canonical tokens and the raw-token normalization rule.
pub mod token;

/// Ordered context windows used as lookup keys.
pub mod context;

/// Internal representation of the transitions observed after one context.
///
/// Tracks next-token counts and supports weighted random sampling.
/// This module is not exposed publicly.
mod state;

/// Two-level mapping from context to weighted next-token choices.
pub mod frequency_table;

/// Order-N Markov model: training and sentence generation.
pub mod markov_model;

/// Generation settings (order, line count, step cap, seed).
pub mod generation_config;
