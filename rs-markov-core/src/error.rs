use thiserror::Error;

use crate::model::context::Context;

/// Failures of the Markov core.
///
/// Each condition is distinct so that callers can decide whether to retry
/// a generation from scratch or abort.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkovError {
	#[error("order must be positive, got {0}")]
	InvalidOrder(usize),
	#[error("number of lines must be positive, got {0}")]
	InvalidLineCount(usize),
	#[error("order mismatch: model has order {expected}, got {found}")]
	OrderMismatch { expected: usize, found: usize },
	#[error("no trained transitions for context {0}")]
	UnknownContext(Context),
	#[error("generation did not reach a stop after {steps} tokens")]
	DidNotTerminate { steps: usize },
}

/// Failures of the raw message store.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("store i/o failed: {0}")]
	Io(#[from] std::io::Error),
	#[error("store file could not be encoded or decoded: {0}")]
	Codec(#[from] postcard::Error),
	#[error("failed to replace store file: {0}")]
	Persist(#[from] tempfile::PersistError),
}

/// Failures while synchronising channels with the chat service.
#[derive(Debug, Error)]
pub enum SyncError {
	#[error("chat service request failed: {0}")]
	Transport(String),
	#[error("chat service returned an error: {0}")]
	Service(String),
	#[error("invalid message timestamp '{0}'")]
	InvalidTimestamp(String),
	#[error(transparent)]
	Store(#[from] StoreError),
}
