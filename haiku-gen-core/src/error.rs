//! Errors produced while building a model or generating from it.
//!
//! Scoring never fails: an unseen n-gram is a probability of `0.0`
//! (or `-inf` once logged), both of which are ordinary values.

use thiserror::Error;

/// Errors returned by the model, the generators and the file loaders.
#[derive(Debug, Error)]
pub enum ModelError {
	/// The requested order is below 2.
	#[error("n must be >= 2, got {0}")]
	InvalidOrder(usize),

	/// The training corpus contains no sequence at all.
	#[error("training corpus is empty")]
	EmptyCorpus,

	/// The smoothing constant is negative, infinite or NaN.
	#[error("smoothing must be a finite value >= 0, got {0}")]
	InvalidSmoothing(f64),

	/// The count tables are inconsistent (a context needed by an n-gram
	/// was never counted). Points at a padding or tokenization problem.
	#[error("model construction failed: {0}")]
	Construction(String),

	/// The constrained search could not reach its syllable target
	/// within the restart budget.
	#[error("could not generate a line of {target} syllables after {restarts} restarts")]
	GenerationFailure {
		/// Requested syllable count.
		target: usize,
		/// Restarts performed before giving up.
		restarts: usize,
	},

	/// File access failed.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A binary cache could not be encoded or decoded.
	#[error("cache error: {0}")]
	Cache(#[from] postcard::Error),
}
