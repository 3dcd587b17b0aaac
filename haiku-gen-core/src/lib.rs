//! N-gram language modelling and haiku generation.
//!
//! This crate provides:
//! - Character-level and word-level n-gram models
//! - A probabilistic finite-state automaton built from the n-gram counts
//! - Sequence scoring with optional Laplace smoothing
//! - Free random generation and syllable-constrained generation (haiku)
//! - Corpus readers and a syllable dictionary
//!
//! Randomness is always supplied by the caller, so a seeded generator
//! reproduces its output.

/// Core n-gram models and generation logic.
pub mod model;

/// Readers turning text into training sequences.
pub mod corpus;

/// Syllable lookup used by constrained generation.
pub mod syllables;

/// Error type shared by the crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;

pub use error::ModelError;
pub use model::haiku_input::HaikuInput;
pub use model::ngram_model::NGramModel;
pub use model::token::{Symbol, Token};
pub use syllables::{SyllableDictionary, SyllableLookup};
