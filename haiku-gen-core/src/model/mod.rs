//! Top-level module for the n-gram language model.
//!
//! This module provides:
//! - Tokens and padding symbols (`Token`, `Symbol`)
//! - N-gram frequency counting (`NGramCounts`)
//! - The probabilistic automaton built from the counts (`Automaton`, `State`)
//! - Syllable-constrained generation (`HaikuGenerator`, `HaikuInput`)
//! - The model facade tying them together (`NGramModel`)

/// Fixed-order n-gram model (`n >= 2`).
///
/// Handles corpus padding, smoothed scoring and generation.
pub mod ngram_model;

/// Probabilistic deterministic automaton whose states are (n-1)-symbol contexts.
///
/// Supports stepping, sequence scoring and random walks.
pub mod automaton;

/// A single automaton state and its outgoing transitions.
pub mod state;

/// N-gram and (n-1)-gram count tables.
pub mod counter;

/// Bounded-backtracking random walk producing lines of an exact syllable count.
pub mod haiku;

/// Generation settings for poems (shape, header, restart budget).
pub mod haiku_input;

/// Token granularity and padding symbols.
pub mod token;
