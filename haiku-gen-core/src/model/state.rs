use std::collections::BTreeMap;

use rand::Rng;

use super::token::{Context, Symbol, Token};

/// Destination and probability of one outgoing transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<T> {
	/// Context reached after emitting the token.
	pub target: Context<T>,
	/// Training count of the n-gram behind this transition.
	pub count: usize,
	/// count(n-gram) / count(source context).
	pub probability: f64,
}

/// Represents a state of the automaton.
///
/// A `State` corresponds to a fixed (n-1)-symbol context (`key`) and stores
/// the transitions leaving it, indexed by the emitted token.
///
/// ## Responsibilities:
/// - Hold outgoing transitions in token order, so a seeded walk is reproducible
/// - Report the halting probability left over by the outgoing transitions,
///   computed on integer counts so a non-final state halts with probability 0
/// - Pick the next transition by cumulative subtraction
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Every transition probability is in (0, 1] and their sum is <= 1
/// - The transition counts never add up to more than `context_count`
#[derive(Clone, Debug)]
pub struct State<T> {
	/// Identifier of the state (n-1 symbol context).
	key: Context<T>,
	/// Training count of `key` as an (n-1)-gram.
	context_count: usize,
	/// Sum of the transition counts.
	outgoing_count: usize,
	/// Outgoing transitions indexed by the emitted token.
	transitions: BTreeMap<T, Edge<T>>,
	/// Whether the context was followed by the end symbol in training.
	is_final: bool,
}

impl<T: Token> State<T> {
	/// Creates a new state without transitions for the given context,
	/// seen `context_count` times in training.
	pub fn new(key: &[Symbol<T>], context_count: usize) -> Self {
		Self {
			key: key.to_vec(),
			context_count,
			outgoing_count: 0,
			transitions: BTreeMap::new(),
			is_final: false,
		}
	}

	pub fn key(&self) -> &[Symbol<T>] {
		&self.key
	}

	pub fn context_count(&self) -> usize {
		self.context_count
	}

	/// Adds the transition emitting `token`, seen `count` times after `key`.
	///
	/// The caller guarantees `context_count > 0`.
	pub(crate) fn add_transition(&mut self, token: T, target: Context<T>, count: usize) {
		let probability = count as f64 / self.context_count as f64;
		let edge = Edge { target, count, probability };
		if let Some(previous) = self.transitions.insert(token, edge) {
			self.outgoing_count -= previous.count;
		}
		self.outgoing_count += count;
	}

	pub(crate) fn mark_final(&mut self) {
		self.is_final = true;
	}

	/// Whether a sequence may stop in this state.
	pub fn is_final(&self) -> bool {
		self.is_final
	}

	/// Follows the transition emitting `token`, if any.
	pub fn step(&self, token: &T) -> Option<&Edge<T>> {
		self.transitions.get(token)
	}

	/// Sum of the outgoing transition probabilities.
	pub fn outgoing_probability(&self) -> f64 {
		self.transitions.values().map(|edge| edge.probability).sum()
	}

	/// Probability of stopping here: what the outgoing transitions leave.
	///
	/// Worked out on the counts, so it is exactly 0 when every occurrence
	/// of the context was followed by a token.
	pub fn halting_probability(&self) -> f64 {
		if self.context_count == 0 {
			return 1.0;
		}
		let halting = self.context_count.saturating_sub(self.outgoing_count);
		halting as f64 / self.context_count as f64
	}

	/// Picks the next transition, or `None` to halt.
	///
	/// A uniform draw in [0, 1) is reduced by each outgoing probability in
	/// turn; the first transition that brings it to zero or below is taken.
	/// When every transition is exhausted the remaining mass is the halting
	/// probability, and the walk stops.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(&T, &Edge<T>)> {
		let cutoff: f64 = rng.random();
		self.select(cutoff)
	}

	/// Picks the next transition among the outgoing ones only.
	///
	/// Same cumulative subtraction as [`State::predict`], with the draw
	/// scaled to the outgoing mass so that halting is never chosen.
	/// Returns `None` only if the state has no transitions.
	pub fn predict_outgoing<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(&T, &Edge<T>)> {
		let total = self.outgoing_probability();
		if total <= 0.0 {
			return None;
		}

		let cutoff = rng.random::<f64>() * total;
		// Rounding can leave a sliver of mass after the last transition
		self.select(cutoff).or_else(|| self.transitions.iter().next_back())
	}

	fn select(&self, mut cutoff: f64) -> Option<(&T, &Edge<T>)> {
		for (token, edge) in &self.transitions {
			cutoff -= edge.probability;
			if cutoff <= 0.0 {
				return Some((token, edge));
			}
		}
		None
	}
}
