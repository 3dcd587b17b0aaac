use std::collections::{HashMap, HashSet};

use log::debug;
use rand::Rng;

use crate::error::ModelError;
use super::counter::NGramCounts;
use super::state::State;
use super::token::{Context, Symbol, Token, display_context};

/// Probabilistic deterministic finite-state automaton built from n-gram counts.
///
/// States are (n-1)-symbol contexts. A transition emits one token and moves
/// to the context shifted by that token. Each state keeps its outgoing
/// transitions, so stepping and enumeration cost is proportional to the
/// branching factor, not to the total number of transitions.
///
/// # Invariants
/// - At most one transition leaves a context for a given token
/// - Outgoing probabilities of a context sum to at most 1
#[derive(Clone, Debug)]
pub struct Automaton<T> {
	/// The all-start context.
	initial: Context<T>,
	/// Contexts that were followed by the end symbol in training.
	finals: HashSet<Context<T>>,
	/// Every context seen as the prefix of an n-gram.
	states: HashMap<Context<T>, State<T>>,
	/// Number of transitions over all states.
	transition_count: usize,
}

impl<T: Token> Automaton<T> {
	/// Builds the automaton from the count tables.
	///
	/// Every n-gram is split into its leading context and its trailing
	/// symbol. A trailing end symbol marks the context final; a trailing
	/// token becomes a transition weighted by count(n-gram) / count(context).
	///
	/// # Errors
	/// Returns [`ModelError::Construction`] if a context has no count, or if
	/// an n-gram ends with the start symbol. Both mean the corpus was not
	/// padded consistently.
	pub fn build(counts: &NGramCounts<T>) -> Result<Self, ModelError> {
		let initial: Context<T> = vec![Symbol::Start; counts.n() - 1];
		let mut finals = HashSet::new();
		let mut states: HashMap<Context<T>, State<T>> = HashMap::new();
		let mut transition_count = 0;

		for (ngram, count) in counts.ngrams() {
			let Some((last, context)) = ngram.split_last() else {
				return Err(ModelError::Construction("empty n-gram".to_owned()));
			};
			let context_count = counts.context_count(context);
			let state = states
				.entry(context.to_vec())
				.or_insert_with(|| State::new(context, context_count));

			match last {
				Symbol::End => {
					state.mark_final();
					finals.insert(context.to_vec());
				}
				Symbol::Token(token) => {
					if context_count == 0 {
						return Err(ModelError::Construction(format!(
							"context {} was never counted",
							display_context(context)
						)));
					}
					state.add_transition(token.clone(), ngram[1..].to_vec(), count);
					transition_count += 1;
				}
				Symbol::Start => {
					return Err(ModelError::Construction(format!(
						"n-gram {} ends with the start symbol",
						display_context(ngram)
					)));
				}
			}
		}

		debug!(
			"built automaton: {} states, {} final, {} transitions",
			states.len(),
			finals.len(),
			transition_count
		);

		Ok(Self { initial, finals, states, transition_count })
	}

	/// Returns the initial (all-start) context.
	pub fn initial(&self) -> &[Symbol<T>] {
		&self.initial
	}

	/// Whether `context` may end a sequence.
	pub fn is_final(&self, context: &[Symbol<T>]) -> bool {
		self.finals.contains(context)
	}

	pub fn finals(&self) -> impl Iterator<Item = &[Symbol<T>]> {
		self.finals.iter().map(Vec::as_slice)
	}

	/// Returns the state of a context, if the context was ever seen.
	pub fn state(&self, context: &[Symbol<T>]) -> Option<&State<T>> {
		self.states.get(context)
	}

	pub fn states(&self) -> impl Iterator<Item = &State<T>> {
		self.states.values()
	}

	pub fn transition_count(&self) -> usize {
		self.transition_count
	}

	/// Follows the transition leaving `context` with `token`.
	///
	/// Returns the next context and the transition probability, or `None`
	/// if no such transition exists.
	pub fn step(&self, context: &[Symbol<T>], token: &T) -> Option<(&[Symbol<T>], f64)> {
		let edge = self.states.get(context)?.step(token)?;
		Some((edge.target.as_slice(), edge.probability))
	}

	/// Probability of stopping in `context`: 1 minus its outgoing mass.
	///
	/// A context without a state has nowhere to go and halts for sure.
	pub fn halting_probability(&self, context: &[Symbol<T>]) -> f64 {
		self.states
			.get(context)
			.map_or(1.0, State::halting_probability)
	}

	/// Joint probability of emitting exactly `tokens` and then stopping.
	///
	/// Returns 0 as soon as a token has no matching transition.
	pub fn sequence_probability(&self, tokens: &[T]) -> f64 {
		let mut context = self.initial();
		let mut probability = 1.0;

		for token in tokens {
			match self.step(context, token) {
				Some((next, edge_probability)) => {
					context = next;
					probability *= edge_probability;
				}
				None => return 0.0,
			}
		}

		probability * self.halting_probability(context)
	}

	/// Generates a sequence by a random walk from the initial context.
	///
	/// Each step either follows a transition or, with the context's halting
	/// probability, stops. The walk is not bounded: a corpus whose contexts
	/// never halt yields a walk that never ends.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<T> {
		let mut context = self.initial();
		let mut sequence = Vec::new();

		while let Some((token, edge)) = self.states.get(context).and_then(|state| state.predict(rng)) {
			sequence.push(token.clone());
			context = &edge.target;
		}

		sequence
	}
}
