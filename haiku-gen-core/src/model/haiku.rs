use log::{debug, warn};
use rand::Rng;

use crate::error::ModelError;
use crate::syllables::SyllableLookup;
use super::automaton::Automaton;
use super::haiku_input::HaikuInput;
use super::token::{Symbol, Token};

/// Where the line search stands before its next draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
	/// Drawing a fresh token at the current position.
	Walking,
	/// The last draw overshot; one more draw is allowed here.
	RetryOneStep,
	/// Throw the line away and start from the initial context.
	Restart,
}

/// Syllable-constrained random walk over an automaton.
///
/// Tokens missing from the lookup (or reported with zero syllables)
/// count as one syllable.
pub struct HaikuGenerator<'a, T, L: ?Sized> {
	automaton: &'a Automaton<T>,
	lookup: &'a L,
	max_restarts: usize,
}

impl<'a, T, L> HaikuGenerator<'a, T, L>
where
	T: Token,
	L: SyllableLookup<T> + ?Sized,
{
	pub fn new(automaton: &'a Automaton<T>, lookup: &'a L, max_restarts: usize) -> Self {
		Self { automaton, lookup, max_restarts }
	}

	fn syllables(&self, token: &T) -> usize {
		self.lookup.syllables(token).filter(|&n| n > 0).unwrap_or(1)
	}

	/// Generates one line whose syllables add up to exactly `target`.
	///
	/// Tokens are drawn among the outgoing transitions of the current
	/// context, so a line never ends because the automaton halts.
	/// - A draw that overshoots is redrawn once at the same position; a
	///   second overshoot restarts the line.
	/// - A context without outgoing transitions restarts the line.
	///
	/// # Errors
	/// Returns [`ModelError::GenerationFailure`] once more than
	/// `max_restarts` restarts would be needed.
	pub fn line<R: Rng + ?Sized>(&self, target: usize, rng: &mut R) -> Result<Vec<T>, ModelError> {
		if target == 0 {
			return Ok(Vec::new());
		}

		let initial = self.automaton.initial();
		let mut context: &[Symbol<T>] = initial;
		let mut line: Vec<T> = Vec::new();
		let mut count = 0;
		let mut restarts = 0;
		let mut phase = Phase::Walking;

		loop {
			if phase == Phase::Restart {
				if restarts >= self.max_restarts {
					warn!("no {target}-syllable line found after {restarts} restarts");
					return Err(ModelError::GenerationFailure { target, restarts });
				}
				restarts += 1;
				debug!("restart {restarts} of a {target}-syllable line, dropped {}", T::join(&line));

				context = initial;
				line.clear();
				count = 0;
				phase = Phase::Walking;
			}

			let Some((token, edge)) = self
				.automaton
				.state(context)
				.and_then(|state| state.predict_outgoing(rng))
			else {
				// Dead end before the target
				phase = Phase::Restart;
				continue;
			};

			let candidate = count + self.syllables(token);
			if candidate > target {
				phase = match phase {
					Phase::RetryOneStep => Phase::Restart,
					_ => Phase::RetryOneStep,
				};
				continue;
			}

			line.push(token.clone());
			if candidate == target {
				return Ok(line);
			}

			context = &edge.target;
			count = candidate;
			phase = Phase::Walking;
		}
	}

	/// Generates one line per target of `input`, each independently.
	///
	/// # Errors
	/// Fails as soon as one line cannot be generated.
	pub fn poem<R: Rng + ?Sized>(&self, input: &HaikuInput, rng: &mut R) -> Result<Vec<Vec<T>>, ModelError> {
		input
			.line_syllables()
			.iter()
			.map(|&target| self.line(target, rng))
			.collect()
	}
}
