use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::error::ModelError;
use crate::syllables::SyllableLookup;
use super::automaton::Automaton;
use super::counter::NGramCounts;
use super::haiku::HaikuGenerator;
use super::haiku_input::HaikuInput;
use super::token::{Symbol, Token, pad};

/// Represents an n-gram language model over characters or words.
///
/// The model is built once from a training corpus and is read-only
/// afterwards: scoring and generation only take `&self`, and randomness is
/// always supplied by the caller.
///
/// # Responsibilities
/// - Count n-grams and (n-1)-grams of the padded corpus
/// - Build the probabilistic automaton used for generation
/// - Score sequences, with optional Laplace smoothing
/// - Generate free sequences and syllable-constrained poems
///
/// # Invariants
/// - `n` is always >= 2
/// - `smoothing` is finite and >= 0
/// - The corpus held at least one sequence
#[derive(Clone, Debug)]
pub struct NGramModel<T> {
	/// The order of the model (number of tokens in an n-gram)
	n: usize,

	/// Default smoothing constant, used by [`NGramModel::score`].
	smoothing: f64,

	/// Distinct tokens seen in training.
	vocabulary: HashSet<T>,

	counts: NGramCounts<T>,

	automaton: Automaton<T>,
}

impl<T: Token> NGramModel<T> {
	/// Builds a model of order `n` from a training corpus.
	///
	/// Each sequence is padded with `n - 1` start symbols and one end symbol
	/// before counting.
	///
	/// # Errors
	/// - [`ModelError::InvalidOrder`] if `n < 2`
	/// - [`ModelError::InvalidSmoothing`] if `smoothing` is negative or not finite
	/// - [`ModelError::EmptyCorpus`] if the corpus holds no sequence
	/// - [`ModelError::Construction`] if the counts are inconsistent
	pub fn new<C, S>(corpus: C, n: usize, smoothing: f64) -> Result<Self, ModelError>
	where
		C: IntoIterator<Item = S>,
		S: AsRef<[T]>,
	{
		if n < 2 {
			return Err(ModelError::InvalidOrder(n));
		}
		if !smoothing.is_finite() || smoothing < 0.0 {
			return Err(ModelError::InvalidSmoothing(smoothing));
		}

		let mut vocabulary = HashSet::new();
		let mut padded: Vec<Vec<Symbol<T>>> = Vec::new();
		for sequence in corpus {
			let sequence = sequence.as_ref();
			vocabulary.extend(sequence.iter().cloned());
			padded.push(pad(sequence, n));
		}
		if padded.is_empty() {
			return Err(ModelError::EmptyCorpus);
		}

		let counts = NGramCounts::from_padded(n, &padded)?;
		let automaton = Automaton::build(&counts)?;

		debug!(
			"trained {n}-gram model on {} sequences: {} tokens in vocabulary, {} distinct n-grams",
			padded.len(),
			vocabulary.len(),
			counts.len()
		);

		Ok(Self { n, smoothing, vocabulary, counts, automaton })
	}

	pub fn order(&self) -> usize {
		self.n
	}

	pub fn smoothing(&self) -> f64 {
		self.smoothing
	}

	/// Distinct tokens seen in training.
	pub fn vocabulary(&self) -> &HashSet<T> {
		&self.vocabulary
	}

	/// Occurrences of an n-gram (given as padded symbols), zero if unseen.
	pub fn ngram_count(&self, ngram: &[Symbol<T>]) -> usize {
		self.counts.ngram_count(ngram)
	}

	/// Occurrences of an (n-1)-gram (given as padded symbols), zero if unseen.
	pub fn context_count(&self, context: &[Symbol<T>]) -> usize {
		self.counts.context_count(context)
	}

	pub fn automaton(&self) -> &Automaton<T> {
		&self.automaton
	}

	/// Probability of `sequence` as a product of smoothed n-gram estimates.
	///
	/// Each window of the padded sequence contributes
	/// `(count(n-gram) + s) / (count(context) + s * (|vocabulary| + novel_words))`.
	/// `novel_words` estimates how many tokens of the scored data were never
	/// seen in training. Without smoothing an unseen n-gram makes the whole
	/// probability 0. Negative smoothing is treated as 0.
	pub fn probability(&self, sequence: &[T], smoothing: f64, novel_words: usize) -> f64 {
		let smoothing = smoothing.max(0.0);
		let vocabulary = (self.vocabulary.len() + novel_words) as f64;
		let padded = pad(sequence, self.n);

		let mut probability = 1.0;
		for ngram in padded.windows(self.n) {
			let count = self.counts.ngram_count(ngram) as f64;
			if count + smoothing == 0.0 {
				return 0.0;
			}

			let context_count = self.counts.context_count(&ngram[..self.n - 1]) as f64;
			let denominator = context_count + smoothing * vocabulary;
			if denominator == 0.0 {
				return 0.0;
			}
			probability *= (count + smoothing) / denominator;
		}
		probability
	}

	/// [`NGramModel::probability`] with the model's own smoothing and no
	/// novel words.
	pub fn score(&self, sequence: &[T]) -> f64 {
		self.probability(sequence, self.smoothing, 0)
	}

	/// Sum of the log-probabilities of every test sequence.
	///
	/// The number of novel words is the number of distinct test tokens
	/// missing from the training vocabulary. Returns `-inf` as soon as one
	/// sequence has probability 0.
	pub fn log_probability_of_corpus<S: AsRef<[T]>>(&self, test_corpus: &[S], smoothing: f64) -> f64 {
		let novel_words = test_corpus
			.iter()
			.flat_map(|sequence| sequence.as_ref().iter())
			.filter(|token| !self.vocabulary.contains(*token))
			.collect::<HashSet<_>>()
			.len();

		let mut log_probability = 0.0;
		for sequence in test_corpus {
			let probability = self.probability(sequence.as_ref(), smoothing, novel_words);
			if probability == 0.0 {
				return f64::NEG_INFINITY;
			}
			log_probability += probability.ln();
		}
		log_probability
	}

	/// Probability the automaton assigns to emitting exactly `sequence`.
	pub fn sequence_probability(&self, sequence: &[T]) -> f64 {
		self.automaton.sequence_probability(sequence)
	}

	/// Generates a sequence by a random walk through the automaton.
	pub fn generate_tokens<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<T> {
		self.automaton.generate(rng)
	}

	/// Generates a sequence and joins it: words with spaces, characters
	/// back to back.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
		T::join(&self.generate_tokens(rng))
	}

	/// Generates one line of exactly `syllables` syllables.
	///
	/// # Errors
	/// Returns [`ModelError::GenerationFailure`] if the restart budget of
	/// `input` runs out.
	pub fn generate_line<L, R>(
		&self,
		syllables: usize,
		lookup: &L,
		input: &HaikuInput,
		rng: &mut R,
	) -> Result<Vec<T>, ModelError>
	where
		L: SyllableLookup<T> + ?Sized,
		R: Rng + ?Sized,
	{
		HaikuGenerator::new(&self.automaton, lookup, input.max_restarts).line(syllables, rng)
	}

	/// Generates a poem shaped by `input` (5-7-5 by default).
	///
	/// The header of `input`, if any, comes first; each line is joined like
	/// [`NGramModel::generate`] and lines are separated by `\n`.
	///
	/// # Errors
	/// Returns [`ModelError::GenerationFailure`] if a line cannot be generated.
	pub fn generate_haiku<L, R>(&self, lookup: &L, input: &HaikuInput, rng: &mut R) -> Result<String, ModelError>
	where
		L: SyllableLookup<T> + ?Sized,
		R: Rng + ?Sized,
	{
		let poem = HaikuGenerator::new(&self.automaton, lookup, input.max_restarts).poem(input, rng)?;

		let mut lines: Vec<String> = Vec::with_capacity(poem.len() + 1);
		if let Some(header) = &input.header {
			lines.push(header.clone());
		}
		lines.extend(poem.iter().map(|line| T::join(line)));
		Ok(lines.join("\n"))
	}
}

impl NGramModel<char> {
	/// Builds a letter model where each string is one training sequence.
	///
	/// # Errors
	/// Same as [`NGramModel::new`].
	pub fn from_words<I, S>(words: I, n: usize, smoothing: f64) -> Result<Self, ModelError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let corpus: Vec<Vec<char>> = words.into_iter().map(|w| w.as_ref().chars().collect()).collect();
		Self::new(corpus, n, smoothing)
	}
}
