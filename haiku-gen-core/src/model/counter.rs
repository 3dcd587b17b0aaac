use std::collections::HashMap;

use crate::error::ModelError;
use super::token::{Symbol, Token};

/// N-gram and (n-1)-gram occurrence counts of a padded corpus.
///
/// Both tables are filled in a single counting pass and never change
/// afterwards. Absent keys read as zero through [`NGramCounts::ngram_count`]
/// and [`NGramCounts::context_count`].
///
/// # Invariants
/// - `n` is always >= 2
/// - Every stored count is >= 1
#[derive(Clone, Debug)]
pub struct NGramCounts<T> {
	/// The order of the model (number of symbols in an n-gram)
	n: usize,

	/// Occurrences of each window of `n` symbols.
	ngrams: HashMap<Vec<Symbol<T>>, usize>,

	/// Occurrences of each window of `n - 1` symbols.
	contexts: HashMap<Vec<Symbol<T>>, usize>,
}

impl<T: Token> NGramCounts<T> {
	/// Counts every window of size `n` and `n - 1` in the padded sequences.
	///
	/// Sequences shorter than `n` contribute no n-gram but may still
	/// contribute (n-1)-grams.
	///
	/// # Errors
	/// Returns an error if `n < 2`.
	pub fn from_padded<S>(n: usize, corpus: &[S]) -> Result<Self, ModelError>
	where
		S: AsRef<[Symbol<T>]>,
	{
		if n < 2 {
			return Err(ModelError::InvalidOrder(n));
		}

		let mut counts = Self {
			n,
			ngrams: HashMap::new(),
			contexts: HashMap::new(),
		};
		for sequence in corpus {
			counts.add_sequence(sequence.as_ref());
		}
		Ok(counts)
	}

	fn add_sequence(&mut self, sequence: &[Symbol<T>]) {
		for ngram in sequence.windows(self.n) {
			*self.ngrams.entry(ngram.to_vec()).or_insert(0) += 1;
		}
		for context in sequence.windows(self.n - 1) {
			*self.contexts.entry(context.to_vec()).or_insert(0) += 1;
		}
	}

	/// Returns the order `n`.
	pub fn n(&self) -> usize {
		self.n
	}

	/// Occurrences of an n-gram, zero if never seen.
	pub fn ngram_count(&self, ngram: &[Symbol<T>]) -> usize {
		self.ngrams.get(ngram).copied().unwrap_or(0)
	}

	/// Occurrences of an (n-1)-gram, zero if never seen.
	pub fn context_count(&self, context: &[Symbol<T>]) -> usize {
		self.contexts.get(context).copied().unwrap_or(0)
	}

	/// Iterates over all counted n-grams.
	pub fn ngrams(&self) -> impl Iterator<Item = (&[Symbol<T>], usize)> {
		self.ngrams.iter().map(|(ngram, count)| (ngram.as_slice(), *count))
	}

	/// Number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.ngrams.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ngrams.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::token::pad;

	fn padded(words: &[&str], n: usize) -> Vec<Vec<Symbol<char>>> {
		words
			.iter()
			.map(|w| pad(&w.chars().collect::<Vec<_>>(), n))
			.collect()
	}

	#[test]
	fn counts_bigrams_of_cat_and_car() {
		let counts = NGramCounts::from_padded(2, &padded(&["cat", "car"], 2)).unwrap();
		let t = Symbol::Token;

		assert_eq!(counts.ngram_count(&[t('c'), t('a')]), 2);
		assert_eq!(counts.ngram_count(&[t('a'), t('t')]), 1);
		assert_eq!(counts.ngram_count(&[t('a'), t('r')]), 1);
		assert_eq!(counts.ngram_count(&[Symbol::Start, t('c')]), 2);
		assert_eq!(counts.ngram_count(&[t('t'), Symbol::End]), 1);
		assert_eq!(counts.ngram_count(&[t('c'), t('o')]), 0);

		assert_eq!(counts.context_count(&[t('c')]), 2);
		assert_eq!(counts.context_count(&[t('a')]), 2);
		assert_eq!(counts.context_count(&[Symbol::Start]), 2);
		assert_eq!(counts.context_count(&[Symbol::End]), 2);
	}

	#[test]
	fn short_sequences_only_count_contexts() {
		let corpus = vec![vec![Symbol::Start, Symbol::Token('a')]];
		let counts = NGramCounts::from_padded(3, &corpus).unwrap();

		assert!(counts.is_empty());
		assert_eq!(counts.context_count(&[Symbol::Start, Symbol::Token('a')]), 1);
	}

	#[test]
	fn empty_corpus_gives_empty_tables() {
		let corpus: Vec<Vec<Symbol<char>>> = Vec::new();
		let counts = NGramCounts::from_padded(2, &corpus).unwrap();

		assert_eq!(counts.len(), 0);
		assert_eq!(counts.context_count(&[Symbol::Start]), 0);
	}

	#[test]
	fn rejects_order_below_two() {
		let corpus: Vec<Vec<Symbol<char>>> = Vec::new();
		assert!(matches!(
			NGramCounts::from_padded(1, &corpus),
			Err(ModelError::InvalidOrder(1))
		));
	}
}
