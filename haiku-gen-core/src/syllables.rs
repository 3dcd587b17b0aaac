//! Syllable counts used by constrained generation.
//!
//! The generator only needs the [`SyllableLookup`] capability. The
//! [`SyllableDictionary`] implementation is built from a CMU-style
//! pronunciation dictionary, stored as a plain `word  count` listing, and
//! cached next to that listing as a postcard binary.

use std::collections::HashMap;
use std::fs;
use std::hash::{BuildHasher, Hash};
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::io::{cache_path, read_to_string};

/// Syllable count of a token, `None` when unknown.
pub trait SyllableLookup<T: ?Sized> {
	fn syllables(&self, token: &T) -> Option<usize>;
}

impl<T: Hash + Eq, S: BuildHasher> SyllableLookup<T> for HashMap<T, usize, S> {
	fn syllables(&self, token: &T) -> Option<usize> {
		self.get(token).copied()
	}
}

/// Word → syllable count table.
///
/// # Invariants
/// - Words are lower-case
/// - Every count is >= 1
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SyllableDictionary {
	counts: HashMap<String, usize>,
}

impl SyllableDictionary {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records the syllable count of a word.
	///
	/// The first count recorded for a word wins; zero counts are ignored.
	pub fn insert(&mut self, word: &str, syllables: usize) {
		if word.is_empty() || syllables == 0 {
			return;
		}
		self.counts.entry(word.to_lowercase()).or_insert(syllables);
	}

	pub fn get(&self, word: &str) -> Option<usize> {
		self.counts.get(word).copied()
	}

	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Builds the table from a pronunciation dictionary.
	///
	/// Each line holds a word followed by its phones, e.g.
	/// `WATER  W AO1 T ER0`. Every phone carrying a stress digit is a vowel
	/// nucleus, hence one syllable. Comment lines (`;;;`) and alternate
	/// pronunciations (`WORD(2)`) are skipped.
	pub fn from_pronunciations(text: &str) -> Self {
		let mut dictionary = Self::new();
		for line in text.lines() {
			let line = line.trim();
			if line.is_empty() || line.starts_with(";;;") {
				continue;
			}

			let mut parts = line.split_whitespace();
			let Some(word) = parts.next() else { continue };
			if word.ends_with(')') && word.contains('(') {
				continue;
			}

			let syllables = parts
				.filter(|phone| phone.ends_with(|c: char| c.is_ascii_digit()))
				.count();
			dictionary.insert(word, syllables);
		}
		dictionary
	}

	/// Parses a `word  count` listing, one entry per line.
	///
	/// Malformed lines and zero counts are skipped.
	pub fn from_counts(text: &str) -> Self {
		let mut dictionary = Self::new();
		for line in text.lines() {
			let mut parts = line.split_whitespace();
			let (Some(word), Some(count)) = (parts.next(), parts.next()) else {
				continue;
			};
			if let Ok(count) = count.parse::<usize>() {
				dictionary.insert(word, count);
			}
		}
		dictionary
	}

	/// Renders the table as a `word  count` listing sorted by word.
	pub fn to_counts(&self) -> String {
		let mut words: Vec<(&String, &usize)> = self.counts.iter().collect();
		words.sort();
		words
			.into_iter()
			.map(|(word, count)| format!("{word}  {count}\n"))
			.collect()
	}

	/// Loads a `word  count` listing.
	///
	/// - If a `.bin` file with the same stem exists, it is decoded instead.
	/// - Otherwise the listing is parsed and the binary cache written for
	///   the next load. A cache that cannot be written is only logged.
	///
	/// # Errors
	/// Returns an error if the listing or the cache cannot be read.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self, ModelError> {
		let binary_data_path = cache_path(&filepath)?;
		if binary_data_path.exists() {
			let bytes = fs::read(&binary_data_path)?;
			let dictionary: Self = postcard::from_bytes(&bytes)?;
			info!("loaded {} syllable counts from {}", dictionary.len(), binary_data_path.display());
			return Ok(dictionary);
		}

		let dictionary = Self::from_counts(&read_to_string(&filepath)?);
		info!("loaded {} syllable counts from {}", dictionary.len(), filepath.as_ref().display());

		let bytes = postcard::to_stdvec(&dictionary)?;
		if let Err(e) = fs::write(&binary_data_path, bytes) {
			warn!("could not write {}: {e}", binary_data_path.display());
		}
		Ok(dictionary)
	}

	/// Converts a pronunciation dictionary file into a `word  count` listing.
	///
	/// # Errors
	/// Returns an error if either file cannot be accessed.
	pub fn build<PI, PO>(pronunciations: PI, output: PO) -> Result<Self, ModelError>
	where
		PI: AsRef<Path>,
		PO: AsRef<Path>,
	{
		let dictionary = Self::from_pronunciations(&read_to_string(&pronunciations)?);
		fs::write(&output, dictionary.to_counts())?;
		info!(
			"wrote {} syllable counts to {}",
			dictionary.len(),
			output.as_ref().display()
		);
		Ok(dictionary)
	}
}

impl SyllableLookup<String> for SyllableDictionary {
	fn syllables(&self, token: &String) -> Option<usize> {
		self.get(token)
	}
}

impl SyllableLookup<str> for SyllableDictionary {
	fn syllables(&self, token: &str) -> Option<usize> {
		self.get(token)
	}
}
