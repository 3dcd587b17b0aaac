//! Turning raw text into training sequences.
//!
//! Every reader lower-cases its input, strips punctuation and drops
//! empty units. Word readers produce `Vec<String>` units, the letter
//! reader produces `Vec<char>` units.

use std::path::Path;

use log::info;

use crate::error::ModelError;
use crate::io::read_to_string;

/// Lower-cases a line, turns hyphens into spaces and removes `.!?;:,"`.
fn clean_line(line: &str) -> String {
	line.to_lowercase()
		.chars()
		.filter_map(|c| match c {
			'-' => Some(' '),
			'.' | '!' | '?' | ';' | ':' | ',' | '"' => None,
			c => Some(c),
		})
		.collect()
}

fn split_words(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_owned).collect()
}

/// One unit per line of text.
pub fn parse_lines(text: &str) -> Vec<Vec<String>> {
	text.lines()
		.map(|line| split_words(&clean_line(line)))
		.filter(|words| !words.is_empty())
		.collect()
}

/// One unit per group of three non-empty lines.
///
/// A trailing group with fewer than three lines is kept as well.
pub fn parse_haikus(text: &str) -> Vec<Vec<String>> {
	parse_lines(text).chunks(3).map(|group| group.concat()).collect()
}

/// One unit per sentence, sentences ending at `!`, `.` or `?`.
///
/// Apostrophes are kept inside words, any other non-word character
/// separates words.
pub fn parse_sentences(text: &str) -> Vec<Vec<String>> {
	text.to_lowercase()
		.split(['!', '.', '?'])
		.map(|sentence| {
			sentence
				.chars()
				.map(|c| if c.is_alphanumeric() || c == '_' || c == '\'' { c } else { ' ' })
				.collect::<String>()
				.split_whitespace()
				.filter(|word| *word != "'")
				.map(str::to_owned)
				.collect::<Vec<_>>()
		})
		.filter(|words| !words.is_empty())
		.collect()
}

/// One unit per word, each word a sequence of letters.
pub fn parse_words(text: &str) -> Vec<Vec<char>> {
	text.to_lowercase()
		.chars()
		.filter_map(|c| match c {
			'-' | '\n' => Some(' '),
			'.' | '!' | '?' | ';' | ':' | ',' | '(' | ')' | '"' | '\t' => None,
			c => Some(c),
		})
		.collect::<String>()
		.split_whitespace()
		.map(|word| word.chars().collect())
		.collect()
}

/// Reads a file as a corpus of lines.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn open_as_lines<P: AsRef<Path>>(filepath: P) -> Result<Vec<Vec<String>>, ModelError> {
	let units = parse_lines(&read_to_string(&filepath)?);
	info!("opened {} as {} lines", filepath.as_ref().display(), units.len());
	Ok(units)
}

/// Reads a file as a corpus of haikus (three lines per unit).
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn open_as_haikus<P: AsRef<Path>>(filepath: P) -> Result<Vec<Vec<String>>, ModelError> {
	let units = parse_haikus(&read_to_string(&filepath)?);
	info!("opened {} as {} haikus", filepath.as_ref().display(), units.len());
	Ok(units)
}

/// Reads a file as a corpus of sentences.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn open_as_sentences<P: AsRef<Path>>(filepath: P) -> Result<Vec<Vec<String>>, ModelError> {
	let units = parse_sentences(&read_to_string(&filepath)?);
	info!("opened {} as {} sentences", filepath.as_ref().display(), units.len());
	Ok(units)
}

/// Reads a file as a corpus of words spelled letter by letter.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn open_as_words<P: AsRef<Path>>(filepath: P) -> Result<Vec<Vec<char>>, ModelError> {
	let units = parse_words(&read_to_string(&filepath)?);
	info!("opened {} as {} words", filepath.as_ref().display(), units.len());
	Ok(units)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(line: &str) -> Vec<String> {
		line.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn lines_are_cleaned() {
		let corpus = parse_lines("An old silent pond...\n\nA frog jumps-in, \"splash!\"\n");
		assert_eq!(corpus, vec![words("an old silent pond"), words("a frog jumps in splash")]);
	}

	#[test]
	fn haikus_group_three_lines() {
		let text = "an old silent pond\na frog jumps into the pond\nsplash silence again\n\n\
			autumn moonlight\na worm digs silently\ninto the chestnut\n\
			lonely line";
		let corpus = parse_haikus(text);
		assert_eq!(corpus.len(), 3);
		assert_eq!(corpus[0].len(), 4 + 6 + 3);
		assert_eq!(corpus[1][0], "autumn");
		assert_eq!(corpus[1].last().map(String::as_str), Some("chestnut"));
		assert_eq!(corpus[2], words("lonely line"));
	}

	#[test]
	fn sentences_split_on_terminators() {
		let corpus = parse_sentences("The frog's leap! Is it over? ' Yes.");
		assert_eq!(
			corpus,
			vec![words("the frog's leap"), words("is it over"), words("yes")]
		);
	}

	#[test]
	fn words_become_letters() {
		let corpus = parse_words("Cat, car-\tboat (pond)");
		let spelled: Vec<String> = corpus.iter().map(|w| w.iter().collect()).collect();
		assert_eq!(spelled, vec!["cat", "car", "boat", "pond"]);
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let result = open_as_lines("/definitely/not/here.txt");
		assert!(matches!(result, Err(ModelError::Io(_))));
	}
}
