use std::collections::HashMap;

use haiku_gen_core::corpus::{parse_haikus, parse_words};
use haiku_gen_core::{HaikuInput, ModelError, NGramModel, SyllableDictionary, SyllableLookup};
use rand::SeedableRng;
use rand::rngs::StdRng;

const AUTUMN: &str = "\
An old silent pond
A frog jumps into the pond
Splash! Silence again.

Autumn moonlight,
a worm digs silently
into the chestnut.

The light of a candle
is transferred to another candle:
spring twilight.

Over the wintry
forest, winds howl in rage
with no leaves to blow.
";

const SYLLABLES: &str = "\
silent  2
silence  2
again  2
autumn  2
moonlight  2
silently  3
into  2
chestnut  2
candle  2
transferred  2
another  3
twilight  2
over  2
wintry  2
forest  2
";

fn syllables_of(line: &str, lookup: &SyllableDictionary) -> usize {
	line.split(' ')
		.map(|word| lookup.syllables(word).unwrap_or(1))
		.sum()
}

#[test]
fn seasonal_haiku() {
	let corpus = parse_haikus(AUTUMN);
	assert_eq!(corpus.len(), 4);

	let lookup = SyllableDictionary::from_counts(SYLLABLES);
	let model: NGramModel<String> = NGramModel::new(&corpus, 2, 0.0).unwrap();
	let mut rng = StdRng::seed_from_u64(1603);

	for _ in 0..10 {
		let haiku = model.generate_haiku(&lookup, &HaikuInput::default(), &mut rng).unwrap();
		let lines: Vec<&str> = haiku.lines().collect();
		assert_eq!(lines[0], "|==|======|==|");
		let shape: Vec<usize> = lines[1..].iter().map(|line| syllables_of(line, &lookup)).collect();
		assert_eq!(shape, vec![5, 7, 5], "{haiku}");
	}
}

#[test]
fn every_training_haiku_is_reachable() {
	let corpus = parse_haikus(AUTUMN);
	let model: NGramModel<String> = NGramModel::new(&corpus, 3, 0.0).unwrap();

	for haiku in &corpus {
		assert!(model.sequence_probability(haiku) > 0.0);
		assert!(model.probability(haiku, 0.0, 0) > 0.0);
	}
}

#[test]
fn letter_model_from_words() {
	let corpus = parse_words("cat car cart");
	let model: NGramModel<char> = NGramModel::new(&corpus, 2, 0.0).unwrap();
	let mut rng = StdRng::seed_from_u64(9);

	for _ in 0..20 {
		let word: Vec<char> = model.generate_tokens(&mut rng);
		assert!(model.sequence_probability(&word) > 0.0, "{word:?}");
	}
	assert_eq!(model.score(&['d', 'o', 'g']), 0.0);
}

#[test]
fn seeded_generation_reproduces_itself() {
	let corpus = parse_haikus(AUTUMN);
	let model: NGramModel<String> = NGramModel::new(&corpus, 2, 0.0).unwrap();

	let run = |seed: u64| {
		let mut rng = StdRng::seed_from_u64(seed);
		(0..5).map(|_| model.generate(&mut rng)).collect::<Vec<_>>()
	};
	assert_eq!(run(77), run(77));
}

#[test]
fn empty_sequences_never_reach_a_target() {
	let corpus: Vec<Vec<String>> = vec![Vec::new(), Vec::new()];
	let model: NGramModel<String> = NGramModel::new(&corpus, 2, 0.0).unwrap();
	let lookup: HashMap<String, usize> = HashMap::new();
	let mut input = HaikuInput::default();
	input.max_restarts = 3;
	let mut rng = StdRng::seed_from_u64(0);

	let result = model.generate_line(5, &lookup, &input, &mut rng);
	assert!(matches!(result, Err(ModelError::GenerationFailure { target: 5, restarts: 3 })));
	assert!(model.generate_line(0, &lookup, &input, &mut rng).unwrap().is_empty());
	assert!(model.generate_tokens(&mut rng).is_empty());
}

#[test]
fn smoothing_rescues_unseen_test_data() {
	let training = parse_haikus(AUTUMN);
	let test = parse_haikus("A crow has settled\non a bare branch\nautumn evening\n");
	let model: NGramModel<String> = NGramModel::new(&training, 2, 0.0).unwrap();

	assert_eq!(model.log_probability_of_corpus(&test, 0.0), f64::NEG_INFINITY);
	let smoothed = model.log_probability_of_corpus(&test, 1.0);
	assert!(smoothed.is_finite() && smoothed < 0.0);
}
