use std::collections::HashSet;

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

const MIN_TERM_CHARS: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct RelevanceWeights {
	pub title: f32,
	pub description: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Relevance {
	pub score: f32,
	pub title_ratio: f32,
	pub description_ratio: f32,
}
impl Relevance {
	pub fn is_match(&self) -> bool {
		self.score > 0.0
	}
}

/// Lowercased Unicode words of at least two characters, deduplicated in query order.
pub fn tokenize_query(query: &str, max_terms: usize) -> Vec<String> {
	let mut out = Vec::new();
	let mut seen = HashSet::new();

	for term in words(query) {
		if out.len() >= max_terms {
			break;
		}
		if seen.insert(term.clone()) {
			out.push(term);
		}
	}

	out
}

pub fn text_terms(text: &str) -> HashSet<String> {
	words(text).collect()
}

pub fn overlap_ratio(query_terms: &[String], text: &str) -> f32 {
	if query_terms.is_empty() {
		return 0.0;
	}

	let terms = text_terms(text);

	if terms.is_empty() {
		return 0.0;
	}

	let matched = query_terms.iter().filter(|term| terms.contains(term.as_str())).count();

	matched as f32 / query_terms.len() as f32
}

pub fn score(
	query_terms: &[String],
	title: &str,
	description: &str,
	weights: RelevanceWeights,
) -> Relevance {
	if query_terms.is_empty() {
		return Relevance::default();
	}

	let title_ratio = overlap_ratio(query_terms, title);
	let description_ratio = overlap_ratio(query_terms, description);

	Relevance {
		score: weights.title * title_ratio + weights.description * description_ratio,
		title_ratio,
		description_ratio,
	}
}

/// SQL `ILIKE` patterns that every term-level match also satisfies. `LIKE` metacharacters in a
/// term are escaped.
pub fn like_patterns(query_terms: &[String]) -> Vec<String> {
	query_terms.iter().map(|term| format!("%{}%", escape_like(term))).collect()
}

fn escape_like(term: &str) -> String {
	let mut escaped = String::with_capacity(term.len());

	for ch in term.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			escaped.push('\\');
		}

		escaped.push(ch);
	}

	escaped
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
	text.unicode_words()
		.map(str::to_lowercase)
		.filter(|word| word.chars().filter(|ch| ch.is_alphanumeric()).count() >= MIN_TERM_CHARS)
}

#[cfg(test)]
mod tests {
	use super::{RelevanceWeights, like_patterns, overlap_ratio, score, tokenize_query};

	const WEIGHTS: RelevanceWeights = RelevanceWeights { title: 2.0, description: 1.0 };

	#[test]
	fn tokenize_drops_short_terms_and_duplicates() {
		let terms = tokenize_query("Fraud, a FRAUD-detection model!", 16);

		assert_eq!(terms, vec!["fraud", "detection", "model"]);
	}

	#[test]
	fn tokenize_respects_max_terms() {
		assert_eq!(tokenize_query("one two three four", 2), vec!["one", "two"]);
	}

	#[test]
	fn punctuation_only_yields_no_terms() {
		assert!(tokenize_query("?! - a", 16).is_empty());
	}

	#[test]
	fn overlap_matches_whole_terms_only() {
		let terms = vec!["chat".to_string()];

		assert_eq!(overlap_ratio(&terms, "Chatbot for support"), 0.0);
		assert_eq!(overlap_ratio(&terms, "Live chat triage"), 1.0);
	}

	#[test]
	fn title_match_outranks_description_only_match() {
		let terms = tokenize_query("fraud", 16);
		let title = score(&terms, "Fraud detection", "Anomaly models.", WEIGHTS);
		let description = score(&terms, "Anomaly models", "Catches fraud early.", WEIGHTS);

		assert!(title.score > description.score);
		assert!(description.is_match());
	}

	#[test]
	fn no_overlap_scores_zero() {
		let terms = tokenize_query("blockchain", 16);
		let relevance = score(&terms, "Chatbot for support", "Answers tickets.", WEIGHTS);

		assert!(!relevance.is_match());
		assert_eq!(relevance.score, 0.0);
	}

	#[test]
	fn like_patterns_wrap_and_escape_terms() {
		assert_eq!(
			like_patterns(&["fraud".to_string(), "top_n".to_string()]),
			vec!["%fraud%".to_string(), "%top\\_n%".to_string()]
		);
	}

	#[test]
	fn accented_words_stay_whole() {
		let terms = tokenize_query("Détection de FRAUDE", 16);

		assert_eq!(terms, vec!["détection", "de", "fraude"]);
		assert_eq!(overlap_ratio(&terms[..1], "Détection des anomalies"), 1.0);
		assert_eq!(overlap_ratio(&terms[..1], "Detection"), 0.0);
	}

	#[test]
	fn single_characters_and_ideographs_yield_no_terms() {
		assert!(tokenize_query("R", 16).is_empty());
		assert!(tokenize_query("日本語", 16).is_empty());
	}
}
