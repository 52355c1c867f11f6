use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
	/// Meaning-oriented phrasing; embedding similarity should win.
	Semantic,
	/// Exact identifiers, addresses, or field filters; term matching should win.
	Keyword,
	/// No strong signal either way.
	Mixed,
}
impl QueryIntent {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Semantic => "semantic",
			Self::Keyword => "keyword",
			Self::Mixed => "mixed",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorCounts {
	pub lexical: u32,
	pub semantic: u32,
}

const LEXICAL_TERMS: [&str; 14] = [
	"ticket-", "project-", "issue-", "@", "http", "www.", "from:", "to:", "subject:", "author:",
	"cc:", "tag:", "type:", "id:",
];
const LEXICAL_PATTERNS: [&str; 3] = [
	// File names with a known document or source extension.
	r"\b[\w-]+\.(pdf|docx?|xlsx?|pptx?|csv|txt|md|json|ya?ml|toml|rs|py|js|ts|go|java|html?)\b",
	// Tracker-style identifiers such as abc-123.
	r"\b[a-z][a-z0-9]*-\d+\b",
	// Long bare numbers (order ids, ticket numbers).
	r"\b\d{4,}\b",
];
const EXACT_MATCH_PATTERNS: [&str; 3] = [
	r#""[^"]+""#,
	r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}",
	r"(https?://|www\.)\S+",
];
const SEMANTIC_TERMS: [&str; 22] = [
	"what",
	"what is",
	"what are",
	"how",
	"how to",
	"how do",
	"why",
	"when should",
	"explain",
	"describe",
	"summarize",
	"summary",
	"compare",
	"comparison",
	"difference between",
	"overview",
	"meaning of",
	"understand",
	"best way",
	"pros and cons",
	"similar to",
	"related to",
];

pub fn classify(query: &str) -> QueryIntent {
	classify_with(query, &quarry_config::Classifier::default())
}

/// Routes a query by comparing lexical and semantic indicator counts.
///
/// One side wins only when its count exceeds the other by more than `policy.margin`, so near
/// ties land on [`QueryIntent::Mixed`].
pub fn classify_with(query: &str, policy: &quarry_config::Classifier) -> QueryIntent {
	if query.trim().is_empty() {
		return QueryIntent::Mixed;
	}

	let counts = count_indicators(query, policy.exact_match_bonus);

	if counts.lexical > counts.semantic.saturating_add(policy.margin) {
		return QueryIntent::Keyword;
	}
	if counts.semantic > counts.lexical.saturating_add(policy.margin) {
		return QueryIntent::Semantic;
	}

	QueryIntent::Mixed
}

pub fn count_indicators(query: &str, exact_match_bonus: u32) -> IndicatorCounts {
	let lowered = query.to_lowercase();
	let mut lexical = LEXICAL_TERMS.iter().filter(|term| lowered.contains(*term)).count() as u32;

	lexical += LEXICAL_PATTERNS.iter().filter(|pattern| matches_pattern(pattern, &lowered)).count()
		as u32;

	if EXACT_MATCH_PATTERNS.iter().any(|pattern| matches_pattern(pattern, &lowered)) {
		lexical = lexical.saturating_add(exact_match_bonus);
	}

	let semantic =
		SEMANTIC_TERMS.iter().filter(|term| contains_phrase(&lowered, term)).count() as u32;

	IndicatorCounts { lexical, semantic }
}

/// Whole-word match, so "how" does not fire inside "show".
fn contains_phrase(text: &str, phrase: &str) -> bool {
	matches_pattern(&format!(r"\b{}\b", regex::escape(phrase)), text)
}

fn matches_pattern(pattern: &str, text: &str) -> bool {
	Regex::new(pattern).map(|re| re.is_match(text)).unwrap_or(false)
}
