use time::{Duration, OffsetDateTime, macros::datetime};

use quarry_config::{Classifier, Search};
use quarry_domain::{
	QueryIntent,
	classifier::{self, count_indicators},
	preview::{self, PREVIEW_MAX_CHARS},
	recency,
};

const NOW: OffsetDateTime = datetime!(2026-10-18 09:30 UTC);

#[test]
fn reference_queries_route_as_documented() {
	let cases = [
		("what is machine learning", QueryIntent::Semantic),
		("ticket-4821 status", QueryIntent::Keyword),
		("quarterly review notes", QueryIntent::Mixed),
		("", QueryIntent::Mixed),
	];

	for (query, expected) in cases {
		assert_eq!(classifier::classify(query), expected, "query: {query:?}");
	}
}

#[test]
fn classification_is_deterministic() {
	let query = "compare report-2024.pdf with the summary from:finance";
	let first = classifier::classify(query);

	for _ in 0..10 {
		assert_eq!(classifier::classify(query), first);
	}
}

#[test]
fn file_names_and_field_prefixes_count_as_lexical() {
	let counts = count_indicators("budget.xlsx from:ops", 2);

	assert_eq!(counts.lexical, 2);
	assert_eq!(counts.semantic, 0);
}

#[test]
fn larger_bonus_can_flip_a_mixed_query() {
	let query = "explain \"zero downtime\"";
	let default_policy = Classifier::default();
	let aggressive = Classifier { margin: 1, exact_match_bonus: 5 };

	assert_eq!(classifier::classify_with(query, &default_policy), QueryIntent::Mixed);
	assert_eq!(classifier::classify_with(query, &aggressive), QueryIntent::Keyword);
}

#[test]
fn recency_boundary_uses_configured_window() {
	let search = Search::default();
	let inside = NOW - Duration::days(search.recency_window_days);
	let outside = NOW - Duration::days(search.recency_window_days + 1);
	let boosted = recency::boost_at(
		0.5,
		Some(inside),
		search.recency_window_days,
		search.recency_factor,
		NOW,
	);
	let unboosted = recency::boost_at(
		0.5,
		Some(outside),
		search.recency_window_days,
		search.recency_factor,
		NOW,
	);

	assert!((boosted - 0.55).abs() < 1e-6, "boosted: {boosted}");
	assert_eq!(unboosted, 0.5);
}

#[test]
fn recency_against_wall_clock_boosts_fresh_documents() {
	let fresh = OffsetDateTime::now_utc() - Duration::hours(1);
	let stale = OffsetDateTime::now_utc() - Duration::days(400);

	assert!(recency::boost(1.0, Some(fresh), 30, 1.1) > 1.0);
	assert_eq!(recency::boost(1.0, Some(stale), 30, 1.1), 1.0);
}

#[test]
fn preview_never_exceeds_budget() {
	let body = "The quarterly planning review covered hiring, infrastructure spend, and the \
		migration timeline for the search cluster. "
		.repeat(5);
	let out = preview::content_preview(&body, PREVIEW_MAX_CHARS);

	assert!(out.chars().count() <= PREVIEW_MAX_CHARS);
	assert!(out.ends_with("..."));
	assert!(body.starts_with(out.trim_end_matches("...")));
}
