use time::OffsetDateTime;

/// Multiplies `score` by `factor` when the document was created within the last
/// `window_days` days. The window edge is inclusive.
pub fn boost(score: f32, created_at: Option<OffsetDateTime>, window_days: i64, factor: f32) -> f32 {
	boost_at(score, created_at, window_days, factor, OffsetDateTime::now_utc())
}

pub fn boost_at(
	score: f32,
	created_at: Option<OffsetDateTime>,
	window_days: i64,
	factor: f32,
	now: OffsetDateTime,
) -> f32 {
	let Some(created_at) = created_at else { return score };

	if age_days(created_at, now) <= window_days { score * factor } else { score }
}

/// Whole days elapsed, floored. Documents dated in the future have a negative age.
pub fn age_days(created_at: OffsetDateTime, now: OffsetDateTime) -> i64 {
	let seconds = (now - created_at).whole_seconds();

	seconds.div_euclid(86_400)
}
