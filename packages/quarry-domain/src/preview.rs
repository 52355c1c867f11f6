use unicode_segmentation::UnicodeSegmentation;

pub const PREVIEW_MAX_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

/// Short display excerpt of `text`, at most `max_chars` characters including the ellipsis.
///
/// Text that already fits is returned trimmed. Longer text is cut at the last word boundary that
/// fits and suffixed with `...`. A single word longer than the budget is hard-cut.
pub fn content_preview(text: &str, max_chars: usize) -> String {
	let trimmed = text.trim();

	if trimmed.chars().count() <= max_chars {
		return trimmed.to_string();
	}

	let budget = max_chars.saturating_sub(ELLIPSIS.len());
	let mut end = 0_usize;
	let mut used = 0_usize;

	for (idx, segment) in trimmed.split_word_bound_indices() {
		let chars = segment.chars().count();

		if used + chars > budget {
			break;
		}

		used += chars;
		end = idx + segment.len();
	}

	let mut out = trimmed[..end].trim_end().to_string();

	if out.is_empty() {
		out = trimmed.chars().take(budget).collect();
	}

	out.push_str(ELLIPSIS);

	out
}
