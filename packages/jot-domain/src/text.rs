use unicode_segmentation::UnicodeSegmentation;

/// Extract `#tag` markers from memo content. A marker runs until whitespace
/// or the next `#`; empty markers are ignored, duplicates are dropped, and
/// first-seen order is preserved. The content stays the source of truth;
/// the extracted list is denormalized for query convenience.
pub fn extract_tags(content: &str) -> Vec<String> {
	let mut tags: Vec<String> = Vec::new();
	let mut rest = content;

	while let Some(idx) = rest.find('#') {
		rest = &rest[idx + 1..];

		let end = rest.find(|c: char| c.is_whitespace() || c == '#').unwrap_or(rest.len());
		let tag = &rest[..end];

		if !tag.is_empty() && !tags.iter().any(|seen| seen == tag) {
			tags.push(tag.to_string());
		}

		rest = &rest[end..];
	}

	tags
}

pub fn word_count(content: &str) -> i32 {
	content.unicode_words().count() as i32
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_tags_in_first_seen_order() {
		assert_eq!(extract_tags("#a words #b more #a"), vec!["a", "b"]);
	}

	#[test]
	fn markers_end_at_whitespace_or_hash() {
		assert_eq!(extract_tags("#life/journal rest"), vec!["life/journal"]);
		assert_eq!(extract_tags("#a#b"), vec!["a", "b"]);
		assert_eq!(extract_tags("trailing #"), Vec::<String>::new());
	}

	#[test]
	fn content_without_markers_yields_nothing() {
		assert!(extract_tags("plain text, no tags").is_empty());
	}

	#[test]
	fn counts_unicode_words() {
		assert_eq!(word_count("two words"), 2);
		assert_eq!(word_count(""), 0);
		assert_eq!(word_count("don't split contractions"), 3);
	}
}
