use regex::Regex;

/// The literal token a memo uses to reference memo `number`.
pub fn mention_token(number: i64) -> String {
	format!("@{number}")
}

/// Cheap substring pre-filter. A `true` here is not a match by itself;
/// callers follow up with [`references`].
pub fn may_reference(content: &str, number: i64) -> bool {
	number > 0 && content.contains(&mention_token(number))
}

/// Exact boundary-aware match: `@N` counts only when the next character is
/// not another digit, so a query for 1 never matches `@12`. A preceding
/// digit is not excluded (`@142` still matches a query for 42), mirroring
/// the substring scan this replaces.
pub fn references(content: &str, number: i64) -> bool {
	if !may_reference(content, number) {
		return false;
	}

	// The regex crate has no lookahead; "followed by a non-digit or the end
	// of input" is equivalent for containment.
	let pattern = format!("@{number}(?:[^0-9]|$)");

	Regex::new(&pattern).map(|re| re.is_match(content)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn matches_plain_mention() {
		assert!(references("see @42 for context", 42));
		assert!(references("ends with @42", 42));
		assert!(references("@42, punctuated", 42));
	}

	#[test]
	fn trailing_digit_is_a_different_number() {
		assert!(!references("see @425", 42));
		assert!(!references("see @12", 1));
	}

	#[test]
	fn mixed_mentions_resolve_independently() {
		let content = "refer to @42 and @425";

		assert!(references(content, 42));
		assert!(references(content, 425));

		let content = "refer to @425 only";

		assert!(!references(content, 42));
		assert!(references(content, 425));
	}

	#[test]
	fn leading_digit_is_not_excluded() {
		// Known quirk carried over from the substring scan: a preceding
		// digit does not break the match.
		assert!(references("see @142", 42));
	}

	#[test]
	fn non_positive_numbers_never_match() {
		assert!(!references("@0 and @-1", 0));
		assert!(!references("@-1", -1));
	}

	#[test]
	fn prefilter_agrees_with_the_exact_match_on_containment() {
		assert!(may_reference("see @425", 42));
		assert!(!references("see @425", 42));
		assert!(!may_reference("no mentions here", 42));
	}
}
