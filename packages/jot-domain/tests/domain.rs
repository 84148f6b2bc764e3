use jot_domain::{
	backlink,
	router::{Rendered, View, ViewRouter},
	text,
};

#[test]
fn backlink_scenario_from_mixed_content() {
	// "refer to @42 and @425": @425 has a trailing digit after 42, so only
	// the standalone @42 token satisfies a query for 42.
	let content = "refer to @42 and @425";

	assert!(backlink::references(content, 42));
	assert!(backlink::references(content, 425));
	assert!(!backlink::references("refer to @425 alone", 42));
}

#[test]
fn render_switch_never_reverts_to_server_content() {
	let mut router = ViewRouter::new("/");

	assert_eq!(router.render(), Rendered::Server);

	router.navigate("/unknown/foo");
	router.view_mounted();

	// Unknown paths resolve to home, and the switch has flipped for good.
	assert_eq!(router.render(), Rendered::View(View::Home));

	router.navigate("/");
	router.view_mounted();

	assert_eq!(router.render(), Rendered::View(View::Home));
}

#[test]
fn derived_attributes_come_from_content() {
	let content = "#daily walked the dog, see @7 #outside";

	assert_eq!(text::extract_tags(content), vec!["daily", "outside"]);
	assert!(backlink::references(content, 7));
	assert!(text::word_count(content) > 0);
}

#[test]
fn view_serializes_as_snake_case() {
	assert_eq!(serde_json::to_value(View::Gallery).unwrap(), serde_json::json!("gallery"));
	assert_eq!(View::Trash.as_str(), "trash");
}
