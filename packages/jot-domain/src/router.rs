//! Client view routing modeled as an explicit state machine: a view state
//! store, a history bridge, a transition gate, and a render switch. The
//! render switch starts on the server-produced content and flips to
//! client-driven views exactly once, on the first observed path change.

use serde::Serialize;

/// The closed set of views the application knows how to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
	Home,
	Gallery,
	Tags,
	Trash,
	Admin,
}
impl View {
	/// Total over all inputs: exact match for the root path, prefix match
	/// for everything else, `Home` for anything unrecognized.
	pub fn resolve(path: &str) -> Self {
		if path == "/" {
			return Self::Home;
		}
		if path.starts_with("/gallery") {
			Self::Gallery
		} else if path.starts_with("/tags") {
			Self::Tags
		} else if path.starts_with("/trash") {
			Self::Trash
		} else if path.starts_with("/admin") {
			Self::Admin
		} else {
			Self::Home
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Home => "home",
			Self::Gallery => "gallery",
			Self::Tags => "tags",
			Self::Trash => "trash",
			Self::Admin => "admin",
		}
	}
}

/// Coarse category shown while a navigation is in flight. Evaluated with
/// the same prefix rule as [`View::resolve`], independently; paths outside
/// the four categories fall back to the home placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
	Home,
	Gallery,
	Tags,
	Trash,
}
impl Placeholder {
	pub fn resolve(path: &str) -> Self {
		if path.starts_with("/gallery") {
			Self::Gallery
		} else if path.starts_with("/tags") {
			Self::Tags
		} else if path.starts_with("/trash") {
			Self::Trash
		} else {
			Self::Home
		}
	}
}

/// Transition gate. `Pending` renders the placeholder until the target view
/// reports it has mounted; there is no timeout, so a mount that never
/// happens leaves the placeholder up permanently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
	Idle,
	Pending(Placeholder),
}

/// Render switch state. The flip to `ClientViews` is permanent for the
/// lifetime of the router.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
	ServerContent,
	ClientViews,
}

/// What the host should render right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rendered {
	/// Pass the externally supplied server-rendered content through verbatim.
	Server,
	Placeholder(Placeholder),
	View(View),
}

/// Session history bridge: a linear entry list with a cursor. Navigating
/// truncates any forward entries, like browser history.
#[derive(Debug)]
struct History {
	entries: Vec<String>,
	cursor: usize,
}
impl History {
	fn new(initial: String) -> Self {
		Self { entries: vec![initial], cursor: 0 }
	}

	fn push(&mut self, path: String) {
		self.entries.truncate(self.cursor + 1);
		self.entries.push(path);
		self.cursor += 1;
	}

	fn back(&mut self) -> Option<&str> {
		if self.cursor == 0 {
			return None;
		}

		self.cursor -= 1;

		Some(self.entries[self.cursor].as_str())
	}

	fn forward(&mut self) -> Option<&str> {
		if self.cursor + 1 >= self.entries.len() {
			return None;
		}

		self.cursor += 1;

		Some(self.entries[self.cursor].as_str())
	}
}

#[derive(Debug)]
pub struct ViewRouter {
	initial_path: String,
	/// View state store: the current logical path.
	path: String,
	history: History,
	gate: Gate,
	mode: RenderMode,
}
impl ViewRouter {
	pub fn new(initial_path: impl Into<String>) -> Self {
		let initial_path = initial_path.into();

		Self {
			path: initial_path.clone(),
			history: History::new(initial_path.clone()),
			initial_path,
			gate: Gate::Idle,
			mode: RenderMode::ServerContent,
		}
	}

	/// User-triggered navigation: push a history entry and observe the path.
	pub fn navigate(&mut self, path: &str) {
		self.history.push(path.to_string());
		self.observe(path.to_string());
	}

	/// Browser-style back. Returns false when there is no earlier entry.
	pub fn back(&mut self) -> bool {
		match self.history.back().map(ToOwned::to_owned) {
			Some(path) => {
				self.observe(path);

				true
			},
			None => false,
		}
	}

	/// Browser-style forward. Returns false when there is no later entry.
	pub fn forward(&mut self) -> bool {
		match self.history.forward().map(ToOwned::to_owned) {
			Some(path) => {
				self.observe(path);

				true
			},
			None => false,
		}
	}

	/// The target view finished mounting; close the transition gate.
	pub fn view_mounted(&mut self) {
		self.gate = Gate::Idle;
	}

	pub fn current_path(&self) -> &str {
		&self.path
	}

	pub fn current_view(&self) -> View {
		View::resolve(&self.path)
	}

	pub fn mode(&self) -> RenderMode {
		self.mode
	}

	pub fn render(&self) -> Rendered {
		match self.mode {
			RenderMode::ServerContent => Rendered::Server,
			RenderMode::ClientViews => match self.gate {
				Gate::Pending(placeholder) => Rendered::Placeholder(placeholder),
				Gate::Idle => Rendered::View(View::resolve(&self.path)),
			},
		}
	}

	fn observe(&mut self, path: String) {
		if self.mode == RenderMode::ServerContent && path != self.initial_path {
			self.mode = RenderMode::ClientViews;
		}

		self.gate = Gate::Pending(Placeholder::resolve(&path));
		self.path = path;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolution_is_total_and_falls_back_to_home() {
		assert_eq!(View::resolve("/"), View::Home);
		assert_eq!(View::resolve("/gallery"), View::Gallery);
		assert_eq!(View::resolve("/gallery/2024"), View::Gallery);
		assert_eq!(View::resolve("/tags/rust"), View::Tags);
		assert_eq!(View::resolve("/trash"), View::Trash);
		assert_eq!(View::resolve("/admin/settings"), View::Admin);
		assert_eq!(View::resolve("/unknown/foo"), View::Home);
		assert_eq!(View::resolve(""), View::Home);
	}

	#[test]
	fn placeholder_falls_back_to_home_for_admin() {
		assert_eq!(Placeholder::resolve("/admin"), Placeholder::Home);
		assert_eq!(Placeholder::resolve("/gallery/x"), Placeholder::Gallery);
	}

	#[test]
	fn first_paint_renders_server_content_regardless_of_path() {
		let router = ViewRouter::new("/tags/rust");

		assert_eq!(router.render(), Rendered::Server);
		assert_eq!(router.current_view(), View::Tags);
	}

	#[test]
	fn navigating_to_the_initial_path_does_not_flip() {
		let mut router = ViewRouter::new("/");

		router.navigate("/");

		assert_eq!(router.mode(), RenderMode::ServerContent);
		assert_eq!(router.render(), Rendered::Server);
	}

	#[test]
	fn flip_is_permanent_even_when_returning_to_the_initial_path() {
		let mut router = ViewRouter::new("/");

		router.navigate("/gallery");
		router.view_mounted();

		assert_eq!(router.render(), Rendered::View(View::Gallery));

		router.navigate("/");
		router.view_mounted();

		assert_eq!(router.mode(), RenderMode::ClientViews);
		assert_eq!(router.render(), Rendered::View(View::Home));
	}

	#[test]
	fn pending_navigation_renders_the_target_placeholder() {
		let mut router = ViewRouter::new("/");

		router.navigate("/trash");

		assert_eq!(router.render(), Rendered::Placeholder(Placeholder::Trash));

		router.view_mounted();

		assert_eq!(router.render(), Rendered::View(View::Trash));
	}

	#[test]
	fn missing_mount_leaves_the_placeholder_up() {
		let mut router = ViewRouter::new("/");

		router.navigate("/tags");

		assert_eq!(router.render(), Rendered::Placeholder(Placeholder::Tags));
		assert_eq!(router.render(), Rendered::Placeholder(Placeholder::Tags));
	}

	#[test]
	fn back_and_forward_follow_history() {
		let mut router = ViewRouter::new("/");

		router.navigate("/gallery");
		router.view_mounted();
		router.navigate("/tags");
		router.view_mounted();

		assert!(router.back());
		router.view_mounted();
		assert_eq!(router.current_path(), "/gallery");

		assert!(router.back());
		router.view_mounted();
		assert_eq!(router.current_path(), "/");
		assert_eq!(router.mode(), RenderMode::ClientViews);

		assert!(router.forward());
		router.view_mounted();
		assert_eq!(router.current_path(), "/gallery");

		assert!(router.forward());
		assert!(!router.forward());
	}

	#[test]
	fn navigation_truncates_forward_entries() {
		let mut router = ViewRouter::new("/");

		router.navigate("/gallery");
		router.navigate("/tags");
		assert!(router.back());
		router.navigate("/trash");

		assert!(!router.forward());
		assert!(router.back());
		assert_eq!(router.current_path(), "/gallery");
	}

	#[test]
	fn back_flips_the_render_switch_too() {
		let mut router = ViewRouter::new("/gallery");

		router.navigate("/gallery");

		assert_eq!(router.mode(), RenderMode::ServerContent);

		assert!(router.back());
		// Still the initial path, still server content.
		assert_eq!(router.mode(), RenderMode::ServerContent);

		router.navigate("/tags");

		assert_eq!(router.mode(), RenderMode::ClientViews);
	}
}
