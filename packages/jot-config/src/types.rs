use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub security: Security,
	pub auth: Auth,
	#[serde(default)]
	pub memos: Memos,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	/// "local" or "production". Drives cookie security and redirect origins.
	pub env: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub access_code: String,
	#[serde(default = "default_session_cookie")]
	pub session_cookie: String,
	#[serde(default = "default_session_ttl_days")]
	pub session_ttl_days: i64,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
	pub token_url: String,
	pub userinfo_url: String,
	pub client_id: String,
	pub client_secret: String,
	pub dev_origin: String,
	#[serde(default = "default_error_path")]
	pub error_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Memos {
	pub page_size: u32,
	pub heatmap_window_days: i64,
	pub on_this_day_years: i32,
}
impl Default for Memos {
	fn default() -> Self {
		Self { page_size: 50, heatmap_window_days: 366, on_this_day_years: 5 }
	}
}

fn default_session_cookie() -> String {
	"jot_session".to_string()
}

fn default_session_ttl_days() -> i64 {
	7
}

fn default_error_path() -> String {
	"/error".to_string()
}
