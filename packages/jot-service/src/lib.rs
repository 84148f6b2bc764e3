pub mod auth;
pub mod backlinks;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod locations;
pub mod on_this_day;
pub mod pin;
pub mod search;
pub mod session;
pub mod stats;
pub mod time_serde;
pub mod trash;
pub mod update;

mod error;

pub use error::{Error, Result};

pub use auth::{CallbackOutcome, CallbackRequest};
pub use backlinks::BacklinksResponse;
pub use create::{CreateRequest, CreateResponse};
pub use delete::{DeleteRequest, DeleteResponse};
pub use export::{ExportFormat, ExportRequest, ExportResponse};
pub use get::{GetRequest, GetResponse};
pub use list::{ListRequest, ListResponse};
pub use locations::{GeoPoint, LocationsResponse, MapMarker, MarkerCache};
pub use on_this_day::OnThisDayResponse;
pub use pin::{PinRequest, PinResponse};
pub use search::{SearchRequest, SearchResponse};
pub use session::{UnlockOutcome, UnlockRequest};
pub use stats::{HeatmapDay, HeatmapResponse, TagStat, TagStatsResponse};
pub use trash::{PurgeRequest, RestoreRequest, TrashResponse};
pub use update::{UpdateRequest, UpdateResponse};

use time::OffsetDateTime;
use uuid::Uuid;

use jot_config::Config;
use jot_storage::{db::Db, models::MemoRow};

pub struct MemoService {
	pub cfg: Config,
	pub db: Db,
	pub http: reqwest::Client,
	markers: MarkerCache,
}
impl MemoService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self::with_markers(cfg, db, MarkerCache::new())
	}

	pub fn with_markers(cfg: Config, db: Db, markers: MarkerCache) -> Self {
		Self { cfg, db, http: reqwest::Client::new(), markers }
	}

	pub(crate) fn markers(&self) -> &MarkerCache {
		&self.markers
	}
}

/// A memo as handed to callers. The per-memo access code itself never
/// leaves the service; the hint does.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemoView {
	pub memo_id: Uuid,
	pub memo_number: i64,
	pub content: String,
	pub tags: Vec<String>,
	pub word_count: i32,
	pub private: bool,
	pub pinned: bool,
	#[serde(with = "crate::time_serde::option")]
	pub pinned_at: Option<OffsetDateTime>,
	pub locked: bool,
	pub redacted: bool,
	pub access_code_hint: Option<String>,
	pub locations: Vec<GeoPoint>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

pub(crate) fn memo_view(row: MemoRow, redact_locked: bool) -> MemoView {
	let redact = redact_locked && row.locked;
	let locations: Vec<GeoPoint> = serde_json::from_value(row.locations).unwrap_or_default();

	MemoView {
		memo_id: row.memo_id,
		memo_number: row.memo_number,
		content: if redact { String::new() } else { row.content },
		tags: if redact { Vec::new() } else { row.tags },
		word_count: row.word_count,
		private: row.private,
		pinned: row.pinned_at.is_some(),
		pinned_at: row.pinned_at,
		locked: row.locked,
		redacted: redact,
		access_code_hint: row.access_code_hint,
		locations: if redact { Vec::new() } else { locations },
		created_at: row.created_at,
		updated_at: row.updated_at,
	}
}

pub(crate) fn normalize_code(code: Option<String>) -> Option<String> {
	code.filter(|value| !value.trim().is_empty())
}
