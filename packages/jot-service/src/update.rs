use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, GeoPoint, MemoService, MemoView, Result};
use jot_storage::{models::MemoChanges, queries};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateRequest {
	pub memo_id: Uuid,
	pub content: String,
	#[serde(default)]
	pub private: bool,
	#[serde(default)]
	pub locked: bool,
	#[serde(default)]
	pub access_code: Option<String>,
	#[serde(default)]
	pub access_code_hint: Option<String>,
	#[serde(default)]
	pub locations: Vec<GeoPoint>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
	pub memo: MemoView,
}

impl MemoService {
	pub async fn update(&self, req: UpdateRequest) -> Result<UpdateResponse> {
		if req.content.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "content must be non-empty.".to_string(),
			});
		}

		let now = OffsetDateTime::now_utc();
		let tags = jot_domain::text::extract_tags(&req.content);
		let word_count = jot_domain::text::word_count(&req.content);
		let changes = MemoChanges {
			memo_id: req.memo_id,
			content: req.content,
			tags,
			word_count,
			private: req.private,
			locked: req.locked,
			access_code: crate::normalize_code(req.access_code),
			access_code_hint: crate::normalize_code(req.access_code_hint),
			locations: serde_json::to_value(&req.locations)
				.map_err(|err| Error::Internal { message: err.to_string() })?,
			updated_at: now,
		};
		let row = queries::update_memo(&self.db, &changes)
			.await?
			.ok_or_else(|| Error::NotFound { message: "Memo not found.".to_string() })?;

		// Locations may have been added, moved, or removed.
		self.markers().clear();

		Ok(UpdateResponse { memo: crate::memo_view(row, false) })
	}
}
