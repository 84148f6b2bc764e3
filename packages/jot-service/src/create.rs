use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, GeoPoint, MemoService, MemoView, Result};
use jot_storage::{models::NewMemo, queries};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateRequest {
	pub content: String,
	#[serde(default)]
	pub private: bool,
	#[serde(default)]
	pub pinned: bool,
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
pub struct CreateResponse {
	pub memo: MemoView,
}

impl MemoService {
	pub async fn create(&self, req: CreateRequest) -> Result<CreateResponse> {
		if req.content.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "content must be non-empty.".to_string(),
			});
		}

		let now = OffsetDateTime::now_utc();
		// Tags and word count are derived from content inside the same write.
		let tags = jot_domain::text::extract_tags(&req.content);
		let word_count = jot_domain::text::word_count(&req.content);
		let has_locations = !req.locations.is_empty();
		let memo = NewMemo {
			memo_id: Uuid::new_v4(),
			content: req.content,
			tags,
			word_count,
			private: req.private,
			pinned_at: req.pinned.then_some(now),
			locked: req.locked,
			access_code: crate::normalize_code(req.access_code),
			access_code_hint: crate::normalize_code(req.access_code_hint),
			locations: serde_json::to_value(&req.locations)
				.map_err(|err| Error::Internal { message: err.to_string() })?,
			created_at: now,
			updated_at: now,
		};
		let row = queries::insert_memo(&self.db, &memo).await?;

		if has_locations {
			self.markers().clear();
		}

		Ok(CreateResponse { memo: crate::memo_view(row, false) })
	}
}
