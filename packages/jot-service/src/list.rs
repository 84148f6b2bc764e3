use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{MemoService, MemoView, Result};
use jot_storage::{models::ListFilter, queries};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListRequest {
	#[serde(default)]
	pub privileged: bool,
	#[serde(default)]
	pub tag: Option<String>,
	#[serde(default, with = "crate::time_serde::option")]
	pub created_after: Option<OffsetDateTime>,
	#[serde(default, with = "crate::time_serde::option")]
	pub created_before: Option<OffsetDateTime>,
	#[serde(default)]
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
	pub items: Vec<MemoView>,
}

impl MemoService {
	/// Default listing: active memos, pinned first, newest first. Private
	/// memos require a privileged session; locked content is redacted for
	/// everyone else.
	pub async fn list(&self, req: ListRequest) -> ListResponse {
		match self.list_inner(req).await {
			Ok(response) => response,
			Err(err) => {
				tracing::warn!("Memo listing failed; returning an empty result: {err}.");

				ListResponse { items: Vec::new() }
			},
		}
	}

	async fn list_inner(&self, req: ListRequest) -> Result<ListResponse> {
		let page_size = self.cfg.memos.page_size;
		let limit = i64::from(req.limit.map_or(page_size, |value| value.min(page_size)));
		let privileged = req.privileged;
		let filter = ListFilter {
			include_private: privileged,
			tag: req.tag.filter(|tag| !tag.trim().is_empty()),
			created_after: req.created_after,
			created_before: req.created_before,
			limit,
		};
		let rows = queries::list_active(&self.db, &filter).await?;
		let items = rows.into_iter().map(|row| crate::memo_view(row, !privileged)).collect();

		Ok(ListResponse { items })
	}
}
