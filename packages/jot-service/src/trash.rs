use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, MemoService, MemoView, Result};
use jot_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrashResponse {
	pub items: Vec<MemoView>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RestoreRequest {
	pub memo_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PurgeRequest {
	pub memo_id: Uuid,
}

impl MemoService {
	pub async fn list_trash(&self) -> TrashResponse {
		match self.list_trash_inner().await {
			Ok(response) => response,
			Err(err) => {
				tracing::warn!("Trash listing failed; returning an empty result: {err}.");

				TrashResponse { items: Vec::new() }
			},
		}
	}

	async fn list_trash_inner(&self) -> Result<TrashResponse> {
		let limit = i64::from(self.cfg.memos.page_size);
		let rows = queries::list_trash(&self.db, limit).await?;
		let items = rows.into_iter().map(|row| crate::memo_view(row, true)).collect();

		Ok(TrashResponse { items })
	}

	pub async fn restore(&self, req: RestoreRequest) -> Result<MemoView> {
		let now = OffsetDateTime::now_utc();

		if !queries::restore(&self.db, req.memo_id, now).await? {
			return Err(Error::NotFound { message: "Memo not found in trash.".to_string() });
		}

		self.markers().clear();

		queries::fetch_by_id(&self.db, req.memo_id)
			.await?
			.map(|row| crate::memo_view(row, false))
			.ok_or_else(|| Error::NotFound { message: "Memo not found.".to_string() })
	}

	/// Permanent removal from the trash. The memo number is never reused.
	pub async fn purge(&self, req: PurgeRequest) -> Result<()> {
		if !queries::purge(&self.db, req.memo_id).await? {
			return Err(Error::NotFound { message: "Memo not found in trash.".to_string() });
		}

		Ok(())
	}
}
