use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, MemoService, MemoView, Result};
use jot_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PinRequest {
	pub memo_id: Uuid,
	pub pinned: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PinResponse {
	pub memo: MemoView,
}

impl MemoService {
	pub async fn pin(&self, req: PinRequest) -> Result<PinResponse> {
		let now = OffsetDateTime::now_utc();
		let pinned_at = req.pinned.then_some(now);
		let row = queries::set_pinned(&self.db, req.memo_id, pinned_at, now)
			.await?
			.ok_or_else(|| Error::NotFound { message: "Memo not found.".to_string() })?;

		Ok(PinResponse { memo: crate::memo_view(row, false) })
	}
}
