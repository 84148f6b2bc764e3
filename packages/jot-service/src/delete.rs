use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{MemoService, Result};
use jot_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteRequest {
	pub memo_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub memo_id: Uuid,
	/// False when the memo was already in the trash or does not exist.
	pub deleted: bool,
}

impl MemoService {
	/// Soft delete: the memo moves to the trash and disappears from every
	/// default listing. Idempotent.
	pub async fn delete(&self, req: DeleteRequest) -> Result<DeleteResponse> {
		let now = OffsetDateTime::now_utc();
		let deleted = queries::soft_delete(&self.db, req.memo_id, now).await?;

		if deleted {
			self.markers().clear();
		}

		Ok(DeleteResponse { memo_id: req.memo_id, deleted })
	}
}
