use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MemoService, MemoView, Result};
use jot_storage::{models::MemoRow, queries};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GetRequest {
	#[serde(default)]
	pub memo_id: Option<Uuid>,
	#[serde(default)]
	pub memo_number: Option<i64>,
	#[serde(default)]
	pub access_code: Option<String>,
	#[serde(default)]
	pub privileged: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetResponse {
	pub memo: Option<MemoView>,
}

impl MemoService {
	/// Fetch one memo by id or number. Failures and misses both surface as
	/// a null memo; locked content stays redacted unless the supplied code
	/// matches.
	pub async fn get(&self, req: GetRequest) -> GetResponse {
		match self.get_inner(req).await {
			Ok(memo) => GetResponse { memo },
			Err(err) => {
				tracing::warn!("Memo fetch failed; returning a null result: {err}.");

				GetResponse { memo: None }
			},
		}
	}

	async fn get_inner(&self, req: GetRequest) -> Result<Option<MemoView>> {
		let row = match (req.memo_id, req.memo_number) {
			(Some(memo_id), _) => queries::fetch_by_id(&self.db, memo_id).await?,
			(None, Some(number)) => queries::fetch_by_number(&self.db, number).await?,
			(None, None) => None,
		};
		let Some(row) = row else {
			return Ok(None);
		};

		if row.private && !req.privileged {
			return Ok(None);
		}

		let unlocked = !row.locked || self.code_matches(&row, req.access_code.as_deref());

		Ok(Some(crate::memo_view(row, !unlocked)))
	}

	fn code_matches(&self, row: &MemoRow, presented: Option<&str>) -> bool {
		// A locked memo without its own code falls back to the global one.
		let expected =
			row.access_code.as_deref().unwrap_or(self.cfg.security.access_code.as_str());

		presented == Some(expected)
	}
}
