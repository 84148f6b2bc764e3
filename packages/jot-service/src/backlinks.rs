use serde::{Deserialize, Serialize};

use crate::{MemoService, MemoView, Result};
use jot_domain::backlink;
use jot_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BacklinksResponse {
	pub items: Vec<MemoView>,
}

impl MemoService {
	/// Memos whose content references `@number`, newest first. Two phases:
	/// a substring pre-filter in SQL, then the exact boundary-aware match.
	/// Active, public memos only; a non-positive number yields an empty
	/// result rather than an error.
	pub async fn backlinks(&self, number: i64) -> BacklinksResponse {
		match self.backlinks_inner(number).await {
			Ok(response) => response,
			Err(err) => {
				tracing::warn!("Backlink lookup failed; returning an empty result: {err}.");

				BacklinksResponse { items: Vec::new() }
			},
		}
	}

	async fn backlinks_inner(&self, number: i64) -> Result<BacklinksResponse> {
		if number <= 0 {
			return Ok(BacklinksResponse { items: Vec::new() });
		}

		let token = backlink::mention_token(number);
		let candidates = queries::backlink_candidates(&self.db, &token).await?;
		let items = candidates
			.into_iter()
			.filter(|row| backlink::references(&row.content, number))
			.map(|row| crate::memo_view(row, true))
			.collect();

		Ok(BacklinksResponse { items })
	}
}
