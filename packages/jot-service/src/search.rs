use serde::{Deserialize, Serialize};

use crate::{MemoService, MemoView, Result};
use jot_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	#[serde(default)]
	pub privileged: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
	pub items: Vec<MemoView>,
}

impl MemoService {
	/// Privileged content search through the `memo_search` procedure.
	/// Without the session gate the caller gets an empty result, not an
	/// error.
	pub async fn search(&self, req: SearchRequest) -> SearchResponse {
		match self.search_inner(req).await {
			Ok(response) => response,
			Err(err) => {
				tracing::warn!("Search failed; returning an empty result: {err}.");

				SearchResponse { items: Vec::new() }
			},
		}
	}

	async fn search_inner(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query = req.query.trim();

		if !req.privileged || query.is_empty() {
			return Ok(SearchResponse { items: Vec::new() });
		}

		let rows = queries::search(&self.db, query).await?;
		let items = rows.into_iter().map(|row| crate::memo_view(row, false)).collect();

		Ok(SearchResponse { items })
	}
}
