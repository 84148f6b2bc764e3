use futures::future;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{MemoService, MemoView};
use jot_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OnThisDayResponse {
	pub items: Vec<MemoView>,
}

impl MemoService {
	/// Memos created on today's calendar date in each of the previous
	/// years, one bounded query per year issued concurrently and merged
	/// newest first. A year whose query fails is logged and skipped;
	/// in-flight queries are not cancelled.
	pub async fn on_this_day(&self) -> OnThisDayResponse {
		let today = OffsetDateTime::now_utc().date();
		let mut jobs = Vec::new();

		for years_ago in 1..=self.cfg.memos.on_this_day_years {
			// Feb 29 has no counterpart in a non-leap year; skip it.
			let Ok(target) = today.replace_year(today.year() - years_ago) else {
				continue;
			};
			let start = target.midnight().assume_utc();
			let end = start + time::Duration::days(1);

			jobs.push(async move { queries::created_between(&self.db, start, end).await });
		}

		let mut rows = Vec::new();

		for result in future::join_all(jobs).await {
			match result {
				Ok(mut batch) => rows.append(&mut batch),
				Err(err) => {
					tracing::warn!("On-this-day year query failed; skipping that year: {err}.");
				},
			}
		}

		rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

		OnThisDayResponse {
			items: rows.into_iter().map(|row| crate::memo_view(row, true)).collect(),
		}
	}
}
