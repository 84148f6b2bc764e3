use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, macros::format_description};

use crate::{MemoService, Result};
use jot_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TagStat {
	pub tag: String,
	pub count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TagStatsResponse {
	pub items: Vec<TagStat>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeatmapDay {
	pub day: String,
	pub count: i64,
	pub words: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeatmapResponse {
	pub days: Vec<HeatmapDay>,
}

impl MemoService {
	/// Tag aggregate over active public memos, most used first.
	pub async fn tag_stats(&self) -> TagStatsResponse {
		match self.tag_stats_inner().await {
			Ok(response) => response,
			Err(err) => {
				tracing::warn!("Tag stats failed; returning an empty result: {err}.");

				TagStatsResponse { items: Vec::new() }
			},
		}
	}

	async fn tag_stats_inner(&self) -> Result<TagStatsResponse> {
		let rows = queries::tag_stats(&self.db).await?;
		let items =
			rows.into_iter().map(|row| TagStat { tag: row.tag, count: row.count }).collect();

		Ok(TagStatsResponse { items })
	}

	/// Per-day (count, words) buckets over the trailing window, active
	/// public memos only. Days without memos are absent from the mapping.
	pub async fn heatmap(&self) -> HeatmapResponse {
		match self.heatmap_inner().await {
			Ok(response) => response,
			Err(err) => {
				tracing::warn!("Heatmap aggregation failed; returning an empty result: {err}.");

				HeatmapResponse { days: Vec::new() }
			},
		}
	}

	async fn heatmap_inner(&self) -> Result<HeatmapResponse> {
		let since = OffsetDateTime::now_utc()
			- time::Duration::days(self.cfg.memos.heatmap_window_days);
		let rows = queries::heatmap(&self.db, since).await?;
		let day_format = format_description!("[year]-[month]-[day]");
		let days = rows
			.into_iter()
			.map(|row| HeatmapDay {
				day: row.day.format(&day_format).unwrap_or_default(),
				count: row.count,
				words: row.words,
			})
			.collect();

		Ok(HeatmapResponse { days })
	}
}
