use serde::{Deserialize, Serialize};
use time::macros::format_description;

use crate::{Error, MemoService, MemoView, Result};
use jot_storage::queries;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
	Json,
	Markdown,
}
impl ExportFormat {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"json" => Some(Self::Json),
			"markdown" => Some(Self::Markdown),
			_ => None,
		}
	}

	pub fn content_type(&self) -> &'static str {
		match self {
			Self::Json => "application/json",
			Self::Markdown => "text/markdown",
		}
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportRequest {
	pub format: ExportFormat,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportResponse {
	pub format: ExportFormat,
	pub body: String,
}

impl MemoService {
	/// Dump the full active memo set. Unlike the other read paths this one
	/// propagates failures; the caller owns the notification surface.
	pub async fn export(&self, req: ExportRequest) -> Result<ExportResponse> {
		let rows = queries::export_active(&self.db).await?;
		let items: Vec<MemoView> =
			rows.into_iter().map(|row| crate::memo_view(row, false)).collect();
		let body = match req.format {
			ExportFormat::Json => render_json(&items)?,
			ExportFormat::Markdown => render_markdown(&items),
		};

		Ok(ExportResponse { format: req.format, body })
	}
}

pub(crate) fn render_json(items: &[MemoView]) -> Result<String> {
	serde_json::to_string_pretty(items).map_err(|err| Error::Internal { message: err.to_string() })
}

pub(crate) fn render_markdown(items: &[MemoView]) -> String {
	let date_format = format_description!("[month repr:short] [day padding:none], [year] [hour]:[minute]");
	let blocks: Vec<String> = items
		.iter()
		.map(|memo| {
			let date = memo.created_at.format(&date_format).unwrap_or_default();

			format!(
				"---\nid: {}\ndate: {}\ntags: {}\n---\n\n{}",
				memo.memo_id,
				date,
				memo.tags.join(", "),
				memo.content,
			)
		})
		.collect();

	blocks.join("\n\n")
}
