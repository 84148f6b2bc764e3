use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct MemoRow {
	pub memo_id: Uuid,
	pub memo_number: i64,
	pub content: String,
	pub tags: Vec<String>,
	pub word_count: i32,
	pub private: bool,
	pub pinned_at: Option<OffsetDateTime>,
	pub locked: bool,
	pub access_code: Option<String>,
	pub access_code_hint: Option<String>,
	pub locations: Value,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
	pub deleted_at: Option<OffsetDateTime>,
}
impl MemoRow {
	pub fn is_active(&self) -> bool {
		self.deleted_at.is_none()
	}
}

#[derive(Debug)]
pub struct NewMemo {
	pub memo_id: Uuid,
	pub content: String,
	pub tags: Vec<String>,
	pub word_count: i32,
	pub private: bool,
	pub pinned_at: Option<OffsetDateTime>,
	pub locked: bool,
	pub access_code: Option<String>,
	pub access_code_hint: Option<String>,
	pub locations: Value,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct MemoChanges {
	pub memo_id: Uuid,
	pub content: String,
	pub tags: Vec<String>,
	pub word_count: i32,
	pub private: bool,
	pub locked: bool,
	pub access_code: Option<String>,
	pub access_code_hint: Option<String>,
	pub locations: Value,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Default)]
pub struct ListFilter {
	/// Privileged sessions see private memos too.
	pub include_private: bool,
	pub tag: Option<String>,
	pub created_after: Option<OffsetDateTime>,
	pub created_before: Option<OffsetDateTime>,
	pub limit: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct TagStatRow {
	pub tag: String,
	pub count: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct HeatmapRow {
	pub day: time::Date,
	pub count: i64,
	pub words: i64,
}
