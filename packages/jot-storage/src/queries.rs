use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Result,
	db::Db,
	models::{HeatmapRow, ListFilter, MemoChanges, MemoRow, NewMemo, TagStatRow},
};

const MEMO_COLUMNS: &str = "\
memo_id, memo_number, content, tags, word_count, private, pinned_at, locked, access_code, \
access_code_hint, locations, created_at, updated_at, deleted_at";

pub async fn insert_memo(db: &Db, memo: &NewMemo) -> Result<MemoRow> {
	let row = sqlx::query_as::<_, MemoRow>(&format!(
		"\
INSERT INTO memos (
	memo_id,
	content,
	tags,
	word_count,
	private,
	pinned_at,
	locked,
	access_code,
	access_code_hint,
	locations,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
RETURNING {MEMO_COLUMNS}"
	))
	.bind(memo.memo_id)
	.bind(&memo.content)
	.bind(&memo.tags)
	.bind(memo.word_count)
	.bind(memo.private)
	.bind(memo.pinned_at)
	.bind(memo.locked)
	.bind(&memo.access_code)
	.bind(&memo.access_code_hint)
	.bind(&memo.locations)
	.bind(memo.created_at)
	.bind(memo.updated_at)
	.fetch_one(&db.pool)
	.await?;

	Ok(row)
}

pub async fn update_memo(db: &Db, changes: &MemoChanges) -> Result<Option<MemoRow>> {
	let row = sqlx::query_as::<_, MemoRow>(&format!(
		"\
UPDATE memos
SET
	content = $1,
	tags = $2,
	word_count = $3,
	private = $4,
	locked = $5,
	access_code = $6,
	access_code_hint = $7,
	locations = $8,
	updated_at = $9
WHERE memo_id = $10 AND deleted_at IS NULL
RETURNING {MEMO_COLUMNS}"
	))
	.bind(&changes.content)
	.bind(&changes.tags)
	.bind(changes.word_count)
	.bind(changes.private)
	.bind(changes.locked)
	.bind(&changes.access_code)
	.bind(&changes.access_code_hint)
	.bind(&changes.locations)
	.bind(changes.updated_at)
	.bind(changes.memo_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn set_pinned(
	db: &Db,
	memo_id: Uuid,
	pinned_at: Option<OffsetDateTime>,
	now: OffsetDateTime,
) -> Result<Option<MemoRow>> {
	let row = sqlx::query_as::<_, MemoRow>(&format!(
		"\
UPDATE memos
SET pinned_at = $1, updated_at = $2
WHERE memo_id = $3 AND deleted_at IS NULL
RETURNING {MEMO_COLUMNS}"
	))
	.bind(pinned_at)
	.bind(now)
	.bind(memo_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn soft_delete(db: &Db, memo_id: Uuid, now: OffsetDateTime) -> Result<bool> {
	let result = sqlx::query(
		"UPDATE memos SET deleted_at = $1, updated_at = $1 WHERE memo_id = $2 AND deleted_at IS NULL",
	)
	.bind(now)
	.bind(memo_id)
	.execute(&db.pool)
	.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn restore(db: &Db, memo_id: Uuid, now: OffsetDateTime) -> Result<bool> {
	let result = sqlx::query(
		"UPDATE memos SET deleted_at = NULL, updated_at = $1 WHERE memo_id = $2 AND deleted_at IS NOT NULL",
	)
	.bind(now)
	.bind(memo_id)
	.execute(&db.pool)
	.await?;

	Ok(result.rows_affected() > 0)
}

/// Permanent removal. The memo number stays consumed; the sequence never
/// hands it out again.
pub async fn purge(db: &Db, memo_id: Uuid) -> Result<bool> {
	let result =
		sqlx::query("DELETE FROM memos WHERE memo_id = $1 AND deleted_at IS NOT NULL")
			.bind(memo_id)
			.execute(&db.pool)
			.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn fetch_by_id(db: &Db, memo_id: Uuid) -> Result<Option<MemoRow>> {
	let row = sqlx::query_as::<_, MemoRow>(&format!(
		"SELECT {MEMO_COLUMNS} FROM memos WHERE memo_id = $1 AND deleted_at IS NULL"
	))
	.bind(memo_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn fetch_by_number(db: &Db, memo_number: i64) -> Result<Option<MemoRow>> {
	let row = sqlx::query_as::<_, MemoRow>(&format!(
		"SELECT {MEMO_COLUMNS} FROM memos WHERE memo_number = $1 AND deleted_at IS NULL"
	))
	.bind(memo_number)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn list_active(db: &Db, filter: &ListFilter) -> Result<Vec<MemoRow>> {
	let mut builder = sqlx::QueryBuilder::new(format!(
		"SELECT {MEMO_COLUMNS} FROM memos WHERE deleted_at IS NULL"
	));

	if !filter.include_private {
		builder.push(" AND NOT private");
	}
	if let Some(tag) = &filter.tag {
		builder.push(" AND tags @> ARRAY[");
		builder.push_bind(tag);
		builder.push("]");
	}
	if let Some(after) = filter.created_after {
		builder.push(" AND created_at >= ");
		builder.push_bind(after);
	}
	if let Some(before) = filter.created_before {
		builder.push(" AND created_at < ");
		builder.push_bind(before);
	}

	builder.push(" ORDER BY pinned_at DESC NULLS LAST, created_at DESC LIMIT ");
	builder.push_bind(filter.limit);

	let rows = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(rows)
}

pub async fn list_trash(db: &Db, limit: i64) -> Result<Vec<MemoRow>> {
	let rows = sqlx::query_as::<_, MemoRow>(&format!(
		"\
SELECT {MEMO_COLUMNS}
FROM memos
WHERE deleted_at IS NOT NULL
ORDER BY deleted_at DESC
LIMIT $1"
	))
	.bind(limit)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

/// Coarse substring pre-filter for backlinks; the service applies the exact
/// boundary-aware match on top.
pub async fn backlink_candidates(db: &Db, token: &str) -> Result<Vec<MemoRow>> {
	let rows = sqlx::query_as::<_, MemoRow>(&format!(
		"\
SELECT {MEMO_COLUMNS}
FROM memos
WHERE deleted_at IS NULL
	AND NOT private
	AND content LIKE $1
ORDER BY created_at DESC"
	))
	.bind(format!("%{token}%"))
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn tag_stats(db: &Db) -> Result<Vec<TagStatRow>> {
	let rows = sqlx::query_as::<_, TagStatRow>(
		"\
SELECT tag, count(*) AS count
FROM memos, unnest(tags) AS tag
WHERE deleted_at IS NULL AND NOT private
GROUP BY tag
ORDER BY count DESC, tag ASC",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn heatmap(db: &Db, since: OffsetDateTime) -> Result<Vec<HeatmapRow>> {
	let rows = sqlx::query_as::<_, HeatmapRow>(
		"\
SELECT
	(created_at AT TIME ZONE 'UTC')::date AS day,
	count(*) AS count,
	COALESCE(sum(word_count), 0)::bigint AS words
FROM memos
WHERE deleted_at IS NULL AND NOT private AND created_at >= $1
GROUP BY day
ORDER BY day ASC",
	)
	.bind(since)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn created_between(
	db: &Db,
	start: OffsetDateTime,
	end: OffsetDateTime,
) -> Result<Vec<MemoRow>> {
	let rows = sqlx::query_as::<_, MemoRow>(&format!(
		"\
SELECT {MEMO_COLUMNS}
FROM memos
WHERE deleted_at IS NULL
	AND NOT private
	AND created_at >= $1
	AND created_at < $2
ORDER BY created_at DESC"
	))
	.bind(start)
	.bind(end)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn with_locations(db: &Db) -> Result<Vec<MemoRow>> {
	let rows = sqlx::query_as::<_, MemoRow>(&format!(
		"\
SELECT {MEMO_COLUMNS}
FROM memos
WHERE deleted_at IS NULL
	AND NOT private
	AND jsonb_array_length(locations) > 0
ORDER BY created_at DESC"
	))
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

/// The privileged search path: one remote procedure over active memos,
/// private included.
pub async fn search(db: &Db, pattern: &str) -> Result<Vec<MemoRow>> {
	let rows = sqlx::query_as::<_, MemoRow>("SELECT * FROM memo_search($1)")
		.bind(pattern)
		.fetch_all(&db.pool)
		.await?;

	Ok(rows)
}

pub async fn export_active(db: &Db) -> Result<Vec<MemoRow>> {
	let rows = sqlx::query_as::<_, MemoRow>(&format!(
		"\
SELECT {MEMO_COLUMNS}
FROM memos
WHERE deleted_at IS NULL
ORDER BY created_at ASC"
	))
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}
