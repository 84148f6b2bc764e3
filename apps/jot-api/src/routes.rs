use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::{HeaderMap, StatusCode, header},
	response::{IntoResponse, Redirect, Response},
	routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::state::AppState;
use jot_domain::router::View;
use jot_service::{
	BacklinksResponse, CallbackRequest, CreateRequest, CreateResponse, DeleteRequest,
	DeleteResponse, Error as ServiceError, ExportFormat, ExportRequest, GetRequest, GetResponse,
	HeatmapResponse, ListRequest, ListResponse, LocationsResponse, OnThisDayResponse, PinRequest,
	PinResponse, PurgeRequest, RestoreRequest, SearchRequest, SearchResponse, TagStatsResponse,
	TrashResponse, UnlockOutcome, UnlockRequest, UpdateRequest, UpdateResponse,
};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/memos", get(list).post(create))
		.route("/v1/memos/get", post(get_memo))
		.route("/v1/memos/update", post(update))
		.route("/v1/memos/delete", post(delete))
		.route("/v1/memos/pin", post(pin))
		.route("/v1/memos/backlinks/{number}", get(backlinks))
		.route("/v1/trash", get(list_trash))
		.route("/v1/trash/restore", post(restore))
		.route("/v1/trash/purge", post(purge))
		.route("/v1/stats/tags", get(tag_stats))
		.route("/v1/stats/heatmap", get(heatmap))
		.route("/v1/on_this_day", get(on_this_day))
		.route("/v1/locations", get(locations))
		.route("/v1/search", post(search))
		.route("/v1/export", get(export))
		.route("/v1/session", get(session))
		.route("/v1/session/unlock", post(unlock))
		.route("/auth/callback", get(auth_callback))
		.route("/app", get(app_shell_root))
		.route("/app/{*path}", get(app_shell))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn create(
	State(state): State<AppState>,
	Json(payload): Json<CreateRequest>,
) -> Result<Json<CreateResponse>, ApiError> {
	let response = state.service.create(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct ListParams {
	#[serde(default)]
	tag: Option<String>,
	#[serde(default, with = "jot_service::time_serde::option")]
	created_after: Option<OffsetDateTime>,
	#[serde(default, with = "jot_service::time_serde::option")]
	created_before: Option<OffsetDateTime>,
	#[serde(default)]
	limit: Option<u32>,
}

async fn list(
	State(state): State<AppState>,
	jar: CookieJar,
	Query(params): Query<ListParams>,
) -> Json<ListResponse> {
	// The privileged flag never comes from the client; only the session
	// cookie grants it.
	let request = ListRequest {
		privileged: privileged(&state, &jar),
		tag: params.tag,
		created_after: params.created_after,
		created_before: params.created_before,
		limit: params.limit,
	};

	Json(state.service.list(request).await)
}

#[derive(Debug, Deserialize)]
struct GetParams {
	#[serde(default)]
	memo_id: Option<Uuid>,
	#[serde(default)]
	memo_number: Option<i64>,
	#[serde(default)]
	access_code: Option<String>,
}

async fn get_memo(
	State(state): State<AppState>,
	jar: CookieJar,
	Json(params): Json<GetParams>,
) -> Json<GetResponse> {
	let request = GetRequest {
		memo_id: params.memo_id,
		memo_number: params.memo_number,
		access_code: params.access_code,
		privileged: privileged(&state, &jar),
	};

	Json(state.service.get(request).await)
}

async fn update(
	State(state): State<AppState>,
	Json(payload): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
	let response = state.service.update(payload).await?;

	Ok(Json(response))
}

async fn delete(
	State(state): State<AppState>,
	Json(payload): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
	let response = state.service.delete(payload).await?;

	Ok(Json(response))
}

async fn pin(
	State(state): State<AppState>,
	Json(payload): Json<PinRequest>,
) -> Result<Json<PinResponse>, ApiError> {
	let response = state.service.pin(payload).await?;

	Ok(Json(response))
}

async fn backlinks(
	State(state): State<AppState>,
	Path(number): Path<i64>,
) -> Json<BacklinksResponse> {
	Json(state.service.backlinks(number).await)
}

async fn list_trash(State(state): State<AppState>) -> Json<TrashResponse> {
	Json(state.service.list_trash().await)
}

async fn restore(
	State(state): State<AppState>,
	Json(payload): Json<RestoreRequest>,
) -> Result<Json<jot_service::MemoView>, ApiError> {
	let memo = state.service.restore(payload).await?;

	Ok(Json(memo))
}

async fn purge(
	State(state): State<AppState>,
	Json(payload): Json<PurgeRequest>,
) -> Result<StatusCode, ApiError> {
	state.service.purge(payload).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn tag_stats(State(state): State<AppState>) -> Json<TagStatsResponse> {
	Json(state.service.tag_stats().await)
}

async fn heatmap(State(state): State<AppState>) -> Json<HeatmapResponse> {
	Json(state.service.heatmap().await)
}

async fn on_this_day(State(state): State<AppState>) -> Json<OnThisDayResponse> {
	Json(state.service.on_this_day().await)
}

async fn locations(State(state): State<AppState>) -> Json<LocationsResponse> {
	Json(state.service.locations().await)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
	query: String,
}

async fn search(
	State(state): State<AppState>,
	jar: CookieJar,
	Json(params): Json<SearchParams>,
) -> Json<SearchResponse> {
	let request =
		SearchRequest { query: params.query, privileged: privileged(&state, &jar) };

	Json(state.service.search(request).await)
}

#[derive(Debug, Deserialize)]
struct ExportParams {
	#[serde(default)]
	format: Option<String>,
}

async fn export(
	State(state): State<AppState>,
	Query(params): Query<ExportParams>,
) -> Result<Response, ApiError> {
	let raw = params.format.as_deref().unwrap_or("json");
	let Some(format) = ExportFormat::parse(raw) else {
		return Err(json_error(
			StatusCode::UNPROCESSABLE_ENTITY,
			"invalid_request",
			"format must be json or markdown.",
		));
	};
	let response = state.service.export(ExportRequest { format }).await?;

	Ok((
		[(header::CONTENT_TYPE, response.format.content_type())],
		response.body,
	)
		.into_response())
}

#[derive(Debug, Serialize)]
struct SessionStatus {
	privileged: bool,
}

async fn session(State(state): State<AppState>, jar: CookieJar) -> Json<SessionStatus> {
	Json(SessionStatus { privileged: privileged(&state, &jar) })
}

async fn unlock(
	State(state): State<AppState>,
	jar: CookieJar,
	Json(payload): Json<UnlockRequest>,
) -> Result<(CookieJar, Json<UnlockOutcome>), ApiError> {
	let outcome = state.service.unlock(&payload);

	if !outcome.granted {
		return Err(json_error(StatusCode::FORBIDDEN, "invalid_access_code", "Wrong code."));
	}

	let cfg = &state.service.cfg;
	let cookie = Cookie::build((cfg.security.session_cookie.clone(), payload.code))
		.path("/")
		.http_only(true)
		.same_site(SameSite::Strict)
		.secure(cfg.service.env == "production")
		.max_age(time::Duration::days(cfg.security.session_ttl_days))
		.build();

	Ok((jar.add(cookie), Json(outcome)))
}

async fn auth_callback(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(request): Query<CallbackRequest>,
) -> Redirect {
	let origin = redirect_origin(&state, &headers);

	match state.service.auth_callback(request).await {
		Ok(outcome) => Redirect::temporary(&format!("{origin}{}", outcome.next)),
		Err(err) => {
			tracing::warn!("Auth callback failed: {err}.");

			Redirect::temporary(&format!("{origin}{}", state.service.cfg.auth.error_path))
		},
	}
}

#[derive(Debug, Serialize)]
struct ShellDescriptor {
	path: String,
	view: &'static str,
	/// The first paint always comes from the server render; the client
	/// router takes over only after its first navigation.
	server_render: bool,
}

async fn app_shell_root() -> Json<ShellDescriptor> {
	shell("/".to_string())
}

async fn app_shell(Path(path): Path<String>) -> Json<ShellDescriptor> {
	shell(format!("/{path}"))
}

fn shell(path: String) -> Json<ShellDescriptor> {
	let view = View::resolve(&path);

	Json(ShellDescriptor { view: view.as_str(), path, server_render: true })
}

fn privileged(state: &AppState, jar: &CookieJar) -> bool {
	let presented =
		jar.get(&state.service.cfg.security.session_cookie).map(|cookie| cookie.value());

	state.service.is_privileged(presented)
}

/// In production the public origin arrives through the forwarding proxy;
/// locally it is the configured dev origin.
fn redirect_origin(state: &AppState, headers: &HeaderMap) -> String {
	let cfg = &state.service.cfg;

	if cfg.service.env == "production"
		&& let Some(host) = headers.get("x-forwarded-host").and_then(|value| value.to_str().ok())
	{
		return format!("https://{host}");
	}

	cfg.auth.dev_origin.clone()
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError { status, error_code: code.to_string(), message: message.into() }
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_request", message),
			ServiceError::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "not_found", message),
			ServiceError::Denied { message } =>
				json_error(StatusCode::FORBIDDEN, "denied", message),
			ServiceError::Upstream { message } =>
				json_error(StatusCode::BAD_GATEWAY, "upstream_error", message),
			ServiceError::Storage { message } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message),
			ServiceError::Internal { message } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
