use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use tower::util::ServiceExt;

use jot_api::{routes, state::AppState};
use jot_config::{Auth, Config, Memos, Postgres, Security, Service, Storage};
use jot_testkit::TestDatabase;

fn test_config(dsn: String) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			env: "local".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage { postgres: Postgres { dsn, pool_max_conns: 1 } },
		security: Security {
			access_code: "open-sesame".to_string(),
			session_cookie: "jot_session".to_string(),
			session_ttl_days: 7,
		},
		auth: Auth {
			token_url: "http://127.0.0.1:1/token".to_string(),
			userinfo_url: "http://127.0.0.1:1/userinfo".to_string(),
			client_id: "test".to_string(),
			client_secret: "test-secret".to_string(),
			dev_origin: "http://localhost:3000".to_string(),
			error_path: "/error".to_string(),
		},
		memos: Memos::default(),
	}
}

async fn test_env() -> Option<TestDatabase> {
	let Some(base_dsn) = jot_testkit::env_dsn() else {
		eprintln!("Skipping HTTP tests; set JOT_PG_DSN to run this test.");

		return None;
	};

	Some(TestDatabase::new(&base_dsn).await.expect("Failed to create test database."))
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Failed to parse response.")
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn health_ok() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder().uri("/health").body(Body::empty()).expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn app_shell_resolves_unknown_paths_to_home() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let response = app
		.clone()
		.oneshot(
			Request::builder()
				.uri("/app/unknown/foo")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /app.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert_eq!(json["view"], "home");
	assert_eq!(json["server_render"], true);

	let response = app
		.oneshot(
			Request::builder()
				.uri("/app/trash")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /app.");
	let json = json_body(response).await;

	assert_eq!(json["view"], "trash");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn unlock_rejects_the_wrong_code() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/session/unlock")
				.header("content-type", "application/json")
				.body(Body::from(serde_json::json!({ "code": "wrong" }).to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call unlock.");

	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let json = json_body(response).await;

	assert_eq!(json["error_code"], "invalid_access_code");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn unlock_sets_the_session_cookie_and_gates_privilege() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let response = app
		.clone()
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/session/unlock")
				.header("content-type", "application/json")
				.body(Body::from(serde_json::json!({ "code": "open-sesame" }).to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call unlock.");

	assert_eq!(response.status(), StatusCode::OK);

	let set_cookie = response
		.headers()
		.get("set-cookie")
		.and_then(|value| value.to_str().ok())
		.expect("Expected a session cookie.")
		.to_string();

	assert!(set_cookie.starts_with("jot_session=open-sesame"));
	assert!(set_cookie.contains("HttpOnly"));
	assert!(set_cookie.contains("SameSite=Strict"));
	// Local env: no Secure attribute.
	assert!(!set_cookie.contains("Secure"));

	let response = app
		.clone()
		.oneshot(
			Request::builder()
				.uri("/v1/session")
				.header("cookie", "jot_session=open-sesame")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call session.");
	let json = json_body(response).await;

	assert_eq!(json["privileged"], true);

	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/session")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call session.");
	let json = json_body(response).await;

	assert_eq!(json["privileged"], false);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn create_list_and_export_flow() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let payload = serde_json::json!({ "content": "#first hello from the api" });
	let response = app
		.clone()
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/memos")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call create.");

	assert_eq!(response.status(), StatusCode::OK);

	let created = json_body(response).await;

	assert_eq!(created["memo"]["tags"][0], "first");

	let response = app
		.clone()
		.oneshot(
			Request::builder()
				.uri("/v1/memos")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call list.");
	let listed = json_body(response).await;

	assert_eq!(listed["items"].as_array().map(Vec::len), Some(1));

	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/export?format=markdown")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call export.");

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		response.headers().get("content-type").and_then(|value| value.to_str().ok()),
		Some("text/markdown")
	);

	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let body = String::from_utf8(bytes.to_vec()).expect("Export must be UTF-8.");

	assert!(body.contains("hello from the api"));
	assert!(body.starts_with("---\nid: "));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
