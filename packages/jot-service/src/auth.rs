use serde::{Deserialize, Serialize};

use crate::{Error, MemoService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallbackRequest {
	pub code: String,
	#[serde(default)]
	pub next: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallbackOutcome {
	/// Sanitized target path to redirect to after a successful exchange.
	pub next: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
	access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
	#[serde(default)]
	roles: Vec<String>,
}

impl MemoService {
	/// Authorization-code exchange. Only accounts carrying the admin role
	/// claim get through; everything else is an error for the caller to
	/// turn into an error-page redirect.
	pub async fn auth_callback(&self, req: CallbackRequest) -> Result<CallbackOutcome> {
		let code = req.code.trim();

		if code.is_empty() {
			return Err(Error::InvalidRequest { message: "code must be non-empty.".to_string() });
		}

		let token: TokenResponse = self
			.http
			.post(&self.cfg.auth.token_url)
			.form(&[
				("grant_type", "authorization_code"),
				("code", code),
				("client_id", self.cfg.auth.client_id.as_str()),
				("client_secret", self.cfg.auth.client_secret.as_str()),
			])
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;
		let user: UserInfo = self
			.http
			.get(&self.cfg.auth.userinfo_url)
			.bearer_auth(&token.access_token)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		if !user.roles.iter().any(|role| role == "admin") {
			return Err(Error::Denied {
				message: "Account is missing the admin role.".to_string(),
			});
		}

		Ok(CallbackOutcome { next: sanitize_next(req.next.as_deref()) })
	}
}

/// Only same-origin absolute paths survive; anything else falls back to the
/// root so the callback cannot be used as an open redirect.
fn sanitize_next(next: Option<&str>) -> String {
	match next {
		Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
		_ => "/".to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn next_path_must_be_a_local_absolute_path() {
		assert_eq!(sanitize_next(Some("/tags/rust")), "/tags/rust");
		assert_eq!(sanitize_next(Some("https://evil.example")), "/");
		assert_eq!(sanitize_next(Some("//evil.example")), "/");
		assert_eq!(sanitize_next(Some("relative")), "/");
		assert_eq!(sanitize_next(None), "/");
	}
}
