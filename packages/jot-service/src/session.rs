use serde::{Deserialize, Serialize};

use crate::MemoService;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnlockRequest {
	pub code: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnlockOutcome {
	pub granted: bool,
}

impl MemoService {
	/// Compare a submitted code against the configured access code. The
	/// API layer turns a grant into the session cookie.
	pub fn unlock(&self, req: &UnlockRequest) -> UnlockOutcome {
		let code = req.code.trim();
		let granted = !code.is_empty() && code == self.cfg.security.access_code;

		UnlockOutcome { granted }
	}

	/// A request is privileged when it presents the configured access code,
	/// usually via the session cookie.
	pub fn is_privileged(&self, presented: Option<&str>) -> bool {
		presented.is_some_and(|code| code == self.cfg.security.access_code)
	}
}
