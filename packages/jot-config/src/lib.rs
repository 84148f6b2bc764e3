mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Auth, Config, Memos, Postgres, Security, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if !matches!(cfg.service.env.as_str(), "local" | "production") {
		return Err(Error::Validation {
			message: "service.env must be one of local or production.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.security.access_code.trim().is_empty() {
		return Err(Error::Validation {
			message: "security.access_code must be non-empty.".to_string(),
		});
	}
	if cfg.security.session_cookie.trim().is_empty() {
		return Err(Error::Validation {
			message: "security.session_cookie must be non-empty.".to_string(),
		});
	}
	if cfg.security.session_ttl_days <= 0 {
		return Err(Error::Validation {
			message: "security.session_ttl_days must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("auth.token_url", &cfg.auth.token_url),
		("auth.userinfo_url", &cfg.auth.userinfo_url),
		("auth.client_id", &cfg.auth.client_id),
		("auth.client_secret", &cfg.auth.client_secret),
		("auth.dev_origin", &cfg.auth.dev_origin),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !cfg.auth.error_path.starts_with('/') {
		return Err(Error::Validation {
			message: "auth.error_path must start with a slash.".to_string(),
		});
	}
	if cfg.memos.page_size == 0 {
		return Err(Error::Validation {
			message: "memos.page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.memos.heatmap_window_days <= 0 {
		return Err(Error::Validation {
			message: "memos.heatmap_window_days must be greater than zero.".to_string(),
		});
	}
	if cfg.memos.on_this_day_years <= 0 {
		return Err(Error::Validation {
			message: "memos.on_this_day_years must be greater than zero.".to_string(),
		});
	}
	if cfg.memos.on_this_day_years > 5 {
		return Err(Error::Validation {
			message: "memos.on_this_day_years must be 5 or less.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.auth.dev_origin.ends_with('/') {
		cfg.auth.dev_origin.pop();
	}
	if cfg.auth.error_path.trim().is_empty() {
		cfg.auth.error_path = "/error".to_string();
	}
}
