use std::{fs, time::Duration};

use anyhow::Context;
use catalog::{PaginationDefaults, DEFAULT_UPSTREAM_LIMIT, DEFAULT_UPSTREAM_URL};
use serde::Deserialize;
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub server_public_url: Option<String>,
    pub upstream_url: String,
    pub upstream_limit: u32,
    pub upstream_timeout_secs: u64,
    pub default_per_page: u64,
    pub max_per_page: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            server_public_url: None,
            upstream_url: DEFAULT_UPSTREAM_URL.into(),
            upstream_limit: DEFAULT_UPSTREAM_LIMIT,
            upstream_timeout_secs: 10,
            default_per_page: catalog::paginate::DEFAULT_PER_PAGE,
            max_per_page: catalog::paginate::MAX_PER_PAGE,
        }
    }
}

impl Settings {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs.max(1))
    }

    pub fn pagination(&self) -> PaginationDefaults {
        let max_per_page = self.max_per_page.max(1);
        PaginationDefaults {
            per_page: self.default_per_page.clamp(1, max_per_page),
            max_per_page,
        }
    }

    /// Absolute listing path used in page links.
    pub fn products_path(&self) -> String {
        match self.server_public_url.as_deref() {
            Some(base) => format!("{}/api/products", base.trim_end_matches('/')),
            None => "/api/products".to_string(),
        }
    }
}

/// Keys accepted in `server.toml`; all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    bind_addr: Option<String>,
    server_public_url: Option<String>,
    upstream_url: Option<String>,
    upstream_limit: Option<u32>,
    upstream_timeout_secs: Option<u64>,
    default_per_page: Option<u64>,
    max_per_page: Option<u64>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let file = match fs::read_to_string(SETTINGS_FILE) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {SETTINGS_FILE}"));
        }
    };
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then the environment.
pub fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: FileSettings =
            toml::from_str(raw).with_context(|| format!("invalid {SETTINGS_FILE}"))?;
        if let Some(v) = file_cfg.bind_addr {
            settings.server_bind = v;
        }
        if let Some(v) = file_cfg.server_public_url {
            settings.server_public_url = Some(v);
        }
        if let Some(v) = file_cfg.upstream_url {
            settings.upstream_url = v;
        }
        if let Some(v) = file_cfg.upstream_limit {
            settings.upstream_limit = v;
        }
        if let Some(v) = file_cfg.upstream_timeout_secs {
            settings.upstream_timeout_secs = v;
        }
        if let Some(v) = file_cfg.default_per_page {
            settings.default_per_page = v;
        }
        if let Some(v) = file_cfg.max_per_page {
            settings.max_per_page = v;
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("SERVER_PUBLIC_URL") {
        settings.server_public_url = Some(v);
    }
    if let Some(v) = env("APP__SERVER_PUBLIC_URL") {
        settings.server_public_url = Some(v);
    }

    if let Some(v) = env("APP__UPSTREAM_URL") {
        settings.upstream_url = v;
    }

    parse_env(&env, "APP__UPSTREAM_LIMIT", &mut settings.upstream_limit);
    parse_env(
        &env,
        "APP__UPSTREAM_TIMEOUT_SECS",
        &mut settings.upstream_timeout_secs,
    );
    parse_env(&env, "APP__DEFAULT_PER_PAGE", &mut settings.default_per_page);
    parse_env(&env, "APP__MAX_PER_PAGE", &mut settings.max_per_page);

    Ok(settings)
}

fn parse_env<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) {
    let Some(raw) = env(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(parsed) => *slot = parsed,
        Err(_) => warn!(%key, value = %raw, "ignoring unparseable setting"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
