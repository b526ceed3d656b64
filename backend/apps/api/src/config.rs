//! Server configuration from the environment

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::TOKEN_SECRET_LEN;
use platform::crypto::from_base64;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8087";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Settings for one server process
#[derive(Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Read every setting, failing on the first malformed one
    ///
    /// `TOKEN_SECRET` (base64) is mandatory in release builds; debug builds
    /// fall back to a random per-process secret.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let mut auth = match env::var("TOKEN_SECRET") {
            Ok(secret_b64) => {
                let secret = from_base64(&secret_b64).context("TOKEN_SECRET must be base64")?;
                if secret.len() < TOKEN_SECRET_LEN {
                    bail!(
                        "TOKEN_SECRET must decode to at least {} bytes",
                        TOKEN_SECRET_LEN
                    );
                }
                AuthConfig {
                    token_secret: secret,
                    ..AuthConfig::default()
                }
            }
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("TOKEN_SECRET not set, using a random development secret");
                AuthConfig::development()
            }
            Err(_) => bail!("TOKEN_SECRET must be set in production"),
        };

        if let Some(ttl) = duration_secs("TOKEN_TTL_SECS")? {
            auth.token_ttl = ttl;
        }
        if let Some(ttl) = duration_secs("EMAIL_VERIFICATION_TTL_SECS")? {
            auth.email_verification_ttl = ttl;
        }
        if let Ok(url) = env::var("PUBLIC_BASE_URL") {
            auth.public_base_url = url;
        }

        Ok(Self {
            database_url,
            listen_addr,
            frontend_origins,
            auth,
        })
    }
}

fn duration_secs(key: &str) -> anyhow::Result<Option<Duration>> {
    match env::var(key) {
        Ok(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{key} must be a whole number of seconds"))?;
            if secs == 0 {
                bail!("{key} must be positive");
            }
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}
