use std::path::PathBuf;
use std::str::FromStr;

use iconlib_core::upload::DEFAULT_MAX_ICON_BYTES;

use crate::auth::jwt::JwtConfig;

/// Origins allowed by default: the local web and Expo dev servers.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:8081,\
                                    http://192.168.0.105:8081,https://*.expo.dev";

/// Default cap on a whole multipart request body (64 MiB).
const DEFAULT_MAX_REQUEST_BYTES: usize = 64 * 1024 * 1024;

/// Which [`iconlib_db::IconStore`] backend to construct at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL reachable at the given URL.
    Postgres { database_url: String },
    /// Process-local store; contents vanish on exit.
    Memory,
}

/// Size limits enforced while reading multipart uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Maximum size of a single icon file.
    pub max_file_bytes: usize,
    /// Maximum size of the whole request body.
    pub max_request_bytes: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_ICON_BYTES,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret (and the database URL when using the
/// PostgreSQL store) have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// Entries may contain one `*` wildcard.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Storage backend.
    pub store: StoreBackend,
    /// Name of the icons document this deployment manages.
    pub library: String,
    /// Create the icons document at startup if it is missing.
    pub bootstrap_library: bool,
    /// Credential inserted (or updated) at startup, if configured.
    pub seed_credential: Option<(String, String)>,
    /// Directory uploaded icons are written to and served from.
    pub icons_dir: PathBuf,
    /// Scheme used when building public icon URLs.
    pub public_scheme: String,
    /// Upload size limits.
    pub upload: UploadLimits,
    /// Serve the unauthenticated listing at `/public/icon-categories`.
    pub public_showcase: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                         |
    /// |----------------------------|---------------------------------|
    /// | `HOST`                     | `0.0.0.0`                       |
    /// | `PORT`                     | `3000`                          |
    /// | `CORS_ORIGINS`             | local dev servers + `*.expo.dev`|
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                            |
    /// | `ICON_STORE`               | `postgres` (or `memory`)        |
    /// | `DATABASE_URL`             | required for `postgres`         |
    /// | `ICON_LIBRARY`             | `default`                       |
    /// | `ICON_LIBRARY_BOOTSTRAP`   | `false`                         |
    /// | `SEED_USERNAME`            | unset                           |
    /// | `SEED_PASSWORD`            | unset                           |
    /// | `ICONS_DIR`                | `public/icons`                  |
    /// | `PUBLIC_SCHEME`            | `http`                          |
    /// | `UPLOAD_MAX_FILE_BYTES`    | `5242880`                       |
    /// | `UPLOAD_MAX_REQUEST_BYTES` | `67108864`                      |
    /// | `PUBLIC_SHOWCASE`          | `false`                         |
    ///
    /// See [`JwtConfig::from_env`] for the `JWT_*` variables.
    ///
    /// # Panics
    ///
    /// Panics on unparsable values, an unknown `ICON_STORE`, or a missing
    /// `DATABASE_URL` for the PostgreSQL store.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let store = match env_or("ICON_STORE", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .expect("DATABASE_URL must be set when ICON_STORE=postgres"),
            },
            "memory" => StoreBackend::Memory,
            other => panic!("ICON_STORE must be 'postgres' or 'memory', got '{other}'"),
        };

        let seed_credential = match (
            std::env::var("SEED_USERNAME").ok(),
            std::env::var("SEED_PASSWORD").ok(),
        ) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        };

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 3000),
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
            store,
            library: env_or("ICON_LIBRARY", "default"),
            bootstrap_library: parse_env("ICON_LIBRARY_BOOTSTRAP", false),
            seed_credential,
            icons_dir: PathBuf::from(env_or("ICONS_DIR", "public/icons")),
            public_scheme: env_or("PUBLIC_SCHEME", "http"),
            upload: UploadLimits {
                max_file_bytes: parse_env("UPLOAD_MAX_FILE_BYTES", DEFAULT_MAX_ICON_BYTES),
                max_request_bytes: parse_env("UPLOAD_MAX_REQUEST_BYTES", DEFAULT_MAX_REQUEST_BYTES),
            },
            public_showcase: parse_env("PUBLIC_SHOWCASE", false),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
