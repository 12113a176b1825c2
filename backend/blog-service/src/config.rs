/// Configuration management for Blog Service
///
/// All settings come from environment variables (an optional `.env` file is
/// loaded by the binary before this runs).
use std::fmt;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_DATABASE: &str = "blogeng_bd";
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Document store configuration
    pub database: DatabaseConfig,
    /// Session token configuration
    pub session: SessionConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application environment (development, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Worker count; actix picks one per core when unset
    pub workers: Option<usize>,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// The single browser origin allowed to make credentialed requests
    pub allowed_origin: String,
}

/// Document store configuration
#[derive(Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub uri: String,
    /// Database holding the blogs, comments and wishlist collections
    pub name: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// Session token configuration
#[derive(Clone)]
pub struct SessionConfig {
    /// HS256 signing secret
    pub secret: String,
    /// Whether the session cookie is marked `Secure` and `SameSite=None`
    pub cross_site: bool,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"[REDACTED]")
            .field("cross_site", &self.cross_site)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let app = AppConfig {
            env: app_env,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or_default(&lookup, "PORT", DEFAULT_PORT)?,
            workers: match lookup("HTTP_WORKERS") {
                Some(raw) => Some(
                    raw.parse()
                        .map_err(|e| format!("Failed to parse HTTP_WORKERS='{}': {}", raw, e))?,
                ),
                None => None,
            },
        };

        let cors = {
            let allowed_origin =
                lookup("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
            if allowed_origin.trim() == "*" {
                return Err(
                    "CORS_ALLOWED_ORIGIN cannot be '*' when credentials are allowed".to_string(),
                );
            }
            CorsConfig {
                allowed_origin: allowed_origin.trim().to_string(),
            }
        };

        let database = DatabaseConfig {
            uri: match lookup("MONGODB_URI") {
                Some(uri) => uri,
                None => match (lookup("DB_USER"), lookup("DB_ACCESS")) {
                    (Some(user), Some(password)) => cluster_uri(&user, &password),
                    _ => {
                        return Err(
                            "MONGODB_URI or DB_USER/DB_ACCESS must be set".to_string()
                        )
                    }
                },
            },
            name: lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        };

        let session = {
            let secret = lookup("ACCESS_TOKEN_SECRET")
                .filter(|s| !s.is_empty())
                .ok_or_else(|| "ACCESS_TOKEN_SECRET must be set".to_string())?;
            if app.is_production() && secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(format!(
                    "ACCESS_TOKEN_SECRET must be at least {} bytes in production",
                    MIN_PRODUCTION_SECRET_LEN
                ));
            }
            SessionConfig {
                secret,
                cross_site: app.is_production(),
            }
        };

        Ok(Config {
            app,
            cors,
            database,
            session,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn cluster_uri(user: &str, password: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@cluster0.bfqzn.mongodb.net/?retryWrites=true&w=majority&appName=Cluster0",
        user, password
    )
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        None => Ok(default),
    }
}
