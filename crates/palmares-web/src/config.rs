use std::net::SocketAddr;
use std::path::PathBuf;

use palmares_core::AccessSettings;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub tls: TlsConfig,
    /// Bootstrap super admin, created on startup if missing.
    #[serde(default)]
    pub admin: Option<AdminConfig>,
    #[serde(default)]
    pub access: AccessSettings,
    /// Catalog TOML. The built-in catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_ttl_hours")]
    pub jwt_ttl_hours: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_name")]
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_login_rpm")]
    pub login_requests_per_minute: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_ttl_hours: default_jwt_ttl_hours(),
        }
    }
}

fn default_jwt_ttl_hours() -> u64 { 24 }
fn default_login_rpm() -> u32 { 5 }
fn default_admin_name() -> String { "Super Admin".to_string() }

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { login_requests_per_minute: default_login_rpm() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 9090))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::default(),
            tls: TlsConfig::default(),
            admin: None,
            access: AccessSettings::default(),
            catalog_path: None,
        }
    }
}

const WEAK_SECRETS: &[&str] = &[
    "change-me-to-a-random-secret",
    "secret",
    "password",
    "jwt-secret",
];

impl ServerConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config = match std::env::var("PALMARES_CONFIG").map(PathBuf::from) {
            Ok(path) => {
                let contents = std::fs::read_to_string(&path)?;
                Self::parse(&contents)?
            }
            Err(_) => ServerConfig::default(),
        };
        config.with_env_overrides()?.finish()
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn with_env_overrides(mut self) -> anyhow::Result<Self> {
        if let Ok(addr) = std::env::var("PALMARES_BIND_ADDR") {
            self.bind_addr = addr.parse()?;
        }
        if let Ok(secret) = std::env::var("PALMARES_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(path) = std::env::var("PALMARES_CATALOG") {
            self.catalog_path = Some(PathBuf::from(path));
        }
        if let Ok(cert) = std::env::var("PALMARES_TLS_CERT") {
            self.tls.cert_path = Some(cert);
        }
        if let Ok(key) = std::env::var("PALMARES_TLS_KEY") {
            self.tls.key_path = Some(key);
        }
        if let (Ok(email), Ok(hash)) = (
            std::env::var("PALMARES_ADMIN_EMAIL"),
            std::env::var("PALMARES_ADMIN_PASSWORD_HASH"),
        ) {
            self.admin = Some(AdminConfig {
                name: default_admin_name(),
                email,
                password_hash: hash,
                phone: None,
            });
        }
        Ok(self)
    }

    /// Fills in a random JWT secret when none is configured and rejects
    /// known placeholder secrets.
    pub fn finish(mut self) -> anyhow::Result<Self> {
        if self.auth.jwt_secret.is_empty() {
            self.auth.jwt_secret = uuid::Uuid::new_v4().to_string();
            tracing::warn!(
                "No JWT secret configured. Generated random secret (will change on restart)."
            );
        }

        if WEAK_SECRETS.iter().any(|&w| self.auth.jwt_secret == w) {
            anyhow::bail!(
                "JWT secret matches a known weak/placeholder value. \
                 Set a strong random secret via PALMARES_JWT_SECRET environment variable."
            );
        }
        if self.auth.jwt_secret.len() < 32 {
            tracing::warn!(
                "JWT secret is shorter than 32 characters. \
                 Consider using a stronger secret via PALMARES_JWT_SECRET."
            );
        }

        if let Some(admin) = &self.admin {
            if admin.email.trim().is_empty() || admin.password_hash.is_empty() {
                anyhow::bail!("[admin] requires both an email and a password_hash");
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ServerConfig::parse("").unwrap();
        assert_eq!(config.bind_addr, default_bind_addr());
        assert_eq!(config.rate_limit.login_requests_per_minute, 5);
        assert_eq!(config.auth.jwt_ttl_hours, 24);
        assert!(config.admin.is_none());
        assert!(!config.access.blocked);
    }

    #[test]
    fn parses_all_sections() {
        let config = ServerConfig::parse(
            r#"
bind_addr = "127.0.0.1:8080"
catalog_path = "/etc/palmares/catalog.toml"

[auth]
jwt_secret = "0123456789abcdef0123456789abcdef"
jwt_ttl_hours = 2

[admin]
email = "admin@example.ml"
password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"

[access]
blocked = true
deadline = "2026-02-15T00:00:00Z"
message = "Maintenance"
"#,
        )
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.auth.jwt_ttl_hours, 2);
        let admin = config.admin.unwrap();
        assert_eq!(admin.name, "Super Admin");
        assert!(config.access.blocked);
        assert!(config.access.deadline.is_some());
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/palmares/catalog.toml"))
        );
    }

    #[test]
    fn finish_generates_secret() {
        let config = ServerConfig::default().finish().unwrap();
        assert!(!config.auth.jwt_secret.is_empty());
    }

    #[test]
    fn finish_rejects_placeholder_secret() {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        assert!(config.finish().is_err());
    }

    #[test]
    fn finish_rejects_incomplete_admin() {
        let mut config = ServerConfig::default();
        config.admin = Some(AdminConfig {
            name: "Admin".to_string(),
            email: "admin@example.ml".to_string(),
            password_hash: String::new(),
            phone: None,
        });
        assert!(config.finish().is_err());
    }
}
