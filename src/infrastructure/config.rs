use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://blog.db?mode=rwc";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            seed_demo: env::var("SEED_DEMO").is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = ["DATABASE_URL", "PORT", "CORS_ALLOWED_ORIGINS", "SEED_DEMO"];

    fn clear_env() {
        for var in VARS {
            // SAFETY: tests touching the environment are serialized
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn defaults_without_env() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert!(config.cors_allowed_origins.is_empty());
        assert!(!config.seed_demo);
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        unsafe {
            env::set_var("PORT", "8081");
            env::set_var("DATABASE_URL", "sqlite::memory:");
            env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,");
            env::set_var("SEED_DEMO", "1");
        }
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.port, 8081);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(config.seed_demo);
    }

    #[test]
    #[serial]
    fn invalid_port_falls_back() {
        clear_env();
        unsafe { env::set_var("PORT", "not-a-port") };
        let config = Config::from_env();
        clear_env();
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
