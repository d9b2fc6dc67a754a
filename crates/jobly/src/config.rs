//! Database configuration from the environment.

use crate::error::{JoblyError, JoblyResult};

/// Default maximum number of pooled connections.
pub const DEFAULT_MAX_POOL_SIZE: usize = 16;

/// Connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Postgres connection URL.
    pub database_url: String,
    /// Maximum pool size.
    pub max_pool_size: usize,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        }
    }

    /// Set maximum pool size.
    pub fn max_pool_size(mut self, size: usize) -> Self {
        self.max_pool_size = size;
        self
    }

    /// Load from `DATABASE_URL` and `DATABASE_MAX_POOL_SIZE`, reading a `.env`
    /// file first if one exists.
    pub fn from_env() -> JoblyResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> JoblyResult<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| JoblyError::Config("DATABASE_URL must be set".to_string()))?;

        let max_pool_size = match lookup("DATABASE_MAX_POOL_SIZE") {
            Some(raw) => raw.trim().parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                JoblyError::Config(format!(
                    "DATABASE_MAX_POOL_SIZE must be a positive integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_MAX_POOL_SIZE,
        };

        Ok(Self {
            database_url,
            max_pool_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn requires_database_url() {
        let err = DbConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, JoblyError::Config(_)));

        let err = DbConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, JoblyError::Config(_)));
    }

    #[test]
    fn pool_size_defaults() {
        let cfg =
            DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/jobly")]))
                .unwrap();
        assert_eq!(cfg, DbConfig::new("postgres://localhost/jobly"));
        assert_eq!(cfg.max_pool_size, DEFAULT_MAX_POOL_SIZE);
    }

    #[test]
    fn pool_size_is_parsed() {
        let cfg = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/jobly"),
            ("DATABASE_MAX_POOL_SIZE", "4"),
        ]))
        .unwrap();
        assert_eq!(cfg.max_pool_size, 4);

        for bad in ["0", "many", "-1"] {
            let err = DbConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://localhost/jobly"),
                ("DATABASE_MAX_POOL_SIZE", bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, JoblyError::Config(_)));
        }
    }
}
