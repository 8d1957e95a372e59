use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

// Service configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct StudymateConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub jwt_secret: String,
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub enabled: bool,
    pub bind_addr: SocketAddr,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StudymateConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    jwt_secret: Option<String>,
    bootstrap_enabled: Option<bool>,
    bootstrap_bind: Option<String>,
    bootstrap_token: Option<String>,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

impl StudymateConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("STUDYMATE_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .with_context(|| "parse STUDYMATE_BIND")?;
        let metrics_bind = std::env::var("STUDYMATE_METRICS_BIND")
            .unwrap_or_else(|_| "0.0.0.0:9090".to_string())
            .parse()
            .with_context(|| "parse STUDYMATE_METRICS_BIND")?;
        // No default: a guessable signing secret would let anyone forge
        // bearer tokens.
        let jwt_secret =
            std::env::var("STUDYMATE_JWT_SECRET").with_context(|| "STUDYMATE_JWT_SECRET is required")?;
        let bootstrap_bind = std::env::var("STUDYMATE_BOOTSTRAP_BIND")
            .unwrap_or_else(|_| "127.0.0.1:8081".to_string())
            .parse()
            .with_context(|| "parse STUDYMATE_BOOTSTRAP_BIND")?;
        let bootstrap = BootstrapConfig {
            enabled: env_flag("STUDYMATE_BOOTSTRAP_ENABLED"),
            bind_addr: bootstrap_bind,
            token: std::env::var("STUDYMATE_BOOTSTRAP_TOKEN").ok(),
        };
        Ok(Self {
            bind_addr,
            metrics_bind,
            jwt_secret,
            bootstrap,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("STUDYMATE_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read STUDYMATE_CONFIG: {path}"))?;
            let override_cfg: StudymateConfigOverride =
                serde_yaml::from_str(&contents).with_context(|| "parse studymate config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.metrics_bind {
                config.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
            }
            if let Some(value) = override_cfg.jwt_secret {
                config.jwt_secret = value;
            }
            if let Some(value) = override_cfg.bootstrap_enabled {
                config.bootstrap.enabled = value;
            }
            if let Some(value) = override_cfg.bootstrap_bind {
                config.bootstrap.bind_addr = value.parse().with_context(|| "parse bootstrap_bind")?;
            }
            if let Some(value) = override_cfg.bootstrap_token {
                config.bootstrap.token = Some(value);
            }
        }
        Ok(config)
    }
}
