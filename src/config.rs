use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::render::RenderPolicy;

/// Application configuration, fixed for the lifetime of the process.
pub struct Config {
    pub data_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub template_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub policy: RenderPolicy,
}

impl Config {
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            assets_dir: PathBuf::from("assets"),
            template_dir: PathBuf::from("templates"),
            host: "0.0.0.0".to_string(),
            port: 8080,
            policy: RenderPolicy::default(),
        }
    }

    /// Defaults overridden by `WIKI_*` environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::new();
        if let Ok(dir) = env::var("WIKI_DATA_DIR") {
            cfg.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("WIKI_ASSETS_DIR") {
            cfg.assets_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("WIKI_TEMPLATE_DIR") {
            cfg.template_dir = PathBuf::from(dir);
        }
        if let Ok(host) = env::var("WIKI_HOST") {
            cfg.host = host;
        }
        if let Ok(port) = env::var("WIKI_PORT") {
            if let Ok(port) = port.parse() {
                cfg.port = port;
            }
        }
        if let Ok(policy) = env::var("WIKI_RENDER") {
            cfg.policy = RenderPolicy::from_name(&policy);
        }
        cfg
    }

    /// Socket address for binding.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.port)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
