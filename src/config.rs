use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub broker: BrokerConfig,
    pub rtc: RtcConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    /// Base URL of the session broker backend (token issuing + track generation)
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RtcConfig {
    /// Application identifier passed to the media transport on join
    pub app_id: String,
    pub nats_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted track registry and message log
    pub data_dir: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "echo".to_string(),
                http: HttpConfig {
                    bind: "127.0.0.1".to_string(),
                    port: 8090,
                },
            },
            broker: BrokerConfig {
                base_url: "http://localhost:8000".to_string(),
            },
            rtc: RtcConfig {
                app_id: "echo-dev".to_string(),
                nats_url: "nats://localhost:4222".to_string(),
            },
            storage: StorageConfig {
                data_dir: "data".to_string(),
            },
        }
    }
}
