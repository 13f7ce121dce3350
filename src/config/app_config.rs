use crate::error::InitProcessError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    // 空文字列なら起動時に対話的に選択する
    pub interface: String,
    pub packet_buffer_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_payload: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_env_value(value: &str) -> Result<Self, InitProcessError> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(InitProcessError::EnvVarParseError(format!(
                "OUTPUT_FORMATに不明な値が指定されました: {}",
                other
            ))),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InitProcessError> {
        dotenv::dotenv().ok();

        Ok(Self {
            network: NetworkConfig {
                interface: std::env::var("NETWORK_INTERFACE").unwrap_or_default(),
                packet_buffer_size: std::env::var("PACKET_BUFFER_SIZE")
                    .unwrap_or_else(|_| "65535".to_string())
                    .parse()
                    .map_err(|e| InitProcessError::EnvVarParseError(format!("PACKET_BUFFER_SIZE: {}", e)))?,
            },
            output: OutputConfig {
                format: OutputFormat::from_env_value(
                    &std::env::var("OUTPUT_FORMAT").unwrap_or_else(|_| "text".to_string()),
                )?,
                show_payload: std::env::var("SHOW_PAYLOAD")
                    .map(|value| value != "false")
                    .unwrap_or(true),
            },
        })
    }

    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            network: NetworkConfig {
                interface: "".to_string(),
                packet_buffer_size: 65535,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_payload: true,
            },
        }
    }
}
