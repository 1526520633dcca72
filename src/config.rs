//! 服务配置：编译期默认值 + 可选 TOML 文件；CLI 参数在 main.rs 中覆盖。

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认商品数据源
pub const DEFAULT_SOURCE: &str = "./products.json";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// TOML 配置文件内容，所有键可省略
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// 合并后的最终配置
#[derive(Clone, Debug, PartialEq)]
pub struct ServeConfig {
    pub source: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServeConfig {
    /// 优先级：CLI > 文件 > 默认值
    pub fn resolve(
        file: FileConfig,
        source: Option<PathBuf>,
        host: Option<String>,
        port: Option<u16>,
    ) -> Self {
        let d = Self::default();
        Self {
            source: source.or(file.source).unwrap_or(d.source),
            host: host.or(file.host).unwrap_or(d.host),
            port: port.or(file.port).unwrap_or(d.port),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
