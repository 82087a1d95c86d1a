use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

/// Settings for one run, loaded once from the INI properties file and
/// immutable afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(alias = "Authorization")]
    pub authorization: AuthorizationConfig,
    #[serde(alias = "API")]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthorizationConfig {
    pub jwt_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Config {
    /// Load and strictly deserialize the properties file. A missing file,
    /// a missing `[Authorization]`/`[API]` section or a missing key is an
    /// error; there are no defaults and no partial configs.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Ini))
            .build()
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(config)
    }

    /// Full value for the outgoing `Authorization` header. Operators paste
    /// either the bare JWT or the complete `Bearer ...` value into the
    /// properties file; both forms are accepted.
    pub fn auth_header(&self) -> String {
        let token = self.authorization.jwt_token.trim();
        if token.starts_with("Bearer ") {
            token.to_string()
        } else {
            format!("Bearer {}", token)
        }
    }
}
