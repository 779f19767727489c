//! Backing-store configuration.
//!
//! The AWS SDK configuration is built once, explicitly, and handed to the
//! DynamoDB client. Values from `config.json` take precedence; anything it
//! leaves out falls back to the standard AWS chain (`AWS_REGION`,
//! `AWS_ENDPOINT_URL`, `AWS_PROFILE`, ...), which `.env` can populate.

use std::io::ErrorKind;
use std::path::Path;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_dynamodb::config::Credentials;
use serde::Deserialize;

use crate::error::ConfigError;

/// Location of the credentials file, relative to the working directory.
pub const CONFIG_PATH: &str = "config.json";

/// Contents of `config.json`.
///
/// ```json
/// {
///   "accessKeyId": "AKIA...",
///   "secretAccessKey": "...",
///   "region": "eu-west-1"
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub region: Option<String>,
    /// Custom endpoint, e.g. `http://localhost:8000` for DynamoDB Local.
    pub endpoint: Option<String>,
}

impl StoreConfig {
    /// Reads `path`. A missing file yields `Ok(None)`.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Static credentials, when both key parts are present.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Some(Credentials::new(
                access_key_id,
                secret_access_key,
                self.session_token.clone(),
                None,
                "config-file",
            )),
            _ => None,
        }
    }

    /// Builds the SDK configuration, layering these values over the default chain.
    pub async fn load_sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(credentials) = self.credentials() {
            loader = loader.credentials_provider(credentials);
        }
        if let Some(endpoint) = &self.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        loader.load().await
    }
}

/// Human-readable description of where requests will go.
pub fn describe_target(sdk_config: &SdkConfig) -> String {
    match sdk_config.endpoint_url() {
        Some(url) => format!("DynamoDB at {url}"),
        None => format!(
            "AWS DynamoDB (region: {})",
            sdk_config
                .region()
                .map(|region| region.to_string())
                .unwrap_or_else(|| "unset".to_string())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_camel_case_keys() {
        let config: StoreConfig = serde_json::from_str(
            r#"{"accessKeyId": "AKID", "secretAccessKey": "SECRET", "region": "eu-west-1"}"#,
        )
        .unwrap();

        assert_eq!(config.access_key_id.as_deref(), Some("AKID"));
        assert_eq!(config.secret_access_key.as_deref(), Some("SECRET"));
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.endpoint, None);
    }

    #[test]
    fn credentials_need_both_key_parts() {
        let partial = StoreConfig {
            access_key_id: Some("AKID".to_string()),
            ..Default::default()
        };
        assert!(partial.credentials().is_none());

        let full = StoreConfig {
            access_key_id: Some("AKID".to_string()),
            secret_access_key: Some("SECRET".to_string()),
            session_token: Some("TOKEN".to_string()),
            ..Default::default()
        };
        let credentials = full.credentials().expect("credentials");
        assert_eq!(credentials.access_key_id(), "AKID");
        assert_eq!(credentials.secret_access_key(), "SECRET");
        assert_eq!(credentials.session_token(), Some("TOKEN"));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("apim-dynamodb-setup-does-not-exist.json");
        assert!(matches!(StoreConfig::from_file(&path), Ok(None)));
    }

    #[test]
    fn reads_config_file() {
        let path = temp_file(
            "config-ok.json",
            r#"{"region": "us-east-1", "endpoint": "http://localhost:8000"}"#,
        );
        let config = StoreConfig::from_file(&path).unwrap().expect("config");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8000"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_file("config-bad.json", "{ not json");
        let result = StoreConfig::from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[tokio::test]
    async fn sdk_config_uses_file_values() {
        let config = StoreConfig {
            access_key_id: Some("AKID".to_string()),
            secret_access_key: Some("SECRET".to_string()),
            region: Some("eu-west-3".to_string()),
            endpoint: Some("http://localhost:8000".to_string()),
            ..Default::default()
        };
        let sdk_config = config.load_sdk_config().await;

        assert_eq!(
            sdk_config.region().map(|r| r.to_string()),
            Some("eu-west-3".to_string())
        );
        assert_eq!(sdk_config.endpoint_url(), Some("http://localhost:8000"));
        assert_eq!(describe_target(&sdk_config), "DynamoDB at http://localhost:8000");
    }
}
