//! Parsing of Azure storage connection strings.
//!
//! Format: `Key=Value` pairs separated by `;`. Values may themselves contain
//! `=` (account keys are base64), so each pair is split on the first `=` only.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use thiserror::Error;

const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionStringError {
    #[error("malformed connection string segment '{0}'")]
    MalformedSegment(String),

    #[error("connection string is missing {0}")]
    Missing(&'static str),

    #[error("AccountKey is not valid base64")]
    InvalidAccountKey,
}

/// How requests to the account are authorized
#[derive(Clone, PartialEq, Eq)]
pub enum StorageCredentials {
    SharedKey { key: Vec<u8> },
    /// Query string appended to every request, without the leading `?`
    SasToken(String),
}

impl std::fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SharedKey { .. } => f.write_str("SharedKey(..)"),
            Self::SasToken(_) => f.write_str("SasToken(..)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConnectionString {
    pub account_name: String,
    /// Blob service endpoint, no trailing slash
    pub blob_endpoint: String,
    pub credentials: StorageCredentials,
}

impl StorageConnectionString {
    pub fn parse(raw: &str) -> Result<Self, ConnectionStringError> {
        let mut protocol = "https".to_string();
        let mut account_name = None;
        let mut account_key = None;
        let mut endpoint_suffix = "core.windows.net".to_string();
        let mut blob_endpoint = None;
        let mut sas = None;
        let mut development = false;

        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| ConnectionStringError::MalformedSegment(segment.to_string()))?;
            let value = value.trim().to_string();
            match key.trim() {
                "DefaultEndpointsProtocol" => protocol = value,
                "AccountName" => account_name = Some(value),
                "AccountKey" => account_key = Some(value),
                "EndpointSuffix" => endpoint_suffix = value,
                "BlobEndpoint" => blob_endpoint = Some(value),
                "SharedAccessSignature" => sas = Some(value),
                "UseDevelopmentStorage" => development = value.eq_ignore_ascii_case("true"),
                // Queue, table and file endpoints are irrelevant here
                _ => {}
            }
        }

        if development {
            account_name.get_or_insert_with(|| DEV_ACCOUNT_NAME.to_string());
            account_key.get_or_insert_with(|| DEV_ACCOUNT_KEY.to_string());
            blob_endpoint.get_or_insert_with(|| DEV_BLOB_ENDPOINT.to_string());
        }

        let account_name = match (account_name, &blob_endpoint) {
            (Some(name), _) => name,
            (None, Some(endpoint)) => account_from_endpoint(endpoint)
                .ok_or(ConnectionStringError::Missing("AccountName"))?,
            (None, None) => return Err(ConnectionStringError::Missing("AccountName")),
        };

        let credentials = match (account_key, sas) {
            (Some(key), _) => StorageCredentials::SharedKey {
                key: BASE64_STANDARD
                    .decode(key)
                    .map_err(|_| ConnectionStringError::InvalidAccountKey)?,
            },
            (None, Some(token)) => {
                StorageCredentials::SasToken(token.trim_start_matches('?').to_string())
            }
            (None, None) => {
                return Err(ConnectionStringError::Missing(
                    "AccountKey or SharedAccessSignature",
                ))
            }
        };

        let blob_endpoint = blob_endpoint
            .unwrap_or_else(|| format!("{}://{}.blob.{}", protocol, account_name, endpoint_suffix))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            account_name,
            blob_endpoint,
            credentials,
        })
    }
}

/// `https://acct.blob.core.windows.net` -> `acct`
fn account_from_endpoint(endpoint: &str) -> Option<String> {
    let host = endpoint.split("://").nth(1)?.split('/').next()?;
    let account = host.split('.').next()?;
    (!account.is_empty() && host.contains(".blob.")).then(|| account.to_string())
}

impl std::str::FromStr for StorageConnectionString {
    type Err = ConnectionStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_key_string() {
        let parsed = StorageConnectionString::parse(
            "DefaultEndpointsProtocol=https;AccountName=photos;AccountKey=a2V5a2V5;EndpointSuffix=core.windows.net",
        )
        .unwrap();

        assert_eq!(parsed.account_name, "photos");
        assert_eq!(parsed.blob_endpoint, "https://photos.blob.core.windows.net");
        assert_eq!(
            parsed.credentials,
            StorageCredentials::SharedKey {
                key: b"keykey".to_vec()
            }
        );
    }

    #[test]
    fn test_parse_development_storage() {
        let parsed = StorageConnectionString::parse("UseDevelopmentStorage=true").unwrap();

        assert_eq!(parsed.account_name, "devstoreaccount1");
        assert_eq!(parsed.blob_endpoint, "http://127.0.0.1:10000/devstoreaccount1");
        assert!(matches!(
            parsed.credentials,
            StorageCredentials::SharedKey { .. }
        ));
    }

    #[test]
    fn test_parse_sas_with_blob_endpoint() {
        let parsed = StorageConnectionString::parse(
            "BlobEndpoint=https://media.blob.core.windows.net/;SharedAccessSignature=?sv=2023-11-03&sig=abc%3D",
        )
        .unwrap();

        assert_eq!(parsed.account_name, "media");
        assert_eq!(parsed.blob_endpoint, "https://media.blob.core.windows.net");
        assert_eq!(
            parsed.credentials,
            StorageCredentials::SasToken("sv=2023-11-03&sig=abc%3D".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            StorageConnectionString::parse("AccountName=x;garbage"),
            Err(ConnectionStringError::MalformedSegment("garbage".to_string()))
        );
        assert_eq!(
            StorageConnectionString::parse("AccountKey=a2V5"),
            Err(ConnectionStringError::Missing("AccountName"))
        );
        assert_eq!(
            StorageConnectionString::parse("AccountName=x"),
            Err(ConnectionStringError::Missing(
                "AccountKey or SharedAccessSignature"
            ))
        );
        assert_eq!(
            StorageConnectionString::parse("AccountName=x;AccountKey=not base64!"),
            Err(ConnectionStringError::InvalidAccountKey)
        );
    }
}
