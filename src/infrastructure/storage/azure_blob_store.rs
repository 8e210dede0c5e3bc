//! Azure Blob Storage account accessed through the Blob REST API.
//!
//! Requests are authorized with Shared Key (HMAC-SHA256 over the canonical
//! request) or with a SAS token appended to the query string. Works against
//! both the public cloud endpoint and the local emulator, whose endpoint
//! carries the account name in its path.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use bytes::Bytes;
use futures_util::TryStreamExt;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use sha2::Sha256;
use std::time::{Duration, SystemTime};
use tokio_util::io::StreamReader;
use tracing::debug;

use async_trait::async_trait;

use super::connection_string::{StorageConnectionString, StorageCredentials};
use crate::application::ports::{BlobGateway, DownloadedBlob, StorageError};
use crate::domain::value_objects::AccessPolicy;

/// REST API version sent with every request
const AZURE_API_VERSION: &str = "2023-11-03";

/// Unreserved characters plus '/', which Azure expects unencoded in blob paths
const AZURE_BLOB_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

const QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

pub struct AzureBlobStore {
    client: reqwest::Client,
    account: String,
    /// Blob endpoint, no trailing slash
    base_url: String,
    /// Path component of the endpoint ("" for the cloud, "/account" for the emulator)
    endpoint_path: String,
    credentials: StorageCredentials,
}

impl AzureBlobStore {
    pub fn new(
        connection: StorageConnectionString,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let endpoint = reqwest::Url::parse(&connection.blob_endpoint)
            .map_err(|e| StorageError::Internal(format!("invalid blob endpoint: {}", e)))?;
        let endpoint_path = endpoint.path().trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Internal(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            account: connection.account_name,
            base_url: connection.blob_endpoint,
            endpoint_path,
            credentials: connection.credentials,
        })
    }

    /// Encoded path relative to the endpoint: `/container` or `/container/blob`
    fn resource_path(container: &str, blob: Option<&str>) -> String {
        match blob {
            Some(blob) => format!(
                "/{}/{}",
                container,
                utf8_percent_encode(blob, &AZURE_BLOB_ENCODE_SET)
            ),
            None => format!("/{}", container),
        }
    }

    fn request_url(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut pairs: Vec<String> = query
            .iter()
            .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, &QUERY_ENCODE_SET)))
            .collect();
        if let StorageCredentials::SasToken(token) = &self.credentials {
            pairs.push(token.clone());
        }

        let mut url = format!("{}{}", self.base_url, path);
        if !pairs.is_empty() {
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }

    /// `/{account}{endpoint path}{resource path}` followed by sorted `name:value` query lines
    fn canonicalized_resource(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut resource = format!("/{}{}{}", self.account, self.endpoint_path, path);
        let mut sorted = query.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        for (k, v) in sorted {
            resource.push_str(&format!("\n{}:{}", k.to_lowercase(), v));
        }
        resource
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        ms_headers: &[(&str, &str)],
        body: Option<(Bytes, &str)>,
    ) -> Result<Response, StorageError> {
        let url = self.request_url(path, query);
        let date = httpdate::fmt_http_date(SystemTime::now());

        let mut headers: Vec<(String, String)> = vec![
            ("x-ms-date".to_string(), date),
            ("x-ms-version".to_string(), AZURE_API_VERSION.to_string()),
        ];
        headers.extend(
            ms_headers
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_string())),
        );
        headers.sort_by(|a, b| a.0.cmp(&b.0));

        let (content_length, content_type) = body
            .as_ref()
            .map(|(data, ct)| (data.len(), *ct))
            .unwrap_or((0, ""));

        let mut req = self.client.request(method.clone(), &url);
        for (k, v) in &headers {
            req = req.header(k.as_str(), v.as_str());
        }

        if let StorageCredentials::SharedKey { key } = &self.credentials {
            let string_to_sign = string_to_sign(
                &method,
                content_length,
                content_type,
                &headers,
                &self.canonicalized_resource(path, query),
            );
            req = req.header(AUTHORIZATION, sign(key, &self.account, &string_to_sign)?);
        }

        req = match body {
            Some((data, ct)) => req
                .header(CONTENT_TYPE, ct)
                .header(CONTENT_LENGTH, content_length)
                .body(data),
            None if method == Method::PUT => req.header(CONTENT_LENGTH, 0),
            None => req,
        };

        debug!(%method, path, "Azure request");
        req.send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))
    }

    /// Pass successful responses through, turn the rest into `StorageError::Response`
    async fn check(resp: Response) -> Result<Response, StorageError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let error_code = resp
            .headers()
            .get("x-ms-error-code")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.text().await.unwrap_or_default();
        let description = parse_error_message(&body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| status.as_str().to_string());

        debug!(
            status = status.as_u16(),
            error_code = error_code.as_deref().unwrap_or("-"),
            %description,
            "Azure request rejected"
        );
        Err(StorageError::response(status.as_u16(), description))
    }

    /// HEAD probe: 2xx is true, 404 is false
    async fn exists(&self, path: &str, query: &[(&str, &str)]) -> Result<bool, StorageError> {
        let resp = self.send(Method::HEAD, path, query, &[], None).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::check(resp).await.map(|_| true)
    }

    async fn list_page(
        &self,
        container: &str,
        marker: Option<&str>,
    ) -> Result<EnumerationResults, StorageError> {
        let mut query = vec![("comp", "list"), ("restype", "container")];
        if let Some(marker) = marker {
            query.push(("marker", marker));
        }

        let path = Self::resource_path(container, None);
        let resp = self.send(Method::GET, &path, &query, &[], None).await?;
        let body = Self::check(resp)
            .await?
            .text()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        parse_blob_list(&body)
    }
}

#[async_trait]
impl BlobGateway for AzureBlobStore {
    async fn container_exists(&self, container: &str) -> Result<bool, StorageError> {
        self.exists(
            &Self::resource_path(container, None),
            &[("restype", "container")],
        )
        .await
    }

    async fn create_container(
        &self,
        container: &str,
        policy: AccessPolicy,
    ) -> Result<(), StorageError> {
        let headers: &[(&str, &str)] = match policy {
            AccessPolicy::Public => &[("x-ms-blob-public-access", "blob")],
            AccessPolicy::Private => &[],
        };
        let resp = self
            .send(
                Method::PUT,
                &Self::resource_path(container, None),
                &[("restype", "container")],
                headers,
                None,
            )
            .await?;
        // A concurrent upload may have created it first
        let error_code = resp
            .headers()
            .get("x-ms-error-code")
            .and_then(|v| v.to_str().ok());
        if container_already_exists(resp.status(), error_code) {
            debug!(container, "Container already exists");
            return Ok(());
        }
        Self::check(resp).await.map(|_| ())
    }

    async fn blob_exists(&self, container: &str, blob: &str) -> Result<bool, StorageError> {
        self.exists(&Self::resource_path(container, Some(blob)), &[])
            .await
    }

    async fn upload_blob(
        &self,
        container: &str,
        blob: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), StorageError> {
        let content_type = if content_type.is_empty() {
            DEFAULT_CONTENT_TYPE
        } else {
            content_type
        };
        let resp = self
            .send(
                Method::PUT,
                &Self::resource_path(container, Some(blob)),
                &[],
                &[("x-ms-blob-type", "BlockBlob")],
                Some((data, content_type)),
            )
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    async fn download_blob(
        &self,
        container: &str,
        blob: &str,
    ) -> Result<DownloadedBlob, StorageError> {
        let resp = self
            .send(
                Method::GET,
                &Self::resource_path(container, Some(blob)),
                &[],
                &[],
                None,
            )
            .await?;
        let resp = Self::check(resp).await?;

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let content_length = resp.content_length();
        let stream = resp.bytes_stream().map_err(std::io::Error::other);

        Ok(DownloadedBlob {
            content_type,
            content_length,
            reader: Box::pin(StreamReader::new(stream)),
        })
    }

    async fn delete_blob(&self, container: &str, blob: &str) -> Result<(), StorageError> {
        let resp = self
            .send(
                Method::DELETE,
                &Self::resource_path(container, Some(blob)),
                &[],
                &[],
                None,
            )
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check(resp).await.map(|_| ())
    }

    async fn list_blobs(&self, container: &str) -> Result<Vec<String>, StorageError> {
        let mut names = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut page = self.list_page(container, marker.as_deref()).await?;
            let next_marker = page.next_marker.take().filter(|m| !m.is_empty());
            names.extend(page.block_blob_names());

            match next_marker {
                Some(next) => marker = Some(next),
                None => break,
            }
        }

        Ok(names)
    }

    fn blob_url(&self, container: &str, blob: &str) -> String {
        format!(
            "{}{}",
            self.base_url,
            Self::resource_path(container, Some(blob))
        )
    }
}

/// Only `ContainerAlreadyExists`; other conflicts such as `ContainerBeingDeleted` stay errors
fn container_already_exists(status: StatusCode, error_code: Option<&str>) -> bool {
    status == StatusCode::CONFLICT && error_code == Some("ContainerAlreadyExists")
}

/// Shared Key string-to-sign. `headers` must hold only sorted, lowercased x-ms-* pairs.
fn string_to_sign(
    method: &Method,
    content_length: usize,
    content_type: &str,
    headers: &[(String, String)],
    canonicalized_resource: &str,
) -> String {
    // Content-Length is signed as the empty string when zero
    let content_length = match content_length {
        0 => String::new(),
        len => len.to_string(),
    };
    let canonicalized_headers = headers
        .iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\n\n{}\n\n{}\n\n\n\n\n\n\n{}\n{}",
        method.as_str(),
        content_length,
        content_type,
        canonicalized_headers,
        canonicalized_resource
    )
}

fn sign(key: &[u8], account: &str, string_to_sign: &str) -> Result<String, StorageError> {
    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| StorageError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(string_to_sign.as_bytes());
    let signature = BASE64_STANDARD.encode(mac.finalize().into_bytes());
    Ok(format!("SharedKey {}:{}", account, signature))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EnumerationResults {
    #[serde(default)]
    blobs: BlobList,
    #[serde(default)]
    next_marker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BlobList {
    #[serde(rename = "Blob", default)]
    blob: Vec<BlobItem>,
}

#[derive(Debug, Deserialize)]
struct BlobItem {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Properties", default)]
    properties: BlobProperties,
}

#[derive(Debug, Default, Deserialize)]
struct BlobProperties {
    #[serde(rename = "BlobType", default)]
    blob_type: Option<String>,
}

impl EnumerationResults {
    /// Page and append blobs are not files of this API
    fn block_blob_names(self) -> impl Iterator<Item = String> {
        self.blobs
            .blob
            .into_iter()
            .filter(|b| b.properties.blob_type.as_deref() == Some("BlockBlob"))
            .map(|b| b.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorBody {
    message: Option<String>,
}

fn parse_blob_list(xml: &str) -> Result<EnumerationResults, StorageError> {
    quick_xml::de::from_str(xml)
        .map_err(|e| StorageError::Internal(format!("invalid List Blobs response: {}", e)))
}

/// First line of `<Error><Message>`; the rest is a request id and timestamp
fn parse_error_message(xml: &str) -> Option<String> {
    let body: ErrorBody = quick_xml::de::from_str(xml).ok()?;
    body.message
        .as_deref()
        .and_then(|m| m.lines().next())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
