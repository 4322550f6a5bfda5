//! S3-compatible object store built on the AWS SDK.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;

use posts_etl_core::domain::Destination;
use posts_etl_core::ports::{ObjectStore, StorageError};

/// Object storage session configuration.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Application identifier attached to SDK requests.
    pub app_name: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO, regional hosts).
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Use path-style URLs instead of virtual-hosted-style.
    pub path_style: bool,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            app_name: "posts-etl".to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            path_style: false,
        }
    }
}

impl S3Config {
    /// Endpoint with a scheme; bare hosts are assumed to be HTTPS.
    pub fn endpoint_url(&self) -> Option<String> {
        let endpoint = self.endpoint.as_deref()?.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            None
        } else if endpoint.contains("://") {
            Some(endpoint.to_string())
        } else {
            Some(format!("https://{endpoint}"))
        }
    }
}

/// S3-backed store.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Build a client from explicit configuration.
    ///
    /// Without explicit keys the default AWS credential chain applies.
    pub async fn new(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        match aws_config::AppName::new(config.app_name.clone()) {
            Ok(app_name) => loader = loader.app_name(app_name),
            Err(e) => {
                tracing::warn!(app_name = %config.app_name, error = %e, "Ignoring invalid app name")
            }
        }

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let credentials = Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "posts_etl_config",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = config.endpoint_url() {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.path_style)
            .build();

        tracing::info!(
            region = %config.region,
            endpoint = ?config.endpoint_url(),
            path_style = config.path_style,
            "S3 object store configured"
        );

        Self {
            client: Client::from_conf(s3_config),
        }
    }

    fn location(destination: &Destination) -> Result<(&str, &str), StorageError> {
        match destination {
            Destination::Object { bucket, key } => Ok((bucket.as_str(), key.as_str())),
            other => Err(StorageError::Unsupported(format!(
                "{other} is not an object URI"
            ))),
        }
    }
}

fn classify<E, R>(destination: &Destination, err: SdkError<E, R>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let detail = format!("{destination}: {}", DisplayErrorContext(&err));
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            StorageError::Connection(detail)
        }
        SdkError::ServiceError(service) => match service.err().code() {
            Some("AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch") => {
                StorageError::PermissionDenied(detail)
            }
            Some("NoSuchBucket" | "NoSuchKey") => StorageError::NotFound(detail),
            _ => StorageError::Backend(detail),
        },
        _ => StorageError::Backend(detail),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        destination: &Destination,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let (bucket, key) = Self::location(destination)?;
        let bytes = payload.len();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|e| classify(destination, e))?;

        tracing::debug!(bucket = %bucket, key = %key, bytes, "Uploaded object");
        Ok(())
    }

    async fn get(&self, destination: &Destination) -> Result<Option<Vec<u8>>, StorageError> {
        let (bucket, key) = Self::location(destination)?;

        let response = match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(response) => response,
            Err(SdkError::ServiceError(service)) if service.err().is_no_such_key() => {
                return Ok(None);
            }
            Err(e) => return Err(classify(destination, e)),
        };

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Connection(format!("{destination}: {e}")))?;
        Ok(Some(body.into_bytes().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const NO_SUCH_KEY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message></Error>"#;

    async fn store_at(endpoint: String) -> S3ObjectStore {
        S3ObjectStore::new(&S3Config {
            access_key_id: Some("test-access".to_string()),
            secret_access_key: Some("test-secret".to_string()),
            endpoint: Some(endpoint),
            path_style: true,
            ..S3Config::default()
        })
        .await
    }

    fn object(key: &str) -> Destination {
        Destination::Object {
            bucket: "bucket".to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn test_endpoint_url_normalization() {
        let mut config = S3Config {
            endpoint: Some("s3.ap-southeast-2.amazonaws.com/".to_string()),
            ..S3Config::default()
        };
        assert_eq!(
            config.endpoint_url().as_deref(),
            Some("https://s3.ap-southeast-2.amazonaws.com")
        );

        config.endpoint = Some("http://localhost:9000".to_string());
        assert_eq!(config.endpoint_url().as_deref(), Some("http://localhost:9000"));

        config.endpoint = Some("  ".to_string());
        assert_eq!(config.endpoint_url(), None);
    }

    #[tokio::test]
    async fn test_put_uploads_payload_to_bucket_path() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/bucket/out.json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;
        let store = store_at(mock_server.uri()).await;

        store
            .put(&object("out.json"), b"{\"a\":1}\n".to_vec(), "application/x-ndjson")
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let puts: Vec<_> = requests
            .iter()
            .filter(|r| r.method.as_str() == "PUT")
            .collect();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].url.path(), "/bucket/out.json");
        assert_eq!(puts[0].body, b"{\"a\":1}\n".to_vec());
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bucket/missing.json"))
            .respond_with(
                ResponseTemplate::new(404).set_body_raw(NO_SUCH_KEY, "application/xml"),
            )
            .mount(&mock_server)
            .await;
        let store = store_at(mock_server.uri()).await;

        let result = store.get(&object("missing.json")).await;

        assert_eq!(result.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_reads_object_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bucket/out.json"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"[]".to_vec()))
            .mount(&mock_server)
            .await;
        let store = store_at(mock_server.uri()).await;

        let result = store.get(&object("out.json")).await;

        assert_eq!(result.unwrap(), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn test_local_destination_is_unsupported() {
        let store = store_at("http://127.0.0.1:1".to_string()).await;

        let dest = Destination::Local("out.json".into());
        let err = store.put(&dest, Vec::new(), "").await.unwrap_err();
        assert_eq!(err.category(), "unsupported_destination");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let store = store_at("http://127.0.0.1:1".to_string()).await;

        let err = store
            .put(&object("out.json"), b"[]".to_vec(), "application/json")
            .await
            .unwrap_err();
        assert_eq!(err.category(), "connection");
    }
}
