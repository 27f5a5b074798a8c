use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};
use base64::Engine;
use shared_types::{blob_name, validate_image, AppError, ImageUploadRequest, ImageUploadResponse};
use tokio::sync::OnceCell;

/// Read an env var, trying the primary name first then a fallback.
pub fn env_or(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| std::env::var(fallback).ok())
}

fn issue_images_bucket() -> String {
    std::env::var("ISSUE_IMAGES_BUCKET").unwrap_or_else(|_| "issue-images".to_string())
}

/// Build the public URL for an object.
///
/// Tigris uses virtual-hosted style, everything else (MinIO, RustFS) path style.
pub fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.contains("tigris") {
        let host = endpoint
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        format!("https://{}.{}/{}", bucket, host, key)
    } else {
        format!("{}/{}/{}", endpoint, bucket, key)
    }
}

// ── Trait ────────────────────────────────────────────────────────────

/// Write-only blob storage for issue photos.
#[allow(async_fn_in_trait)]
pub trait BlobStore: Send + Sync {
    /// Store `body` under `key` and return the URL browsers can load it from.
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<String, AppError>;
}

// ── S3 implementation ───────────────────────────────────────────────

/// S3-compatible store with a public-read bucket.
pub struct S3BlobStore {
    client: Client,
    endpoint: String,
    bucket: String,
}

impl S3BlobStore {
    /// Build from environment variables.
    ///
    /// Supports both Fly/Tigris (`AWS_*`) and local MinIO (`S3_*`) naming.
    pub fn from_env() -> Result<Self, AppError> {
        let endpoint = env_or("AWS_ENDPOINT_URL_S3", "S3_ENDPOINT")
            .ok_or_else(|| AppError::storage("S3_ENDPOINT is not configured"))?;
        let access_key = env_or("AWS_ACCESS_KEY_ID", "S3_ACCESS_KEY")
            .ok_or_else(|| AppError::storage("S3_ACCESS_KEY is not configured"))?;
        let secret_key = env_or("AWS_SECRET_ACCESS_KEY", "S3_SECRET_KEY")
            .ok_or_else(|| AppError::storage("S3_SECRET_KEY is not configured"))?;
        let region =
            env_or("AWS_REGION", "S3_REGION").unwrap_or_else(|| "us-east-1".to_string());

        let creds = Credentials::new(&access_key, &secret_key, None, None, "env");

        let config = aws_sdk_s3::Config::builder()
            .endpoint_url(&endpoint)
            .region(Region::new(region))
            .credentials_provider(creds)
            .force_path_style(true)
            .behavior_version_latest()
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            endpoint,
            bucket: issue_images_bucket(),
        })
    }

    /// Create the bucket if missing and make its objects publicly readable.
    pub async fn ensure_bucket(&self) {
        let exists = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok();

        if !exists {
            tracing::info!(bucket = %self.bucket, "Creating issue image bucket");
            if let Err(e) = self.client.create_bucket().bucket(&self.bucket).send().await {
                tracing::warn!(bucket = %self.bucket, error = %e, "Failed to create bucket");
                return;
            }
        }

        // Tigris manages public access outside of bucket policies.
        if self.endpoint.contains("tigris") {
            return;
        }
        let policy = format!(
            r#"{{"Version":"2012-10-17","Statement":[{{"Effect":"Allow","Principal":"*","Action":["s3:GetObject"],"Resource":["arn:aws:s3:::{}/*"]}}]}}"#,
            self.bucket
        );
        match self
            .client
            .put_bucket_policy()
            .bucket(&self.bucket)
            .policy(&policy)
            .send()
            .await
        {
            Ok(_) => tracing::info!(bucket = %self.bucket, "Public-read policy applied"),
            Err(e) => tracing::warn!(bucket = %self.bucket, error = %e, "Failed to set bucket policy"),
        }
    }
}

impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<String, AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key, error = %e, "S3 upload failed");
                AppError::storage("Image upload failed. Please try again.")
            })?;

        Ok(public_url(&self.endpoint, &self.bucket, key))
    }
}

static ISSUE_IMAGES: OnceCell<S3BlobStore> = OnceCell::const_new();

/// The process-wide issue image store. Refuses when the storage flag is off.
pub async fn issue_images() -> Result<&'static S3BlobStore, AppError> {
    if !crate::config::feature_flags().storage {
        return Err(AppError::storage("Image uploads are disabled"));
    }
    ISSUE_IMAGES
        .get_or_try_init(|| async {
            let store = S3BlobStore::from_env()?;
            store.ensure_bucket().await;
            Ok(store)
        })
        .await
}

/// Decode, validate and store one issue photo under a time-derived key.
pub async fn store_issue_image<S: BlobStore>(
    store: &S,
    req: &ImageUploadRequest,
    millis: i64,
) -> Result<ImageUploadResponse, AppError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(req.data.trim())
        .map_err(|_| AppError::bad_request("Image data is not valid base64"))?;
    validate_image(&req.content_type, bytes.len())?;

    let key = blob_name(millis, &req.file_name);
    let url = store.put(&key, &req.content_type, bytes).await?;
    tracing::info!(key = %key, "Issue image stored");

    Ok(ImageUploadResponse { key, url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryBlobStore {
        objects: Mutex<Vec<(String, String, usize)>>,
    }

    impl BlobStore for MemoryBlobStore {
        async fn put(
            &self,
            key: &str,
            content_type: &str,
            body: Vec<u8>,
        ) -> Result<String, AppError> {
            self.objects
                .lock()
                .unwrap()
                .push((key.to_string(), content_type.to_string(), body.len()));
            Ok(format!("memory://{}", key))
        }
    }

    fn upload(name: &str, content_type: &str, bytes: &[u8]) -> ImageUploadRequest {
        ImageUploadRequest {
            file_name: name.into(),
            content_type: content_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    #[test]
    fn path_style_url_for_minio() {
        assert_eq!(
            public_url("http://localhost:9000/", "issue-images", "issues/1_a.png"),
            "http://localhost:9000/issue-images/issues/1_a.png"
        );
    }

    #[test]
    fn virtual_hosted_url_for_tigris() {
        assert_eq!(
            public_url("https://fly.storage.tigris.dev", "imgs", "issues/1_a.png"),
            "https://imgs.fly.storage.tigris.dev/issues/1_a.png"
        );
    }

    #[tokio::test]
    async fn stores_under_time_prefixed_key() {
        let store = MemoryBlobStore::default();
        let res = store_issue_image(&store, &upload("pothole.jpg", "image/jpeg", b"jpeg"), 1700000000123)
            .await
            .unwrap();

        assert_eq!(res.key, "issues/1700000000123_pothole.jpg");
        assert_eq!(res.url, "memory://issues/1700000000123_pothole.jpg");
        let objects = store.objects.lock().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].2, 4);
    }

    #[tokio::test]
    async fn rejects_unsupported_type_before_upload() {
        let store = MemoryBlobStore::default();
        let err = store_issue_image(&store, &upload("notes.pdf", "application/pdf", b"%PDF"), 1)
            .await
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_bad_base64() {
        let store = MemoryBlobStore::default();
        let req = ImageUploadRequest {
            file_name: "a.png".into(),
            content_type: "image/png".into(),
            data: "not base64!!".into(),
        };
        let err = store_issue_image(&store, &req, 1).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::BadRequest);
    }
}
