//! Download worker and single-file streaming download.

use std::path::Path;

use futures::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::api::cancellable;
use crate::download::task::{DownloadOutcome, DownloadTask};
use crate::download::worker::{next_unit, SharedReceiver, WorkerContext};
use crate::error::{Error, Result};
use crate::fs::ensure_dir;

/// Download one task below `root`.
///
/// An existing destination counts as done and no request is made. The body
/// is streamed chunk by chunk into the file; on failure whatever was written
/// stays on disk.
pub async fn download_file(
    client: &Client,
    task: &DownloadTask,
    root: &Path,
    cancel: &CancellationToken,
) -> Result<DownloadOutcome> {
    let output_path = task.destination(root);

    if output_path.exists() {
        tracing::debug!(path = %output_path.display(), "Skipping existing file");
        return Ok(DownloadOutcome::Skipped);
    }

    if let Some(parent) = output_path.parent() {
        ensure_dir(parent).await?;
    }

    let mut file = File::create(&output_path).await?;

    let written = cancellable(cancel, async {
        let response = client.get(&task.url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::HttpStatus {
                url: task.url.clone(),
                status,
            });
        }

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        Ok(written)
    })
    .await?;

    file.flush().await?;

    Ok(DownloadOutcome::Downloaded(written))
}

/// Drain the task queue until it closes or the run is cancelled.
///
/// Tasks still queued at cancellation are never started.
pub async fn download_worker(id: usize, ctx: WorkerContext, tasks: SharedReceiver<DownloadTask>) {
    tracing::debug!("Download worker {} started", id);

    while let Some(unit) = next_unit(&tasks, &ctx.cancel).await {
        let (task, guard) = unit.into_parts();

        match download_file(ctx.api.client(), &task, &ctx.download_root, &ctx.cancel).await {
            Ok(DownloadOutcome::Downloaded(bytes)) => {
                ctx.stats.file_downloaded(bytes);
                tracing::info!(
                    subreddit = %task.folder,
                    bytes,
                    "Downloaded {} file {} ({:.2} KB)",
                    task.folder,
                    task.filename,
                    bytes as f64 / 1024.0
                );
            }
            Ok(DownloadOutcome::Skipped) => {
                ctx.stats.file_skipped();
            }
            Err(Error::Cancelled) => {
                tracing::debug!(url = %task.url, "Download cancelled");
            }
            Err(e) => {
                ctx.stats.file_failed();
                tracing::warn!(url = %task.url, "Error downloading {}: {}", task.url, e);
            }
        }

        guard.done();
    }

    tracing::debug!("Download worker {} stopped", id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{build_http_client, HttpSettings, USER_AGENT};
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        build_http_client(&HttpSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_download_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/test.jpg"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("test image content"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let task = DownloadTask::new(
            "test.jpg",
            "testfolder",
            format!("{}/test.jpg", server.uri()),
        );
        let cancel = CancellationToken::new();

        let outcome = download_file(&client(), &task, dir.path(), &cancel).await.unwrap();
        assert_eq!(outcome, DownloadOutcome::Downloaded(18));

        let content = std::fs::read(dir.path().join("testfolder").join("test.jpg")).unwrap();
        assert_eq!(content, b"test image content");

        // Second call finds the file and does not hit the server again.
        let outcome = download_file(&client(), &task, dir.path(), &cancel).await.unwrap();
        assert_eq!(outcome, DownloadOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_existing_file_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("pics");
        std::fs::create_dir_all(&folder).unwrap();
        // Zero-byte leftovers count as complete too.
        std::fs::write(folder.join("a.jpg"), b"").unwrap();

        let task = DownloadTask::new("a.jpg", "pics", format!("{}/a.jpg", server.uri()));
        let outcome = download_file(&client(), &task, dir.path(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome, DownloadOutcome::Skipped);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_streams_large_body_byte_exact() {
        let body: Vec<u8> = (0..4 * 1024 * 1024u32).map(|i| (i % 251) as u8).collect();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/big.gif"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let task = DownloadTask::new("big.gif", "aww", format!("{}/big.gif", server.uri()));
        let outcome = download_file(&client(), &task, dir.path(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, DownloadOutcome::Downloaded(body.len() as u64));
        let written = std::fs::read(dir.path().join("aww").join("big.gif")).unwrap();
        assert_eq!(written.len(), body.len());
        assert!(written == body);
    }

    #[tokio::test]
    async fn test_non_200_is_failure_and_leaves_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let task = DownloadTask::new("gone.png", "pics", format!("{}/gone.png", server.uri()));
        let err = download_file(&client(), &task, dir.path(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status, .. } if status == StatusCode::NOT_FOUND));
        let leftover = dir.path().join("pics").join("gone.png");
        assert!(leftover.exists());
        assert_eq!(std::fs::metadata(leftover).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_download() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let task = DownloadTask::new("slow.jpg", "pics", format!("{}/slow.jpg", server.uri()));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let started = std::time::Instant::now();
        let err = download_file(&client(), &task, dir.path(), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
