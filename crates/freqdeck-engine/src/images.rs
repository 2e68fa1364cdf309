//! Image generation.
//!
//! Every stored meaning without an image gets one, generated from its example
//! sentence. A fixed number of workers drain a shared queue; worker `i`
//! sends its requests through route `i` of the client (the direct connection
//! or one of the configured proxies).
//!
//! Per item:
//!
//! - transport failures are retried under the configured [`RetryPolicy`]
//!   and counted as failed once the retries are used up
//! - a non-success status is logged and counted as rejected; no file is written
//! - a success is streamed to `{id}.jpg`
//!
//! None of these stop the run. Items without a file are tried again on the
//! next run.
//!
//! [`RetryPolicy`]: crate::RetryPolicy

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use freqdeck::{AssetKind, FetchClient, ImageReply, Meaning};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::retry::RetryPolicy;
use crate::{Engine, Error, Result, exists};

/// Report from an image run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImagesReport {
    /// Images written to disk.
    pub downloaded: usize,
    /// Items the service refused with a non-success status.
    pub rejected: usize,
    /// Items that could not be fetched or saved.
    pub failed: Vec<ImageFailure>,
}

impl ImagesReport {
    fn absorb(&mut self, other: ImagesReport) {
        self.downloaded += other.downloaded;
        self.rejected += other.rejected;
        self.failed.extend(other.failed);
    }
}

/// Details about a failed image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageFailure {
    /// Identity key of the meaning.
    pub id: String,
    /// The error message.
    pub error: String,
}

/// Image workflow engine.
#[derive(Debug)]
pub struct ImagesEngine<'a> {
    engine: &'a Engine,
}

type Queue = Arc<Mutex<VecDeque<(usize, Meaning)>>>;

impl<'a> ImagesEngine<'a> {
    pub(crate) fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    /// Generate missing images for every stored meaning.
    pub async fn fetch(&self) -> Result<ImagesReport> {
        let store = self.engine.meaning_store()?;
        self.fetch_for(store.meanings()).await
    }

    /// Generate missing images for the given meanings.
    pub async fn fetch_for(&self, meanings: &[Meaning]) -> Result<ImagesReport> {
        let image_dir = self.engine.layout().image_dir.clone();
        tokio::fs::create_dir_all(&image_dir).await?;

        let pending = self.pending(meanings).await;
        if pending.is_empty() {
            return Ok(ImagesReport::default());
        }

        let workers = self.engine.options().image_workers.clamp(1, pending.len());
        info!(pending = pending.len(), workers, "generating images");

        let queue: Queue = Arc::new(Mutex::new(pending.into_iter().enumerate().collect()));
        let mut tasks = JoinSet::new();
        for worker in 0..workers {
            tasks.spawn(run_worker(
                worker,
                Arc::clone(&queue),
                self.engine.client().clone(),
                image_dir.clone(),
                self.engine.options().image_retry,
            ));
        }

        let mut report = ImagesReport::default();
        while let Some(joined) = tasks.join_next().await {
            let worker_report = joined.map_err(|e| Error::Worker(e.to_string()))?;
            report.absorb(worker_report);
        }

        Ok(report)
    }

    /// The meanings whose image file does not exist yet.
    pub async fn pending(&self, meanings: &[Meaning]) -> Vec<Meaning> {
        let layout = self.engine.layout();
        let mut pending = Vec::new();
        for meaning in meanings {
            if !exists(&layout.asset_path(&meaning.word, AssetKind::Image)).await {
                pending.push(meaning.clone());
            }
        }
        pending
    }
}

enum Outcome {
    Saved(u64),
    Rejected { status: u16, body: String },
}

async fn run_worker(
    worker: usize,
    queue: Queue,
    client: FetchClient,
    image_dir: PathBuf,
    retry: RetryPolicy,
) -> ImagesReport {
    let mut report = ImagesReport::default();

    loop {
        let next = queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let Some((index, meaning)) = next else {
            break;
        };

        let id = meaning.id();
        let path = image_dir.join(meaning.word.asset(AssetKind::Image));

        match fetch_image(&client, worker, &retry, &meaning.example, &path).await {
            Ok(Outcome::Saved(bytes)) => {
                info!(worker, index, %id, bytes, prompt = %meaning.example, "saved image");
                report.downloaded += 1;
            }
            Ok(Outcome::Rejected { status, body }) => {
                warn!(worker, index, %id, status, body = %body, "image rejected");
                report.rejected += 1;
            }
            Err(e) => {
                warn!(worker, index, %id, error = %e, "image failed");
                report.failed.push(ImageFailure {
                    id,
                    error: e.to_string(),
                });
            }
        }
    }

    report
}

async fn fetch_image(
    client: &FetchClient,
    route: usize,
    retry: &RetryPolicy,
    prompt: &str,
    path: &Path,
) -> freqdeck::Result<Outcome> {
    let reply = retry
        .run(|| async move { client.images().generate(prompt, route).await })
        .await?;

    match reply {
        ImageReply::Image(download) => Ok(Outcome::Saved(download.save_to(path).await?)),
        ImageReply::Rejected { status, body } => Ok(Outcome::Rejected { status, body }),
    }
}
