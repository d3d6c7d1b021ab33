use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::log_debug;
use crate::logic::errors::PickerError;
use crate::logic::listing::list_directory;
use crate::model::session::{ListingJob, NavTarget};
use crate::model::types::DirectoryEntry;
use crate::storage::DirectorySource;

/// Result of one background listing
#[derive(Debug)]
pub struct ListingResponse {
    /// Request generation; stale responses carry an older number
    pub generation: u64,
    pub target: NavTarget,
    pub entries: Result<Vec<DirectoryEntry>, PickerError>,
}

/// Background directory reader with at most one request in flight.
///
/// Reads run on tokio's blocking pool. A new request aborts the pending
/// one and bumps the generation, so a result that still slips through is
/// recognised as stale by `is_current`.
pub struct ListingWorker {
    source: Arc<dyn DirectorySource>,
    response_tx: mpsc::UnboundedSender<ListingResponse>,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl ListingWorker {
    pub fn new(
        source: Arc<dyn DirectorySource>,
    ) -> (Self, mpsc::UnboundedReceiver<ListingResponse>) {
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let worker = Self {
            source,
            response_tx,
            pending: None,
            generation: 0,
        };
        (worker, response_rx)
    }

    /// Start listing `job.target`, superseding any pending request.
    ///
    /// Must be called from within a tokio runtime. Returns the generation
    /// of the new request.
    pub fn request(&mut self, job: ListingJob) -> u64 {
        self.cancel();
        let generation = self.generation;

        let source = Arc::clone(&self.source);
        let response_tx = self.response_tx.clone();

        log_debug(&format!(
            "DEBUG [Listing]: request gen={} target={:?}",
            generation, job.target
        ));

        self.pending = Some(tokio::spawn(async move {
            let ListingJob { target, options } = job;
            let entries = match &target {
                // Root entries come from the session's storage roots
                NavTarget::Root => Ok(Vec::new()),
                NavTarget::Dir(dir) => {
                    let path = dir.clone();
                    tokio::task::spawn_blocking(move || {
                        list_directory(source.as_ref(), &path, &options)
                    })
                    .await
                    .unwrap_or_else(|join_err| {
                        Err(PickerError::DirectoryRead {
                            path: dir.clone(),
                            source: io::Error::new(io::ErrorKind::Other, join_err.to_string()),
                        })
                    })
                }
            };

            let _ = response_tx.send(ListingResponse {
                generation,
                target,
                entries,
            });
        }));

        generation
    }

    /// Drop the pending request. The blocking read itself cannot be
    /// interrupted and runs to completion, but its result is discarded.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                log_debug(&format!("DEBUG [Listing]: abort gen={}", self.generation));
            }
            handle.abort();
        }
        self.generation += 1;
    }

    /// Whether `response` answers the latest request
    pub fn is_current(&self, response: &ListingResponse) -> bool {
        response.generation == self.generation
    }

    pub fn is_busy(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for ListingWorker {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::listing::ListingOptions;
    use crate::storage::StdStorage;
    use std::fs;

    fn job(target: NavTarget) -> ListingJob {
        ListingJob {
            target,
            options: ListingOptions {
                explore: true,
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_lists_directory_in_background() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let (mut worker, mut rx) = ListingWorker::new(Arc::new(StdStorage));
        worker.request(job(NavTarget::Dir(dir.path().to_path_buf())));

        let response = rx.recv().await.unwrap();
        assert!(worker.is_current(&response));
        let titles: Vec<String> = response
            .entries
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["sub".to_string(), "a.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_read_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let (mut worker, mut rx) = ListingWorker::new(Arc::new(StdStorage));
        worker.request(job(NavTarget::Dir(missing)));

        let response = rx.recv().await.unwrap();
        assert!(matches!(
            response.entries,
            Err(PickerError::DirectoryRead { .. })
        ));
    }

    #[tokio::test]
    async fn test_new_request_supersedes_old() {
        let dir = tempfile::tempdir().unwrap();
        let (mut worker, mut rx) = ListingWorker::new(Arc::new(StdStorage));

        let first = worker.request(job(NavTarget::Dir(dir.path().to_path_buf())));
        let second = worker.request(job(NavTarget::Root));
        assert!(second > first);

        // Whatever arrives, only the latest generation counts
        loop {
            let response = rx.recv().await.unwrap();
            if worker.is_current(&response) {
                assert_eq!(response.target, NavTarget::Root);
                break;
            }
            assert_eq!(response.generation, first);
        }
    }

    #[tokio::test]
    async fn test_busy_while_request_outstanding() {
        let dir = tempfile::tempdir().unwrap();
        let (mut worker, mut rx) = ListingWorker::new(Arc::new(StdStorage));
        assert!(!worker.is_busy());

        worker.request(job(NavTarget::Dir(dir.path().to_path_buf())));
        // The single-threaded test runtime has not polled the task yet
        assert!(worker.is_busy());

        rx.recv().await.unwrap();
        while worker.is_busy() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_cancel_invalidates_pending() {
        let dir = tempfile::tempdir().unwrap();
        let (mut worker, _rx) = ListingWorker::new(Arc::new(StdStorage));
        let generation = worker.request(job(NavTarget::Dir(dir.path().to_path_buf())));
        worker.cancel();

        let stale = ListingResponse {
            generation,
            target: NavTarget::Root,
            entries: Ok(Vec::new()),
        };
        assert!(!worker.is_current(&stale));
        assert!(!worker.is_busy());
    }
}
