use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, warn};

use crate::graph::{ImageHandle, NodeId};
use crate::image_source::{DecodedImage, FetchError, ImageSource};

struct PreviewRequest {
    generation: u64,
    handle: ImageHandle,
}

struct PreviewResponse {
    generation: u64,
    handle: ImageHandle,
    result: Result<DecodedImage, FetchError>,
}

pub(super) struct Preview {
    pub(super) node: NodeId,
    pub(super) display_name: String,
    pub(super) image: DecodedImage,
}

/// Fetches previews on one worker thread; only the latest request may land.
pub(super) struct PreviewLoader {
    generation: u64,
    latest: Arc<AtomicU64>,
    pending: bool,
    requests: Sender<PreviewRequest>,
    rx: Receiver<PreviewResponse>,
}

impl PreviewLoader {
    pub(super) fn new(source: Arc<dyn ImageSource>) -> Self {
        let (requests, request_rx) = mpsc::channel();
        let (tx, rx) = mpsc::channel();
        let latest = Arc::new(AtomicU64::new(0));
        let worker_latest = Arc::clone(&latest);
        thread::spawn(move || run_worker(source.as_ref(), &request_rx, &tx, &worker_latest));

        Self {
            generation: 0,
            latest,
            pending: false,
            requests,
            rx,
        }
    }

    pub(super) fn is_pending(&self) -> bool {
        self.pending
    }

    /// Supersedes any queued or in-flight fetch. `None` clears the preview.
    pub(super) fn request(&mut self, handle: Option<ImageHandle>) {
        self.generation = self.generation.wrapping_add(1);
        self.latest.store(self.generation, Ordering::Release);
        let Some(handle) = handle else {
            self.pending = false;
            return;
        };

        let request = PreviewRequest {
            generation: self.generation,
            handle,
        };
        if self.requests.send(request).is_err() {
            warn!("preview worker is gone");
            self.pending = false;
            return;
        }
        self.pending = true;
    }

    /// Drains finished fetches. `Some` carries the new preview state for the
    /// latest request; a failed fetch yields `Some(None)`.
    pub(super) fn poll(&mut self) -> Option<Option<Preview>> {
        let mut landed = None;
        while let Ok(response) = self.rx.try_recv() {
            if let Some(preview) = self.accept(response) {
                landed = Some(preview);
            }
        }
        landed
    }

    fn accept(&mut self, response: PreviewResponse) -> Option<Option<Preview>> {
        if response.generation != self.generation {
            debug!(
                name = %response.handle.display_name,
                "dropping superseded preview"
            );
            return None;
        }

        self.pending = false;
        match response.result {
            Ok(image) => Some(Some(Preview {
                node: response.handle.node,
                display_name: response.handle.display_name,
                image,
            })),
            Err(error) => {
                warn!("preview unavailable: {error}");
                Some(None)
            }
        }
    }
}

/// Serves requests until the loader is dropped, skipping any that a newer
/// request has already replaced.
fn run_worker(
    source: &dyn ImageSource,
    requests: &Receiver<PreviewRequest>,
    responses: &Sender<PreviewResponse>,
    latest: &AtomicU64,
) {
    while let Ok(mut request) = requests.recv() {
        while let Ok(newer) = requests.try_recv() {
            request = newer;
        }
        if request.generation != latest.load(Ordering::Acquire) {
            continue;
        }

        let result = source.fetch(&request.handle);
        let response = PreviewResponse {
            generation: request.generation,
            handle: request.handle,
            result,
        };
        if responses.send(response).is_err() {
            break;
        }
    }
}
