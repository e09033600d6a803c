//! Background render worker.
//!
//! ```text
//! ┌──────────────┐  RenderRequest   ┌──────────────────┐
//! │  Main thread │ ───────────────► │  Render thread   │
//! │  - submit    │   cmd channel    │  - coalesce      │
//! │  - poll      │ ◄─────────────── │  - pipeline.apply│
//! └──────────────┘  RenderResult    └──────────────────┘
//! ```
//!
//! Requests carry the session revision. The render thread skips any request
//! that a newer one has already superseded in the queue, and the main thread
//! only ever takes the newest finished result, so a fast-moving control never
//! shows an older frame after a newer one.

use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use gs_common::{EffectSettings, PipelineConfig, PixelBuffer};
use gs_pipeline::GlitchPipeline;

use crate::SessionError;

/// Work item for the render thread.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    /// Session revision this request was built from.
    pub revision: u64,
    pub source: PixelBuffer,
    pub settings: EffectSettings,
}

/// Finished render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderResult {
    pub revision: u64,
    pub image: PixelBuffer,
}

/// Commands sent from the main thread to the render thread.
enum WorkerCommand {
    Render(RenderRequest),
    /// Stop and shut down the render thread.
    Stop,
}

/// Runs the glitch pipeline off the main thread.
pub struct RenderWorker {
    cmd_tx: Option<Sender<WorkerCommand>>,
    result_rx: Option<Receiver<RenderResult>>,
    handle: Option<thread::JoinHandle<()>>,
    /// Revision of the most recent `submit`.
    latest_submitted: Option<u64>,
    /// Revision of the last result returned to the caller.
    last_delivered: Option<u64>,
}

impl RenderWorker {
    /// Start a worker with the default pipeline.
    pub fn spawn() -> Result<Self, SessionError> {
        Self::spawn_with_config(PipelineConfig::default())
    }

    /// Start a worker whose pipeline uses `config`.
    pub fn spawn_with_config(config: PipelineConfig) -> Result<Self, SessionError> {
        let pipeline = GlitchPipeline::with_config(config)?;

        // Results are large; keep at most a couple in flight.
        let (result_tx, result_rx) = channel::bounded::<RenderResult>(2);
        let (cmd_tx, cmd_rx) = channel::unbounded::<WorkerCommand>();

        let handle = thread::Builder::new()
            .name("glitch-render".to_string())
            .spawn(move || render_thread_main(pipeline, cmd_rx, result_tx))?;

        tracing::info!("Render worker started");

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            result_rx: Some(result_rx),
            handle: Some(handle),
            latest_submitted: None,
            last_delivered: None,
        })
    }

    /// Queue a render. Never blocks.
    pub fn submit(&mut self, request: RenderRequest) -> Result<(), SessionError> {
        let tx = self.cmd_tx.as_ref().ok_or(SessionError::WorkerGone)?;
        let revision = request.revision;
        tx.send(WorkerCommand::Render(request))
            .map_err(|_| SessionError::WorkerGone)?;
        self.latest_submitted = Some(revision);
        tracing::trace!(revision, "Submitted render request");
        Ok(())
    }

    /// Take the newest finished result, if any, without blocking.
    ///
    /// Older results that arrived in the meantime are dropped, as is anything
    /// older than what was already delivered.
    pub fn poll_latest(&mut self) -> Result<Option<RenderResult>, SessionError> {
        let rx = self.result_rx.as_ref().ok_or(SessionError::WorkerGone)?;
        let mut newest: Option<RenderResult> = None;
        let mut disconnected = false;

        loop {
            match rx.try_recv() {
                Ok(result) => newest = Some(keep_newer(newest, result)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if disconnected && newest.is_none() {
            tracing::warn!("Render worker: result channel disconnected");
            return Err(SessionError::WorkerGone);
        }
        Ok(self.deliver(newest))
    }

    /// Block until the result for the latest submitted revision arrives, or
    /// until `timeout` passes. Returns the newest result seen either way.
    ///
    /// Returns `None` at once when that revision was already delivered.
    pub fn wait_latest(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<RenderResult>, SessionError> {
        let deadline = Instant::now() + timeout;
        let rx = self.result_rx.as_ref().ok_or(SessionError::WorkerGone)?;
        let target = self.latest_submitted;
        let delivered = self.last_delivered;
        let mut newest: Option<RenderResult> = None;

        loop {
            // An earlier poll may already have handed out the target revision.
            let seen = newest.as_ref().map(|r| r.revision).max(delivered);
            let caught_up = match (seen, target) {
                (_, None) => true,
                (Some(seen), Some(target)) => seen >= target,
                (None, Some(_)) => false,
            };
            if caught_up {
                break;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(result) => newest = Some(keep_newer(newest, result)),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    if newest.is_none() {
                        return Err(SessionError::WorkerGone);
                    }
                    break;
                }
            }
        }

        Ok(self.deliver(newest))
    }

    /// Revision of the last result handed out.
    pub fn last_delivered(&self) -> Option<u64> {
        self.last_delivered
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the render thread and wait for it to exit.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.cmd_tx.take() {
            let _ = tx.send(WorkerCommand::Stop);
        }

        // Unblocks the render thread if it is waiting on a full result channel.
        self.result_rx = None;

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            tracing::info!("Render worker stopped");
        }
    }

    fn deliver(&mut self, candidate: Option<RenderResult>) -> Option<RenderResult> {
        let result = candidate?;
        if let Some(last) = self.last_delivered {
            if result.revision < last {
                tracing::debug!(
                    revision = result.revision,
                    delivered = last,
                    "Dropping stale render result"
                );
                return None;
            }
        }
        self.last_delivered = Some(result.revision);
        Some(result)
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn keep_newer(current: Option<RenderResult>, incoming: RenderResult) -> RenderResult {
    match current {
        Some(current) if current.revision > incoming.revision => {
            tracing::debug!(revision = incoming.revision, "Dropping stale render result");
            current
        }
        Some(current) => {
            tracing::debug!(revision = current.revision, "Dropping stale render result");
            incoming
        }
        None => incoming,
    }
}

/// Main loop for the render thread.
///
/// Blocks on the command channel. Before rendering, drains any queued
/// commands so that only the newest request is processed.
fn render_thread_main(
    pipeline: GlitchPipeline,
    cmd_rx: Receiver<WorkerCommand>,
    result_tx: Sender<RenderResult>,
) {
    loop {
        let mut request = match cmd_rx.recv() {
            Ok(WorkerCommand::Render(request)) => request,
            Ok(WorkerCommand::Stop) => {
                tracing::debug!("Render thread: stop command received");
                return;
            }
            Err(_) => {
                tracing::debug!("Render thread: command channel disconnected, exiting");
                return;
            }
        };

        loop {
            match cmd_rx.try_recv() {
                Ok(WorkerCommand::Render(newer)) => {
                    tracing::trace!(
                        skipped = request.revision,
                        revision = newer.revision,
                        "Render thread: coalescing queued request"
                    );
                    request = newer;
                }
                Ok(WorkerCommand::Stop) => {
                    tracing::debug!("Render thread: stop command received");
                    return;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("Render thread: command channel disconnected, exiting");
                    return;
                }
            }
        }

        let image = pipeline.apply(&request.source, &request.settings);
        let result = RenderResult {
            revision: request.revision,
            image,
        };
        if result_tx.send(result).is_err() {
            tracing::debug!("Render thread: result channel closed, exiting");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use gs_common::{EffectKind, Intensity};

    use super::*;

    const WAIT: Duration = Duration::from_secs(10);

    fn request(revision: u64, bit_crush: i64) -> RenderRequest {
        RenderRequest {
            revision,
            source: PixelBuffer::from_fn(16, 16, |x, y| [(x * 16) as u8, (y * 16) as u8, 77, 255])
                .unwrap(),
            settings: EffectSettings::new().with(EffectKind::BitCrush, Intensity::new(bit_crush)),
        }
    }

    #[test]
    fn renders_submitted_request() {
        let mut worker = RenderWorker::spawn().unwrap();
        let req = request(1, 100);
        let expected = GlitchPipeline::new().apply(&req.source, &req.settings);
        worker.submit(req).unwrap();

        let result = worker.wait_latest(WAIT).unwrap().unwrap();
        assert_eq!(result.revision, 1);
        assert_eq!(result.image, expected);
        assert_eq!(worker.last_delivered(), Some(1));
    }

    #[test]
    fn latest_revision_wins() {
        let mut worker = RenderWorker::spawn().unwrap();
        for rev in 1..=5 {
            worker.submit(request(rev, rev as i64 * 20)).unwrap();
        }
        let result = worker.wait_latest(WAIT).unwrap().unwrap();
        assert_eq!(result.revision, 5);

        // Nothing older can be delivered afterwards.
        assert!(worker.poll_latest().unwrap().is_none());
    }

    #[test]
    fn poll_without_requests_is_empty() {
        let mut worker = RenderWorker::spawn().unwrap();
        assert!(worker.poll_latest().unwrap().is_none());
    }

    #[test]
    fn stale_result_is_not_delivered() {
        let mut worker = RenderWorker::spawn().unwrap();
        worker.submit(request(7, 50)).unwrap();
        assert_eq!(worker.wait_latest(WAIT).unwrap().unwrap().revision, 7);

        worker.submit(request(3, 50)).unwrap();
        assert!(worker.wait_latest(WAIT).unwrap().is_none());
        assert_eq!(worker.last_delivered(), Some(7));
    }

    #[test]
    fn wait_after_poll_returns_immediately() {
        let mut worker = RenderWorker::spawn().unwrap();
        worker.submit(request(1, 40)).unwrap();

        let deadline = Instant::now() + WAIT;
        let mut polled = None;
        while polled.is_none() && Instant::now() < deadline {
            polled = worker.poll_latest().unwrap();
            if polled.is_none() {
                thread::sleep(Duration::from_millis(5));
            }
        }
        assert_eq!(polled.unwrap().revision, 1);

        let started = Instant::now();
        assert!(worker.wait_latest(WAIT).unwrap().is_none());
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(worker.last_delivered(), Some(1));
    }

    #[test]
    fn submit_after_shutdown_fails() {
        let mut worker = RenderWorker::spawn().unwrap();
        worker.shutdown();
        assert!(!worker.is_running());
        assert!(matches!(
            worker.submit(request(1, 10)),
            Err(SessionError::WorkerGone)
        ));
        assert!(matches!(worker.poll_latest(), Err(SessionError::WorkerGone)));
    }
}
