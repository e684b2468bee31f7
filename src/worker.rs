// Boundary-aligned snapshot publisher and the animation frame loop.
// Each boundary sleep is computed from the live clock, so timer drift never
// accumulates: every tick lands on the next exact bucket edge.

use crate::clock::{current_bucket, delay_until_next_boundary, now_ms};
use crate::models::Snapshot;
use crate::monitor::TickerMonitor;
use crate::snapshot_builder::build_snapshot;
use crate::ticker::{TickerOptions, TickerView};
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, interval};
use tracing::Instrument;

/// Rate limit for the "no receivers" message.
const NO_RECEIVERS_WARN_INTERVAL: Duration = Duration::from_secs(60);

/// Sleeps until the next boundary after the last published bucket and
/// returns the bucket read from the live clock after waking.
async fn next_boundary(width_ms: u64, last: Option<i64>) -> i64 {
    loop {
        let now = now_ms();
        tokio::time::sleep(delay_until_next_boundary(now, width_ms)).await;
        let bucket = current_bucket(now_ms(), width_ms);
        // Woke before the edge (coarse timer): wait again rather than repeat.
        if last != Some(bucket) {
            return bucket;
        }
    }
}

/// Handle to a running boundary task. Dropping it aborts the task, so a torn
/// down view never receives another tick.
pub struct BoundaryTimer {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl BoundaryTimer {
    /// Stops the task and waits for it to exit.
    pub async fn cancel(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for BoundaryTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Calls `on_tick(bucket)` at every bucket boundary until cancelled.
pub fn schedule_next_boundary<F>(mut on_tick: F, width_ms: u64) -> BoundaryTimer
where
    F: FnMut(i64) + Send + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let mut last = None;
        loop {
            tokio::select! {
                bucket = next_boundary(width_ms, last) => {
                    last = Some(bucket);
                    on_tick(bucket);
                }
                _ = &mut shutdown_rx => break,
            }
        }
    });
    BoundaryTimer {
        shutdown_tx: Some(shutdown_tx),
        handle: Some(handle),
    }
}

/// Channel, monitor, and shutdown for the snapshot publisher.
pub struct WorkerDeps {
    pub tx: broadcast::Sender<Snapshot>,
    pub monitor: Arc<TickerMonitor>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Publisher timing and logging config.
pub struct WorkerConfig {
    pub bucket_ms: u64,
    /// How often to log ticker stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Spawns the publisher: on every bucket boundary, build the snapshot for the
/// live bucket and broadcast it.
pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> JoinHandle<()> {
    let WorkerDeps {
        tx,
        monitor,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        bucket_ms,
        stats_log_interval_secs,
    } = config;

    let worker_span = tracing::span!(tracing::Level::DEBUG, "publisher", bucket_ms);

    let publisher = async move {
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // First tick completes immediately; don't log all-zero stats at startup.
        stats_log_tick.tick().await;

        let mut last_bucket: Option<i64> = None;
        let mut last_no_receivers_warn: Option<Instant> = None;

        loop {
            tokio::select! {
                bucket = next_boundary(bucket_ms, last_bucket) => {
                    last_bucket = Some(bucket);
                    let started = std::time::Instant::now();
                    let snapshot = build_snapshot(bucket);
                    let late_ms = u64::try_from(now_ms().saturating_sub(bucket)).unwrap_or(0);
                    monitor.record_build(started.elapsed(), late_ms);
                    tracing::trace!(operation = "build_snapshot", bucket, late_ms, "snapshot built");

                    if tx.send(snapshot).is_err() {
                        let should_warn = last_no_receivers_warn
                            .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_WARN_INTERVAL);
                        if should_warn {
                            tracing::debug!(
                                operation = "broadcast_snapshot",
                                "No active frame loop; broadcast channel has no receivers"
                            );
                            last_no_receivers_warn = Some(Instant::now());
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Publisher shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    let stats = monitor.stats();
                    tracing::info!(
                        snapshots_built = stats.snapshots_built,
                        frames_rendered = stats.frames_rendered,
                        snapshots_lagged = stats.snapshots_lagged,
                        last_build_us = stats.last_build_us,
                        max_boundary_late_ms = stats.max_boundary_late_ms,
                        "ticker stats"
                    );
                }
            }
        }
    };
    tokio::spawn(publisher.instrument(worker_span))
}

/// Destination for rendered frames (terminal, test buffer).
pub trait FrameSink: Send {
    fn draw(&mut self, view: &TickerView) -> anyhow::Result<()>;
}

pub struct FrameDeps<S: FrameSink> {
    pub rx: broadcast::Receiver<Snapshot>,
    pub sink: S,
    pub monitor: Arc<TickerMonitor>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct FrameConfig {
    pub frame_interval_ms: u64,
    pub options: TickerOptions,
}

/// Spawns the frame loop. Starts from the snapshot for the current bucket so
/// the first frame is never empty, then follows the publisher. Returns the
/// sink when the loop ends.
pub fn spawn_frame_loop<S: FrameSink + 'static>(
    deps: FrameDeps<S>,
    config: FrameConfig,
) -> JoinHandle<S> {
    let FrameDeps {
        mut rx,
        mut sink,
        monitor,
        mut shutdown_rx,
    } = deps;
    let FrameConfig {
        frame_interval_ms,
        options,
    } = config;

    tokio::spawn(async move {
        let initial = build_snapshot(current_bucket(now_ms(), crate::clock::BUCKET_MS));
        let mut view = TickerView::new(initial, options);
        let mut frame_tick = interval(Duration::from_millis(frame_interval_ms));
        frame_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                _ = frame_tick.tick() => {
                    let now = Instant::now();
                    view.frame(now.duration_since(last_frame).as_secs_f64());
                    last_frame = now;
                    if let Err(e) = sink.draw(&view) {
                        tracing::warn!(error = %e, operation = "draw_frame", "frame sink failed");
                        break;
                    }
                    monitor.record_frame();
                }
                result = rx.recv() => {
                    match result {
                        Ok(snapshot) => {
                            view.apply_snapshot(snapshot);
                            tracing::debug!(summary = %view.accessibility_summary(), "snapshot applied");
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!("Frame loop lagged, skipped {} snapshots", n);
                            monitor.record_lagged(n);
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Frame loop shutting down");
                    break;
                }
            }
        }
        sink
    })
}
