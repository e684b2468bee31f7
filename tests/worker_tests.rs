// Scheduler and frame loop tests: boundary alignment, publishing, teardown

mod common;

use opsticker::monitor::TickerMonitor;
use opsticker::snapshot_builder::build_snapshot;
use opsticker::ticker::render::HEADER;
use opsticker::ticker::TickerOptions;
use opsticker::worker::{
    FrameConfig, FrameDeps, WorkerConfig, WorkerDeps, schedule_next_boundary, spawn,
    spawn_frame_loop,
};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{Duration, sleep, timeout};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

const WIDTH_MS: u64 = 50;

#[tokio::test]
async fn boundary_ticks_are_aligned_and_increasing() {
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let timer = schedule_next_boundary(
        move |bucket| {
            let _ = tick_tx.send(bucket);
        },
        WIDTH_MS,
    );

    let mut buckets = Vec::new();
    for _ in 0..3 {
        let bucket = timeout(Duration::from_secs(2), tick_rx.recv())
            .await
            .expect("tick within 2s")
            .expect("channel open");
        buckets.push(bucket);
    }
    timer.cancel().await;

    for b in &buckets {
        assert_eq!(b.rem_euclid(WIDTH_MS as i64), 0, "bucket {b} not on a boundary");
    }
    for pair in buckets.windows(2) {
        assert!(pair[1] > pair[0], "buckets not increasing: {buckets:?}");
    }
}

#[tokio::test]
async fn cancelled_timer_never_ticks_again() {
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let timer = schedule_next_boundary(
        move |bucket| {
            let _ = tick_tx.send(bucket);
        },
        WIDTH_MS,
    );
    timeout(Duration::from_secs(2), tick_rx.recv())
        .await
        .expect("first tick");
    timer.cancel().await;
    while tick_rx.try_recv().is_ok() {}

    sleep(Duration::from_millis(3 * WIDTH_MS)).await;
    // The closure (and its sender) is gone once the task has exited.
    assert!(tick_rx.recv().await.is_none());
}

#[tokio::test]
async fn dropped_timer_is_aborted() {
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let timer = schedule_next_boundary(
        move |bucket| {
            let _ = tick_tx.send(bucket);
        },
        WIDTH_MS,
    );
    drop(timer);
    let closed = timeout(Duration::from_secs(1), async {
        while tick_rx.recv().await.is_some() {}
    })
    .await;
    assert!(closed.is_ok(), "aborted task should drop its sender");
}

#[tokio::test]
async fn publisher_broadcasts_snapshot_for_live_bucket() {
    let (tx, mut rx) = broadcast::channel(4);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let monitor = Arc::new(TickerMonitor::new());

    let handle = spawn(
        WorkerDeps {
            tx,
            monitor: monitor.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            bucket_ms: WIDTH_MS,
            stats_log_interval_secs: 3600,
        },
    );

    let snapshot = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("snapshot within 2s")
        .expect("channel open");
    assert_eq!(snapshot.generated_at.rem_euclid(WIDTH_MS as i64), 0);
    assert_eq!(snapshot, build_snapshot(snapshot.generated_at));

    let second = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("second snapshot")
        .expect("channel open");
    assert!(second.generated_at > snapshot.generated_at);

    let _ = shutdown_tx.send(());
    handle.await.unwrap();
    assert!(monitor.stats().snapshots_built >= 2);
}

#[tokio::test]
async fn publisher_without_receivers_keeps_running() {
    let (tx, rx) = broadcast::channel(4);
    drop(rx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let monitor = Arc::new(TickerMonitor::new());
    let handle = spawn(
        WorkerDeps {
            tx,
            monitor: monitor.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            bucket_ms: WIDTH_MS,
            stats_log_interval_secs: 3600,
        },
    );
    sleep(Duration::from_millis(4 * WIDTH_MS)).await;
    let _ = shutdown_tx.send(());
    handle.await.unwrap();
    assert!(monitor.stats().snapshots_built >= 1);
}

#[tokio::test]
async fn frame_loop_renders_and_applies_snapshots() {
    let (tx, rx) = broadcast::channel(4);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let monitor = Arc::new(TickerMonitor::new());

    let handle = spawn_frame_loop(
        FrameDeps {
            rx,
            sink: common::VecSink::default(),
            monitor: monitor.clone(),
            shutdown_rx,
        },
        FrameConfig {
            frame_interval_ms: 10,
            options: TickerOptions {
                width: 80,
                grid_columns: 3,
                reduced_motion: true,
                narrow: false,
                smoothing: 0.15,
                marquee_speed: 8.0,
            },
        },
    );

    sleep(Duration::from_millis(50)).await;
    tx.send(common::sample_snapshot(0)).unwrap();
    sleep(Duration::from_millis(50)).await;
    let _ = shutdown_tx.send(());
    let sink = handle.await.unwrap();

    assert!(!sink.frames.is_empty());
    assert!(sink.frames.iter().all(|f| f[0] == HEADER));
    // Reduced motion: the sample's 6 deployments show up immediately.
    assert_eq!(sink.deployments_shown.last(), Some(&6.0));
    assert_eq!(monitor.stats().frames_rendered, sink.frames.len() as u64);
}

#[tokio::test]
async fn frame_loop_stops_when_publisher_goes_away() {
    let (tx, rx) = broadcast::channel::<opsticker::models::Snapshot>(4);
    let (_shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = spawn_frame_loop(
        FrameDeps {
            rx,
            sink: common::VecSink::default(),
            monitor: Arc::new(TickerMonitor::new()),
            shutdown_rx,
        },
        FrameConfig {
            frame_interval_ms: 10,
            options: TickerOptions {
                width: 80,
                grid_columns: 3,
                reduced_motion: false,
                narrow: false,
                smoothing: 0.15,
                marquee_speed: 8.0,
            },
        },
    );
    drop(tx);
    timeout(Duration::from_secs(1), handle)
        .await
        .expect("loop exits on closed channel")
        .unwrap();
}

/// Records each event's message and the name of the span it was emitted in.
#[derive(Clone, Default)]
struct SpanRecorder {
    events: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S> Layer<S> for SpanRecorder
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        let span = ctx.event_span(event).map(|s| s.name().to_string());
        self.events.lock().unwrap().push((visitor.0, span));
    }
}

#[tokio::test]
async fn publisher_span_stays_inside_its_task() {
    let recorder = SpanRecorder::default();
    let _default =
        tracing::subscriber::set_default(tracing_subscriber::registry().with(recorder.clone()));

    let (tx, mut rx) = broadcast::channel(4);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = spawn(
        WorkerDeps {
            tx,
            monitor: Arc::new(TickerMonitor::new()),
            shutdown_rx,
        },
        WorkerConfig {
            bucket_ms: WIDTH_MS,
            stats_log_interval_secs: 3600,
        },
    );

    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("snapshot within 2s")
        .expect("channel open");
    // The publisher is parked in its select loop on this same thread.
    tracing::info!("frame drawn elsewhere");

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();

    let events = recorder.events.lock().unwrap();
    let span_of = |message: &str| {
        events
            .iter()
            .find(|(m, _)| m == message)
            .map(|(_, span)| span.clone())
            .unwrap_or_else(|| panic!("no event {message:?} in {events:?}"))
    };
    assert_eq!(span_of("snapshot built").as_deref(), Some("publisher"));
    assert_eq!(span_of("frame drawn elsewhere"), None);
}
