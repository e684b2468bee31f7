use anyhow::Result;
use opsticker::*;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Redraws the ticker in place on stdout.
struct TerminalSink {
    out: std::io::Stdout,
    lines_drawn: usize,
}

impl worker::FrameSink for TerminalSink {
    fn draw(&mut self, view: &ticker::TickerView) -> anyhow::Result<()> {
        let lines = view.render();
        let mut out = self.out.lock();
        if self.lines_drawn > 0 {
            // Move back up over the previous frame.
            write!(out, "\x1b[{}F", self.lines_drawn)?;
        }
        for line in &lines {
            writeln!(out, "\x1b[2K{}", line)?;
        }
        out.flush()?;
        self.lines_drawn = lines.len();
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        reduced_motion = app_config.display.reduced_motion,
        "starting ticker"
    );

    let (tx, rx) = broadcast::channel::<models::Snapshot>(app_config.publishing.broadcast_capacity);
    let monitor = Arc::new(monitor::TickerMonitor::new());
    let (publisher_shutdown_tx, publisher_shutdown_rx) = tokio::sync::oneshot::channel();
    let (frames_shutdown_tx, frames_shutdown_rx) = tokio::sync::oneshot::channel();

    let publisher_handle = worker::spawn(
        worker::WorkerDeps {
            tx,
            monitor: monitor.clone(),
            shutdown_rx: publisher_shutdown_rx,
        },
        worker::WorkerConfig {
            bucket_ms: clock::BUCKET_MS,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );

    let frames_handle = worker::spawn_frame_loop(
        worker::FrameDeps {
            rx,
            sink: TerminalSink {
                out: std::io::stdout(),
                lines_drawn: 0,
            },
            monitor: monitor.clone(),
            shutdown_rx: frames_shutdown_rx,
        },
        worker::FrameConfig {
            frame_interval_ms: app_config.display.frame_interval_ms,
            options: ticker::TickerOptions::from(&app_config.display),
        },
    );

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Received shutdown signal");
    let _ = publisher_shutdown_tx.send(());
    let _ = frames_shutdown_tx.send(());
    let _ = publisher_handle.await;
    let _ = frames_handle.await;

    let stats = monitor.stats();
    tracing::info!(
        snapshots_built = stats.snapshots_built,
        frames_rendered = stats.frames_rendered,
        "ticker stopped"
    );
    Ok(())
}
