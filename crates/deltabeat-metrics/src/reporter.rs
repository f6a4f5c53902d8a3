//! MetricsReporter — periodic sample → diff → format cycle.
//!
//! Each tick captures a snapshot, diffs it against the one retained from
//! the previous tick, logs the change, and publishes the status block.
//! Only one previous snapshot is ever kept.

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use deltabeat_core::{HumanDuration, MetricsLoggingConfig, Snapshot, SnapshotSource};

use crate::delta::{Delta, diff};
use crate::format::{format_log_line, format_status_block, zero_status_block};
use crate::status::StatusBoard;

/// Result of a single reporting cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing changed; the board was reset to the all-zero block.
    Quiet,
    /// Something changed; the board shows this delta.
    Changed(Delta),
}

/// Periodic reporter over a [`SnapshotSource`], publishing into a
/// [`StatusBoard`].
pub struct MetricsReporter<S> {
    source: S,
    board: StatusBoard,
    config: MetricsLoggingConfig,
    started: Instant,
}

impl<S: SnapshotSource> MetricsReporter<S> {
    /// Create a reporter. Uptime in the totals report counts from here.
    pub fn new(source: S, board: StatusBoard, config: MetricsLoggingConfig) -> Self {
        Self {
            source,
            board,
            config,
            started: Instant::now(),
        }
    }

    /// The board this reporter publishes into.
    pub fn board(&self) -> &StatusBoard {
        &self.board
    }

    /// Run one cycle against `previous`, replacing it with the new sample.
    pub fn tick(&self, previous: &mut Snapshot) -> TickOutcome {
        let current = self.source.capture();
        let delta = diff(previous, &current);
        *previous = current;

        let period = HumanDuration(self.config.period);
        if delta.is_empty() {
            info!("No non-zero metrics in the last {period}");
            self.board.publish(zero_status_block());
            return TickOutcome::Quiet;
        }

        info!(
            "Non-zero metrics in the last {period}:{}",
            format_log_line(&delta)
        );
        self.board.publish(format_status_block(&delta));
        TickOutcome::Changed(delta)
    }

    /// Tick every period until `shutdown` fires. Returns the number of ticks.
    ///
    /// Returns immediately, without touching the board, when disabled.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> u64 {
        if !self.config.enabled {
            info!("Metrics logging disabled");
            return 0;
        }

        let period = self.config.period;
        info!("Metrics logging every {}", HumanDuration(period));

        // A stalled tick is dropped; the schedule stays aligned to the start.
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut previous = self.source.capture();
        let mut ticks = 0u64;

        if *shutdown.borrow_and_update() {
            return ticks;
        }

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick(&mut previous);
                    ticks += 1;
                }
                _ = shutdown.changed() => {
                    debug!(ticks, "metrics reporter shutting down");
                    break;
                }
            }
        }
        ticks
    }

    /// Log and publish everything that moved since start.
    ///
    /// Diffs a fresh capture against an empty baseline. Returns `None`
    /// when totals reporting is disabled.
    pub fn report_totals(&self) -> Option<Delta> {
        if !self.config.report_totals {
            return None;
        }

        let delta = diff(&Snapshot::empty(), &self.source.capture());
        info!("Total non-zero values: {}", format_log_line(&delta));
        info!("Uptime: {}", HumanDuration(self.started.elapsed()));
        self.board.publish(format_status_block(&delta));
        Some(delta)
    }
}
