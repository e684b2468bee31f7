// Presentation adapter: animates displayed numbers toward the latest
// snapshot and lays the pills out for the terminal.

mod animation;
mod marquee;
pub mod render;

pub use animation::{AnimatedNumber, DEFAULT_SMOOTHING, SETTLE_EPSILON};
pub use marquee::{Marquee, TickerLayout};

use crate::config::DisplayConfig;
use crate::format::{accessibility_summary, format_value};
use crate::models::{MetricKey, Snapshot};

/// One rendered metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Pill {
    pub key: MetricKey,
    pub label: String,
    pub text: String,
    pub suffix: Option<String>,
    /// Set on the duplicate copy of the marquee track.
    pub aria_hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickerOptions {
    pub width: usize,
    pub grid_columns: usize,
    pub reduced_motion: bool,
    pub narrow: bool,
    pub smoothing: f64,
    pub marquee_speed: f64,
}

impl From<&DisplayConfig> for TickerOptions {
    fn from(c: &DisplayConfig) -> Self {
        Self {
            width: c.width,
            grid_columns: c.grid_columns,
            reduced_motion: c.reduced_motion,
            narrow: c.width < c.narrow_width,
            smoothing: c.smoothing,
            marquee_speed: c.marquee_speed,
        }
    }
}

pub struct TickerView {
    snapshot: Snapshot,
    values: Vec<(MetricKey, AnimatedNumber)>,
    layout: TickerLayout,
    marquee: Marquee,
    options: TickerOptions,
}

impl TickerView {
    pub fn new(snapshot: Snapshot, options: TickerOptions) -> Self {
        let values = snapshot
            .metrics
            .iter()
            .map(|m| (m.key, AnimatedNumber::new(m.value)))
            .collect();
        Self {
            layout: TickerLayout::select(options.reduced_motion, options.narrow),
            marquee: Marquee::new(options.marquee_speed),
            snapshot,
            values,
            options,
        }
    }

    pub fn layout(&self) -> TickerLayout {
        self.layout
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn marquee(&self) -> &Marquee {
        &self.marquee
    }

    /// Displayed (possibly mid-animation) value for `key`.
    pub fn displayed(&self, key: MetricKey) -> Option<f64> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, n)| n.display())
    }

    /// Replaces the snapshot. Displayed values keep animating from where
    /// they are toward the new targets; with reduced motion they jump.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let reduced_motion = self.options.reduced_motion;
        let mut previous = std::mem::take(&mut self.values);
        self.values = snapshot
            .metrics
            .iter()
            .map(|m| {
                let mut n = match previous.iter().position(|(k, _)| *k == m.key) {
                    Some(i) => previous.swap_remove(i).1,
                    None => AnimatedNumber::new(m.value),
                };
                n.retarget(m.value);
                if reduced_motion {
                    n.settle();
                }
                (m.key, n)
            })
            .collect();
        self.snapshot = snapshot;
    }

    /// Advances one animation frame. Returns true while any value is still
    /// moving.
    pub fn frame(&mut self, dt_secs: f64) -> bool {
        if self.options.reduced_motion {
            self.values.iter_mut().for_each(|(_, n)| n.settle());
            return false;
        }
        let smoothing = self.options.smoothing;
        let mut moving = false;
        for (_, n) in self.values.iter_mut() {
            moving |= !n.step(smoothing);
        }
        if self.layout.is_animated() {
            let width = render::track_width(&self.pills()) as f64;
            self.marquee.advance(dt_secs, width);
        }
        moving
    }

    pub fn pause(&mut self) {
        self.marquee.pause();
    }

    pub fn resume(&mut self) {
        self.marquee.resume();
    }

    /// Pills in snapshot order; the marquee track is doubled for a seamless
    /// loop with the second copy hidden from assistive tech.
    pub fn pills(&self) -> Vec<Pill> {
        let once: Vec<Pill> = self
            .snapshot
            .metrics
            .iter()
            .map(|m| {
                let shown = self.displayed(m.key).unwrap_or(m.value);
                Pill {
                    key: m.key,
                    label: m.label.clone(),
                    text: format_value(shown, m.kind),
                    suffix: m.suffix.clone(),
                    aria_hidden: false,
                }
            })
            .collect();
        if !self.layout.is_animated() {
            return once;
        }
        let hidden = once.iter().cloned().map(|p| Pill {
            aria_hidden: true,
            ..p
        });
        once.iter().cloned().chain(hidden).collect()
    }

    pub fn accessibility_summary(&self) -> String {
        accessibility_summary(&self.snapshot)
    }

    /// Header plus pill lines for the current frame.
    pub fn render(&self) -> Vec<String> {
        let pills = self.pills();
        let width = self.options.width;
        let mut lines = vec![render::HEADER.to_string()];
        match self.layout {
            TickerLayout::Marquee => {
                lines.push(render::marquee_line(&pills, self.marquee.offset(), width))
            }
            TickerLayout::SnapRow => lines.push(render::row_line(&pills, width)),
            TickerLayout::StaticGrid => {
                lines.extend(render::grid_lines(&pills, self.options.grid_columns, width))
            }
        }
        lines
    }
}
