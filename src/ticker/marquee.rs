// Layout selection and the continuous marquee offset.

/// How the pills are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerLayout {
    /// Doubled pill track scrolling continuously.
    Marquee,
    /// Single row the user scrolls; no motion (narrow viewports).
    SnapRow,
    /// Static wrapped grid; used whenever reduced motion is preferred.
    StaticGrid,
}

impl TickerLayout {
    pub fn select(reduced_motion: bool, narrow: bool) -> Self {
        if reduced_motion {
            TickerLayout::StaticGrid
        } else if narrow {
            TickerLayout::SnapRow
        } else {
            TickerLayout::Marquee
        }
    }

    pub fn is_animated(self) -> bool {
        self == TickerLayout::Marquee
    }
}

/// Marquee offset in columns. Always in (-half_track, 0].
#[derive(Debug, Clone, PartialEq)]
pub struct Marquee {
    offset: f64,
    speed: f64,
    paused: bool,
}

impl Marquee {
    pub fn new(speed: f64) -> Self {
        Self {
            offset: 0.0,
            speed,
            paused: false,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Advances by `dt_secs`. `track_width` is the width of the doubled
    /// track; the offset wraps to zero once the first copy has scrolled out.
    pub fn advance(&mut self, dt_secs: f64, track_width: f64) {
        if self.paused || !dt_secs.is_finite() || dt_secs <= 0.0 {
            return;
        }
        let half = (track_width / 2.0).max(1.0);
        let next = self.offset - self.speed * dt_secs;
        self.offset = if next <= -half { 0.0 } else { next };
    }
}
