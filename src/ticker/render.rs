// Terminal rendering of the ticker: one header line plus the pill viewport.

use super::Pill;

pub const HEADER: &str = "● Current Ops Snapshot (IST)";

/// Gap between pills on a track.
const GAP: &str = "   ";

pub fn pill_text(pill: &Pill) -> String {
    match &pill.suffix {
        Some(suffix) => format!("{} {} {}", pill.label.to_uppercase(), pill.text, suffix),
        None => format!("{} {}", pill.label.to_uppercase(), pill.text),
    }
}

fn track(pills: &[Pill]) -> Vec<char> {
    let mut out = Vec::new();
    for pill in pills {
        out.extend(pill_text(pill).chars());
        out.extend(GAP.chars());
    }
    out
}

/// Width in columns of the pill track (pills plus trailing gaps).
pub fn track_width(pills: &[Pill]) -> usize {
    pills
        .iter()
        .map(|p| pill_text(p).chars().count() + GAP.chars().count())
        .sum()
}

/// Window of `width` columns into the looping track starting at `-offset`.
pub fn marquee_line(pills: &[Pill], offset: f64, width: usize) -> String {
    let chars = track(pills);
    if chars.is_empty() || width == 0 {
        return String::new();
    }
    let start = if offset.is_finite() {
        (-offset).max(0.0).floor() as usize % chars.len()
    } else {
        0
    };
    chars.iter().cycle().skip(start).take(width).collect()
}

/// Single row clipped to `width`; no motion.
pub fn row_line(pills: &[Pill], width: usize) -> String {
    let text: Vec<String> = pills.iter().map(pill_text).collect();
    text.join(GAP).chars().take(width).collect()
}

/// Pills wrapped into rows of `columns` fixed-width cells.
pub fn grid_lines(pills: &[Pill], columns: usize, width: usize) -> Vec<String> {
    let columns = columns.max(1);
    let cell = (width / columns).max(1);
    pills
        .chunks(columns)
        .map(|row| {
            row.iter()
                .map(|p| {
                    let text: String = pill_text(p).chars().take(cell.saturating_sub(1)).collect();
                    format!("{text:<cell$}")
                })
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}
