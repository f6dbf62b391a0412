//! Time-indexed line matching.
//!
//! Turns a sampled playback position into the index of the active line and a
//! bounded window of lines around it. Positions are sampled, never
//! interpolated: the caller passes whatever the last status poll reported.

use super::parse::TimedLine;

/// Lines shown on each side of the active line unless configured otherwise.
pub const DEFAULT_RADIUS: usize = 3;

/// Returns the index of the line active at `position_ms`.
///
/// The active line is the greatest `i` with `lines[i].time_ms <= position_ms`,
/// so among lines sharing a timestamp the last one in document order wins.
/// Returns `None` for an empty slice or a position before the first line.
/// `lines` must be sorted by `time_ms`.
pub fn locate(lines: &[TimedLine], position_ms: i64) -> Option<usize> {
    if position_ms < 0 {
        return None;
    }
    let position = position_ms as u64;
    let started = lines.partition_point(|line| line.time_ms <= position);
    started.checked_sub(1)
}

/// A slice of lines around the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    pub lines: &'a [TimedLine],
    /// Index of `lines[0]` in the full sequence.
    pub start: usize,
    /// Position of the active line inside `lines`.
    pub highlight: usize,
}

/// Cuts `lines[active - radius ..= active + radius]`, clamped to the sequence.
///
/// Returns `None` when `active` is out of range.
pub fn window(lines: &[TimedLine], active: usize, radius: usize) -> Option<Window<'_>> {
    if active >= lines.len() {
        return None;
    }
    let start = active.saturating_sub(radius);
    let end = active.saturating_add(radius).saturating_add(1).min(lines.len());
    Some(Window {
        lines: &lines[start..end],
        start,
        highlight: active - start,
    })
}
