use std::{fmt, str::FromStr};

use super::{
    matcher::{locate, window},
    parse::{LyricDocument, TimedLine},
};
use crate::types::StatusReport;

/// Number of lines shown before the first lyric of a track is reached.
pub const PREVIEW_LINES: usize = 3;

pub const NO_LYRICS_PLACEHOLDER: &str = "No lyrics found";

/// What the caption shows while playback is paused or stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PausePolicy {
    /// Clear the caption.
    #[default]
    Blank,
    /// Keep showing the last lyric view.
    Hold,
}

impl FromStr for PausePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blank" => Ok(PausePolicy::Blank),
            "hold" | "keep" => Ok(PausePolicy::Hold),
            other => Err(format!("unknown pause policy: {}", other)),
        }
    }
}

impl fmt::Display for PausePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PausePolicy::Blank => write!(f, "blank"),
            PausePolicy::Hold => write!(f, "hold"),
        }
    }
}

/// Everything a renderer may have to draw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caption {
    /// No usable credential; the operator has to log in.
    Unauthorized,
    /// Authorized but nothing is playing.
    #[default]
    Idle,
    /// Playing, but no lyrics are published for this track.
    NoLyrics,
    /// Playing with lyrics, before the first line. Nothing is highlighted.
    Preview(Vec<TimedLine>),
    /// The active line and its neighbours.
    Lines {
        lines: Vec<TimedLine>,
        highlight: usize,
    },
}

impl Caption {
    fn shows_lyrics(&self) -> bool {
        matches!(self, Caption::Preview(_) | Caption::Lines { .. })
    }
}

/// Picks the caption for one status sample.
///
/// `document` is whatever the display last read from the lyric store; it is
/// only used when its header names the reported track.
pub fn compose(status: &StatusReport, document: Option<&LyricDocument>, radius: usize) -> Caption {
    if !status.authorized {
        return Caption::Unauthorized;
    }

    let track = match &status.track {
        Some(track) if status.playing && track.is_playing => track,
        _ => return Caption::Idle,
    };

    let document = match document {
        Some(doc)
            if status.lyrics_synced == Some(true)
                && !doc.lines.is_empty()
                && doc.belongs_to(&track.name, &track.artists) =>
        {
            doc
        }
        _ => return Caption::NoLyrics,
    };

    let position = i64::try_from(track.progress_ms).unwrap_or(i64::MAX);
    match locate(&document.lines, position).and_then(|i| window(&document.lines, i, radius)) {
        Some(w) => Caption::Lines {
            lines: w.lines.to_vec(),
            highlight: w.highlight,
        },
        None => {
            let preview = PREVIEW_LINES.min(document.lines.len());
            Caption::Preview(document.lines[..preview].to_vec())
        }
    }
}

/// Display-side state: remembers the last caption for [`PausePolicy::Hold`].
#[derive(Debug, Clone, Default)]
pub struct CaptionView {
    policy: PausePolicy,
    radius: usize,
    current: Caption,
}

impl CaptionView {
    pub fn new(policy: PausePolicy, radius: usize) -> Self {
        CaptionView {
            policy,
            radius,
            current: Caption::Idle,
        }
    }

    /// Updates the view with a new sample. Returns `true` when the caption changed.
    pub fn update(&mut self, status: &StatusReport, document: Option<&LyricDocument>) -> bool {
        let next = compose(status, document, self.radius);
        if next == Caption::Idle && self.policy == PausePolicy::Hold && self.current.shows_lyrics() {
            return false;
        }
        if next == self.current {
            return false;
        }
        self.current = next;
        true
    }

    pub fn caption(&self) -> &Caption {
        &self.current
    }
}
