use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::TrackIdentity;

static TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\d{1,3}):(\d{1,2})(?:\.(\d+))?\]").unwrap());

static METADATA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([A-Za-z]+):(.*)\]$").unwrap());

/// Tag keys treated as header metadata rather than lyric content.
const METADATA_KEYS: &[&str] = &["id", "ti", "ar", "al", "au", "by", "length", "offset", "re", "ve"];

/// One lyric line tagged with its offset from the start of the track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedLine {
    pub time_ms: u64,
    pub text: String,
}

impl TimedLine {
    pub fn new(time_ms: u64, text: impl Into<String>) -> Self {
        TimedLine {
            time_ms,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LyricHeader {
    pub track_id: Option<String>,
    pub title: Option<String>,
    pub artists: Option<String>,
    pub album: Option<String>,
}

/// A published lyric document: header metadata plus lines sorted by time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LyricDocument {
    pub header: LyricHeader,
    pub lines: Vec<TimedLine>,
}

impl LyricDocument {
    /// Builds the document for `track` from raw LRC text returned by a lookup.
    pub fn for_track(track: &TrackIdentity, lrc: &str) -> Self {
        LyricDocument {
            header: LyricHeader {
                track_id: track.id.clone(),
                title: Some(track.name.clone()),
                artists: Some(track.artist_line()),
                album: Some(track.album_name.clone()),
            },
            lines: parse_synced_lyrics(lrc),
        }
    }

    /// Parses a document. Lines that are neither known metadata tags nor
    /// timestamped lyrics are dropped.
    pub fn parse(text: &str) -> Self {
        let mut header = LyricHeader::default();
        for line in text.lines() {
            if let Some((key, value)) = parse_metadata(line.trim()) {
                let value = Some(value.to_string());
                match key.as_str() {
                    "id" => header.track_id = value,
                    "ti" => header.title = value,
                    "ar" => header.artists = value,
                    "al" => header.album = value,
                    _ => {}
                }
            }
        }

        LyricDocument {
            header,
            lines: parse_synced_lyrics(text),
        }
    }

    /// True when the header names this track. Header values are read back
    /// trimmed, so both sides are compared without surrounding whitespace.
    pub fn belongs_to(&self, name: &str, artists: &str) -> bool {
        same_name(self.header.title.as_deref(), name) && same_name(self.header.artists.as_deref(), artists)
    }

    /// Renders the document back to LRC text, header first.
    pub fn to_lrc(&self) -> String {
        let mut out = String::new();
        if let Some(id) = &self.header.track_id {
            out.push_str(&format!("[id:{}]\n", id));
        }
        if let Some(title) = &self.header.title {
            out.push_str(&format!("[ti:{}]\n", title));
        }
        if let Some(artists) = &self.header.artists {
            out.push_str(&format!("[ar:{}]\n", artists));
        }
        if let Some(album) = &self.header.album {
            out.push_str(&format!("[al:{}]\n", album));
        }
        for line in &self.lines {
            out.push_str(&format_timestamp(line.time_ms));
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

fn same_name(stored: Option<&str>, wanted: &str) -> bool {
    stored.is_some_and(|s| s.trim() == wanted.trim())
}

/// Parses timestamped lines, sorted by time with document order kept for ties.
pub fn parse_synced_lyrics(text: &str) -> Vec<TimedLine> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if parse_metadata(line).is_some() {
            continue;
        }
        if let Some((stamps, lyric)) = parse_timed_line(line) {
            for time_ms in stamps {
                lines.push(TimedLine::new(time_ms, lyric));
            }
        }
    }

    lines.sort_by_key(|l| l.time_ms);
    lines
}

fn parse_metadata(line: &str) -> Option<(String, &str)> {
    let caps = METADATA_RE.captures(line)?;
    let key = caps.get(1)?.as_str().to_ascii_lowercase();
    if !METADATA_KEYS.contains(&key.as_str()) {
        return None;
    }
    Some((key, caps.get(2)?.as_str().trim()))
}

/// Strips leading `[mm:ss.xx]` stamps, e.g. `[00:12.00][01:10.50]chorus`.
fn parse_timed_line(line: &str) -> Option<(Vec<u64>, &str)> {
    let mut rest = line;
    let mut stamps = Vec::new();
    while let Some(caps) = TIMESTAMP_RE.captures(rest) {
        let minutes: u64 = caps.get(1)?.as_str().parse().ok()?;
        let seconds: u64 = caps.get(2)?.as_str().parse().ok()?;
        let fraction = caps.get(3).map(|m| fraction_ms(m.as_str())).unwrap_or(0);
        stamps.push((minutes * 60 + seconds) * 1000 + fraction);
        rest = &rest[caps.get(0)?.end()..];
    }

    if stamps.is_empty() {
        None
    } else {
        Some((stamps, rest.trim()))
    }
}

// ".5" is 500ms, ".23" is 230ms, ".123" is 123ms; digits past the third are ignored.
fn fraction_ms(digits: &str) -> u64 {
    let mut ms = 0;
    let mut scale = 100;
    for d in digits.chars().take(3) {
        ms += d.to_digit(10).unwrap_or(0) as u64 * scale;
        scale /= 10;
    }
    ms
}

fn format_timestamp(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    if millis % 10 == 0 {
        format!("[{:02}:{:02}.{:02}]", minutes, seconds, millis / 10)
    } else {
        format!("[{:02}:{:02}.{:03}]", minutes, seconds, millis)
    }
}
