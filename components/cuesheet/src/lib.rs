mod parse;
mod timecode;
mod write;

pub use parse::{find_label, header, label_value, parse_tracks, unquote, CueTrack};
pub use timecode::{index_timecodes, parse_duration_ms, CueTimecode, FRAMES_PER_SECOND};
pub use write::{CueEntry, CueHeader, CueSheet};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CuesheetError {
    #[error("track {track} has a malformed duration: {value:?}")]
    MalformedDuration { track: usize, value: String },

    #[error("track lists disagree: {titles} titles, {performers} performers, {durations} durations")]
    LengthMismatch {
        titles: usize,
        performers: usize,
        durations: usize,
    },
}
