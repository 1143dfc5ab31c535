use crate::CuesheetError;
use std::fmt;

/// CD frames per second
pub const FRAMES_PER_SECOND: u64 = 75;

/// A cuesheet `INDEX` position, rendered as `MM:SS:FF`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CueTimecode {
    minutes: u64,
    seconds: u8,
    frames: u8,
}

impl CueTimecode {
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
        frames: 0,
    };

    /// Convert a position in milliseconds, rounding the sub-second part to
    /// the nearest frame (ties away from zero).
    pub fn from_millis(position_ms: u64) -> Self {
        let mut whole = position_ms / 1000;
        let mut frames = ((position_ms % 1000) * FRAMES_PER_SECOND + 500) / 1000;
        if frames >= FRAMES_PER_SECOND {
            whole += 1;
            frames = 0;
        }

        Self {
            minutes: whole / 60,
            seconds: (whole % 60) as u8,
            frames: frames as u8,
        }
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn frames(&self) -> u8 {
        self.frames
    }
}

impl fmt::Display for CueTimecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.minutes, self.seconds, self.frames)
    }
}

/// Parse a probe-reported duration in integer milliseconds
pub fn parse_duration_ms(value: &str, track: usize) -> Result<u64, CuesheetError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| CuesheetError::MalformedDuration {
            track,
            value: value.to_string(),
        })
}

/// Index position of every track: track `n` starts at the summed durations
/// of tracks `1..n`, so the first track always starts at zero.
///
/// Any malformed duration fails the whole sequence, including the last
/// track's even though it never moves an index.
pub fn index_timecodes(durations_ms: &[String]) -> Result<Vec<CueTimecode>, CuesheetError> {
    let mut elapsed_ms = 0_u64;
    let mut indices = Vec::with_capacity(durations_ms.len());

    for (i, duration) in durations_ms.iter().enumerate() {
        indices.push(CueTimecode::from_millis(elapsed_ms));
        elapsed_ms += parse_duration_ms(duration, i + 1)?;
    }

    Ok(indices)
}
