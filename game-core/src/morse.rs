//! Morse encoding and tick-driven pulse playback

use heapless::Vec;

use crate::error::GameError;
use crate::hal::HalError;
use crate::types::{Segment, SegmentKind};

/// Longest text (in characters) the encoder accepts
pub const MAX_ENCODED_CHARS: usize = 16;

/// Segment capacity: five elements, four intra gaps and one trailing gap per character
pub const MAX_SEGMENTS: usize = MAX_ENCODED_CHARS * 10;

/// Encoded pulse train
pub type MorseSequence = Vec<Segment, MAX_SEGMENTS>;

/// International Morse patterns for A-Z and 0-9
const LETTERS: [&str; 26] = [
    ".-", "-...", "-.-.", "-..", ".", "..-.", "--.", "....", "..", ".---", "-.-", ".-..", "--",
    "-.", "---", ".--.", "--.-", ".-.", "...", "-", "..-", "...-", ".--", "-..-", "-.--", "--..",
];

const DIGITS: [&str; 10] = [
    "-----", ".----", "..---", "...--", "....-", ".....", "-....", "--...", "---..", "----.",
];

/// Dot/dash pattern of a character, `None` for space and unsupported characters
pub fn pattern(c: char) -> Option<&'static str> {
    match c.to_ascii_uppercase() {
        upper @ 'A'..='Z' => Some(LETTERS[(upper as u8 - b'A') as usize]),
        digit @ '0'..='9' => Some(DIGITS[(digit as u8 - b'0') as usize]),
        _ => None,
    }
}

/// Returns true if `c` can appear in encoder input
pub fn is_supported(c: char) -> bool {
    c == ' ' || pattern(c).is_some()
}

/// Encode `text` into timed segments.
///
/// Letters are separated by an inter-letter gap and words (runs of spaces)
/// by a single inter-word gap; leading and trailing spaces produce nothing.
/// ASCII lowercase is treated as uppercase.
pub fn encode(text: &str, unit_ms: u32) -> Result<MorseSequence, GameError> {
    if let Some(bad) = text.chars().find(|c| !is_supported(*c)) {
        return Err(GameError::InvalidCharacter(bad));
    }
    if text.chars().count() > MAX_ENCODED_CHARS {
        return Err(GameError::WordTooLong);
    }

    let mut sequence = MorseSequence::new();
    let mut pending_gap: Option<SegmentKind> = None;

    for c in text.chars() {
        let Some(code) = pattern(c) else {
            // Space: upgrade the separator once something has been sent
            if !sequence.is_empty() {
                pending_gap = Some(SegmentKind::InterWordGap);
            }
            continue;
        };

        if let Some(gap) = pending_gap.take() {
            push(&mut sequence, Segment::new(gap, unit_ms))?;
        }
        for (i, symbol) in code.chars().enumerate() {
            if i > 0 {
                push(&mut sequence, Segment::new(SegmentKind::IntraGap, unit_ms))?;
            }
            let kind = if symbol == '.' { SegmentKind::Dit } else { SegmentKind::Dah };
            push(&mut sequence, Segment::new(kind, unit_ms))?;
        }
        pending_gap = Some(SegmentKind::InterLetterGap);
    }

    Ok(sequence)
}

fn push(sequence: &mut MorseSequence, segment: Segment) -> Result<(), GameError> {
    sequence.push(segment).map_err(|_| GameError::WordTooLong)
}

/// Total play time of a sequence
pub fn total_duration_ms(sequence: &[Segment]) -> u32 {
    sequence.iter().map(|s| s.duration_ms).sum()
}

/// Tone output driven by [`Playback`]
pub trait ToneSink {
    fn tone_on(&mut self, duration_ms: u32) -> Result<(), HalError>;
    fn tone_off(&mut self) -> Result<(), HalError>;
}

/// Playback progress reported after each advance
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackStatus {
    Playing,
    Finished,
}

/// Cursor over a [`MorseSequence`], advanced by elapsed tick time
#[derive(Clone, Debug)]
pub struct Playback {
    sequence: MorseSequence,
    index: usize,
    offset_ms: u32,
    started: bool,
}

impl Playback {
    pub fn new(sequence: MorseSequence) -> Self {
        Self {
            sequence,
            index: 0,
            offset_ms: 0,
            started: false,
        }
    }

    pub fn sequence(&self) -> &[Segment] {
        &self.sequence
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.sequence.len()
    }

    /// Segment currently sounding or pausing
    pub fn current(&self) -> Option<Segment> {
        self.sequence.get(self.index).copied()
    }

    /// Begin the first segment
    pub fn start<S: ToneSink>(&mut self, sink: &mut S) -> Result<PlaybackStatus, HalError> {
        if self.started {
            return Ok(self.status());
        }
        self.started = true;
        self.begin_segment(sink)?;
        Ok(self.status())
    }

    /// Consume `elapsed_ms` of playback, crossing as many segment boundaries as needed
    pub fn advance<S: ToneSink>(&mut self, elapsed_ms: u32, sink: &mut S) -> Result<PlaybackStatus, HalError> {
        if !self.started {
            self.start(sink)?;
        }
        let mut remaining = elapsed_ms;
        while remaining > 0 {
            let Some(segment) = self.current() else {
                break;
            };
            let left = segment.duration_ms - self.offset_ms;
            if remaining < left {
                self.offset_ms += remaining;
                break;
            }
            remaining -= left;
            if segment.kind.is_keyed() {
                sink.tone_off()?;
            }
            self.index += 1;
            self.offset_ms = 0;
            self.begin_segment(sink)?;
        }
        Ok(self.status())
    }

    /// Abort playback, silencing any tone in progress
    pub fn stop<S: ToneSink>(&mut self, sink: &mut S) -> Result<(), HalError> {
        let sounding = self.started && self.current().map_or(false, |s| s.kind.is_keyed());
        self.index = self.sequence.len();
        self.offset_ms = 0;
        if sounding {
            sink.tone_off()?;
        }
        Ok(())
    }

    fn begin_segment<S: ToneSink>(&mut self, sink: &mut S) -> Result<(), HalError> {
        if let Some(segment) = self.current() {
            #[cfg(feature = "defmt")]
            defmt::trace!("segment {:?}", segment);
            if segment.kind.is_keyed() {
                sink.tone_on(segment.duration_ms)?;
            }
        }
        Ok(())
    }

    fn status(&self) -> PlaybackStatus {
        if self.is_finished() {
            PlaybackStatus::Finished
        } else {
            PlaybackStatus::Playing
        }
    }
}
