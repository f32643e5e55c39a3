//! Playback bookkeeping: at most one clip is live, tracked by generation.
//!
//! Every request bumps the generation. Callbacks for an older generation
//! (a clip that was superseded or stopped) are ignored, so a late "ended"
//! event can never flip the UI of a newer playback.

use chrono::{DateTime, Utc};

use crate::model::{AudioPath, Lesson, LessonId};

/// Seconds the error label stays on the play control before reverting.
pub const ERROR_LABEL_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioVariant {
    /// Chinese pronunciation clip.
    Primary,
    /// Optional French clip.
    Secondary,
}

impl AudioVariant {
    /// The clip for this variant, if the lesson has one.
    #[must_use]
    pub fn path(self, lesson: &Lesson) -> Option<&AudioPath> {
        match self {
            Self::Primary => Some(lesson.audio_file()),
            Self::Secondary => lesson.french_audio_file(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlaybackGeneration(u64);

impl PlaybackGeneration {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Handed out by [`PlaybackSlot::begin`]; identifies one playback attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTicket {
    pub generation: PlaybackGeneration,
    pub lesson: LessonId,
    pub variant: AudioVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Loading(PlaybackTicket),
    Playing(PlaybackTicket),
    Error {
        ticket: PlaybackTicket,
        until: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSlot {
    generation: PlaybackGeneration,
    status: PlaybackStatus,
}

impl Default for PlaybackSlot {
    fn default() -> Self {
        Self {
            generation: PlaybackGeneration::default(),
            status: PlaybackStatus::Idle,
        }
    }
}

impl PlaybackSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases whatever was active and reserves a new generation.
    pub fn begin(&mut self, lesson: LessonId, variant: AudioVariant) -> PlaybackTicket {
        self.generation = PlaybackGeneration(self.generation.0 + 1);
        let ticket = PlaybackTicket {
            generation: self.generation,
            lesson,
            variant,
        };
        self.status = PlaybackStatus::Loading(ticket);
        ticket
    }

    /// Stops the active playback, if any. Later callbacks for it are ignored.
    pub fn release(&mut self) -> bool {
        let was_active = self.active().is_some();
        if was_active {
            self.generation = PlaybackGeneration(self.generation.0 + 1);
        }
        if !matches!(self.status, PlaybackStatus::Error { .. }) {
            self.status = PlaybackStatus::Idle;
        }
        was_active
    }

    #[must_use]
    pub fn generation(&self) -> PlaybackGeneration {
        self.generation
    }

    #[must_use]
    pub fn is_current(&self, generation: PlaybackGeneration) -> bool {
        self.generation == generation
    }

    /// The ticket of the live playback (loading or playing).
    #[must_use]
    pub fn active(&self) -> Option<PlaybackTicket> {
        match self.status {
            PlaybackStatus::Loading(ticket) | PlaybackStatus::Playing(ticket) => Some(ticket),
            PlaybackStatus::Idle | PlaybackStatus::Error { .. } => None,
        }
    }

    pub fn started(&mut self, generation: PlaybackGeneration) -> bool {
        match self.status {
            PlaybackStatus::Loading(ticket) if ticket.generation == generation => {
                self.status = PlaybackStatus::Playing(ticket);
                true
            }
            _ => false,
        }
    }

    /// Natural completion. Returns `true` only for the first completion of the
    /// current generation.
    pub fn finished(&mut self, generation: PlaybackGeneration) -> bool {
        match self.status {
            PlaybackStatus::Loading(ticket) | PlaybackStatus::Playing(ticket)
                if ticket.generation == generation =>
            {
                self.status = PlaybackStatus::Idle;
                true
            }
            _ => false,
        }
    }

    /// Puts the slot into the bounded error state.
    pub fn failed(&mut self, generation: PlaybackGeneration, now: DateTime<Utc>) -> bool {
        match self.status {
            PlaybackStatus::Loading(ticket) | PlaybackStatus::Playing(ticket)
                if ticket.generation == generation =>
            {
                self.status = PlaybackStatus::Error {
                    ticket,
                    until: now + chrono::Duration::seconds(ERROR_LABEL_SECS),
                };
                true
            }
            _ => false,
        }
    }

    /// Status as seen at `now`; an expired error reads as idle.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> PlaybackStatus {
        match self.status {
            PlaybackStatus::Error { until, .. } if now >= until => PlaybackStatus::Idle,
            status => status,
        }
    }

    /// When the error label is due to revert, if one is showing.
    #[must_use]
    pub fn error_until(&self) -> Option<DateTime<Utc>> {
        match self.status {
            PlaybackStatus::Error { until, .. } => Some(until),
            _ => None,
        }
    }

    /// Drops an expired error state. Returns whether anything changed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        if matches!(self.status, PlaybackStatus::Error { until, .. } if now >= until) {
            self.status = PlaybackStatus::Idle;
            return true;
        }
        false
    }
}
