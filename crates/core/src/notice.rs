use chrono::{DateTime, Duration, Utc};

/// Seconds a notice stays visible.
pub const NOTICE_SECS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "notice--info",
            Self::Success => "notice--success",
            Self::Warning => "notice--warning",
            Self::Error => "notice--error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoticeId(u64);

impl NoticeId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub level: NoticeLevel,
    pub message: String,
    pub posted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Transient status messages, newest last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeBoard {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(
        &mut self,
        level: NoticeLevel,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> NoticeId {
        self.next_id += 1;
        let id = NoticeId(self.next_id);
        self.notices.push(Notice {
            id,
            level,
            message: message.into(),
            posted_at: now,
            expires_at: now + Duration::seconds(NOTICE_SECS),
        });
        id
    }

    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        let before = self.notices.len();
        self.notices.retain(|notice| notice.id != id);
        before != self.notices.len()
    }

    pub fn active(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .filter(move |notice| !notice.is_expired(now))
    }

    /// Drops expired notices; returns how many were removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.notices.len();
        self.notices.retain(|notice| !notice.is_expired(now));
        before - self.notices.len()
    }

    /// Earliest pending expiry, if any.
    #[must_use]
    pub fn next_expiry(&self) -> Option<DateTime<Utc>> {
        self.notices.iter().map(|notice| notice.expires_at).min()
    }
}
