use std::fmt;

use crate::model::lesson::Lesson;

/// Coarse grouping of a driving-test command, shown as a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCategory {
    BasicLightControl,
    Passing,
    Overtaking,
    Parking,
    DrivingScenario,
}

impl CommandCategory {
    /// Keyword match on the chinese text; the first matching rule wins.
    #[must_use]
    pub fn classify(lesson: &Lesson) -> Self {
        let text = lesson.chinese();
        if text.contains("前照灯") || text.contains("关闭") {
            Self::BasicLightControl
        } else if text.contains("通过") {
            Self::Passing
        } else if text.contains("超越") {
            Self::Overtaking
        } else if text.contains("停车") {
            Self::Parking
        } else {
            Self::DrivingScenario
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::BasicLightControl => "Basic Light Control",
            Self::Passing => "Passing Scenario",
            Self::Overtaking => "Overtaking",
            Self::Parking => "Parking",
            Self::DrivingScenario => "Driving Scenario",
        }
    }
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
