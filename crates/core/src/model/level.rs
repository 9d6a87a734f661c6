use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("unknown level code: {0}")]
    UnknownCode(String),
}

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// CEFR proficiency band, ordered from `A1` (lowest) to `C2` (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

/// Static descriptive metadata shown when choosing a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub level: Level,
    pub title: &'static str,
    pub description: &'static str,
    pub features: [&'static str; 4],
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::A1,
        Level::A2,
        Level::B1,
        Level::B2,
        Level::C1,
        Level::C2,
    ];

    /// Two-character code, e.g. `"B1"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        }
    }

    /// Position in [`Level::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Level at `index` in [`Level::ALL`], if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn info(self) -> LevelInfo {
        match self {
            Level::A1 => LevelInfo {
                level: self,
                title: "Beginner (A1)",
                description: "I am learning English from scratch or only know a few words",
                features: [
                    "Alphabet and basic sounds",
                    "Simple greetings",
                    "Numbers and colors",
                    "Grammar basics",
                ],
            },
            Level::A2 => LevelInfo {
                level: self,
                title: "Elementary (A2)",
                description: "I can build simple sentences and follow basic speech",
                features: [
                    "Simple dialogues",
                    "Present tense",
                    "Describing myself and family",
                    "Shopping and travel",
                ],
            },
            Level::B1 => LevelInfo {
                level: self,
                title: "Intermediate (B1)",
                description: "I understand the main ideas of conversations on familiar topics",
                features: [
                    "Verb tenses",
                    "Telling stories about events",
                    "Expressing opinions",
                    "Plans and dreams",
                ],
            },
            Level::B2 => LevelInfo {
                level: self,
                title: "Upper intermediate (B2)",
                description: "I can follow complex texts and speak fluently",
                features: [
                    "Complex grammar",
                    "Abstract topics",
                    "Professional communication",
                    "Cultural differences",
                ],
            },
            Level::C1 => LevelInfo {
                level: self,
                title: "Advanced (C1)",
                description: "I understand long demanding texts and speak spontaneously",
                features: [
                    "Language nuances",
                    "Academic English",
                    "Business negotiations",
                    "Literary texts",
                ],
            },
            Level::C2 => LevelInfo {
                level: self,
                title: "Proficient (C2)",
                description: "I use the language almost like a native speaker",
                features: [
                    "Complete comprehension",
                    "Subtle shades of meaning",
                    "Professional level",
                    "Teaching and translation",
                ],
            },
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.code() == s)
            .ok_or_else(|| LevelError::UnknownCode(s.to_owned()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
