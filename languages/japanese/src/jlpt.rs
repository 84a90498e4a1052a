use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JlptLevel {
    N5, // Beginner
    N4, // Elementary
    N3, // Intermediate
    N2, // Upper intermediate
    N1, // Advanced
}

impl JlptLevel {
    /// Get level string
    pub fn as_str(&self) -> &'static str {
        match self {
            JlptLevel::N5 => "N5",
            JlptLevel::N4 => "N4",
            JlptLevel::N3 => "N3",
            JlptLevel::N2 => "N2",
            JlptLevel::N1 => "N1",
        }
    }
}

impl FromStr for JlptLevel {
    type Err = String;

    /// Parse level from string, accepting `N3`, `n3` or a bare `3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.strip_prefix('N').unwrap_or(&upper) {
            "5" => Ok(JlptLevel::N5),
            "4" => Ok(JlptLevel::N4),
            "3" => Ok(JlptLevel::N3),
            "2" => Ok(JlptLevel::N2),
            "1" => Ok(JlptLevel::N1),
            _ => Err(format!("unknown JLPT level: {s}")),
        }
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
