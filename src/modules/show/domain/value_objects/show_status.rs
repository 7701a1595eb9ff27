use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Airing status as reported upstream. Unrecognised labels are kept verbatim
/// so status filters still match them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShowStatus {
    Running,
    Ended,
    ToBeDetermined,
    InDevelopment,
    Unknown,
    Other(String),
}

impl ShowStatus {
    pub fn display_name(&self) -> &str {
        match self {
            ShowStatus::Running => "Running",
            ShowStatus::Ended => "Ended",
            ShowStatus::ToBeDetermined => "To Be Determined",
            ShowStatus::InDevelopment => "In Development",
            ShowStatus::Unknown => "Unknown",
            ShowStatus::Other(label) => label,
        }
    }
}

impl Default for ShowStatus {
    fn default() -> Self {
        ShowStatus::Unknown
    }
}

impl fmt::Display for ShowStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl From<&str> for ShowStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "running" => ShowStatus::Running,
            "ended" => ShowStatus::Ended,
            "to be determined" | "tbd" => ShowStatus::ToBeDetermined,
            "in development" => ShowStatus::InDevelopment,
            "" | "unknown" => ShowStatus::Unknown,
            _ => ShowStatus::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for ShowStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<ShowStatus> for String {
    fn from(status: ShowStatus) -> Self {
        status.display_name().to_string()
    }
}

impl FromStr for ShowStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}
