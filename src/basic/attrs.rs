use crate::de;
use serde::{Deserialize, Serialize};

/// Attributes for a heading (i.e. `<h1>`, `<h2>`, ...)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HeadingAttrs {
    /// The level of the heading (i.e. `1` for `<h1>`)
    #[serde(default = "HeadingAttrs::default_level")]
    pub level: u8,
}

impl HeadingAttrs {
    fn default_level() -> u8 {
        1
    }
}

impl Default for HeadingAttrs {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// Attributes for a date picker
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatetimeAttrs {
    /// Milliseconds since the unix epoch, if a date was picked
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// The attributes for a hyperlink
#[derive(Debug, Hash, Eq, Clone, PartialEq, Deserialize, Serialize)]
pub struct LinkAttrs {
    /// The URL the link points to
    pub href: String,
    /// The title of the link
    #[serde(default, deserialize_with = "de::deserialize_or_default")]
    pub title: String,
}
