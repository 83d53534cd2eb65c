#![forbid(unsafe_code)]

//! JSON messages from the page host.
//!
//! The host forwards browser events as small tagged objects:
//!
//! ```json
//! {"kind":"scroll","y":742.5}
//! {"kind":"layout","id":"about","top":800,"height":900}
//! {"kind":"unmount","id":"about"}
//! {"kind":"resize","width":390}
//! {"kind":"navigate","id":"contact"}
//! {"kind":"toggle_menu"}
//! {"kind":"close_menu"}
//! ```
//!
//! Unknown kinds and missing fields are parse errors, never panics.

use serde::Deserialize;

/// One decoded host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostMessage {
    /// Viewport scrolled; `y` is the raw vertical scroll distance.
    Scroll { y: f64 },
    /// A section was (re)measured, in document coordinates.
    Layout { id: String, top: f64, height: f64 },
    /// A section left the document.
    Unmount { id: String },
    /// Viewport width changed.
    Resize { width: f64 },
    /// A nav link or the brand button was activated.
    Navigate { id: String },
    ToggleMenu,
    CloseMenu,
}

impl HostMessage {
    /// Short label for log lines.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scroll { .. } => "scroll",
            Self::Layout { .. } => "layout",
            Self::Unmount { .. } => "unmount",
            Self::Resize { .. } => "resize",
            Self::Navigate { .. } => "navigate",
            Self::ToggleMenu => "toggle_menu",
            Self::CloseMenu => "close_menu",
        }
    }
}

/// Failure to decode a host message.
#[derive(Debug)]
pub struct HostMessageError(serde_json::Error);

impl std::fmt::Display for HostMessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid host message: {}", self.0)
    }
}

impl std::error::Error for HostMessageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Decode one JSON-encoded host message.
pub fn parse_host_message(json: &str) -> Result<HostMessage, HostMessageError> {
    serde_json::from_str(json).map_err(HostMessageError)
}
