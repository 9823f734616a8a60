//! Angular reference frames for flow and blade angles.

use std::fmt;

/// Frame in which a flow angle is measured.
///
/// Incidence is only meaningful when flow and chord angles share a frame;
/// the tag travels with [`FlowState`](crate::FlowState) so reports can say
/// which one was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceFrame {
    /// Measured from the engine axis (stationary observer).
    #[default]
    Axial,
    /// Measured in the rotating blade frame.
    Relative,
}

impl ReferenceFrame {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Axial => "axial",
            Self::Relative => "relative",
        }
    }
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReferenceFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "axial" => Ok(Self::Axial),
            "relative" => Ok(Self::Relative),
            other => Err(format!("Unknown reference frame '{}'", other)),
        }
    }
}
