use std::fmt;

use serde::{Deserialize, Serialize};

/// Layout direction of a rendered ER diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Top to bottom.
    #[default]
    #[cfg_attr(feature = "cli", value(name = "TB"))]
    Tb,
    /// Bottom to top.
    #[cfg_attr(feature = "cli", value(name = "BT"))]
    Bt,
    /// Left to right.
    #[cfg_attr(feature = "cli", value(name = "LR"))]
    Lr,
    /// Right to left.
    #[cfg_attr(feature = "cli", value(name = "RL"))]
    Rl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Tb => "TB",
            Direction::Bt => "BT",
            Direction::Lr => "LR",
            Direction::Rl => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
