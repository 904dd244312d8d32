use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a binary sum. The set is closed: a sum is either `Left` or `Right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Left,
    Right,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Left => f.write_str("LEFT"),
            Label::Right => f.write_str("RIGHT"),
        }
    }
}
