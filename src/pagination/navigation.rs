//! Navigation controls and index transitions.
//!
//! Control identifiers have the shape `nfl:<prev|next>:<token>`.

use crate::{commands::Control, pagination::StateError};

/// Domain tag prefixing every navigation control identifier.
const CONTROL_DOMAIN: &str = "nfl";

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn as_str(&self) -> &'static str {
        match self {
            Direction::Previous => "prev",
            Direction::Next => "next",
        }
    }

    /// Index reached from `current` in a list of `len` items, if any.
    pub fn step(&self, current: usize, len: usize) -> Option<usize> {
        let next = match self {
            Direction::Previous => current.checked_sub(1)?,
            Direction::Next => current.checked_add(1)?,
        };

        (next < len).then_some(next)
    }
}

/// A decoded navigation control identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlId {
    pub direction: Direction,
    pub token: String,
}

impl ControlId {
    pub fn new(direction: Direction, token: &str) -> Self {
        ControlId {
            direction,
            token: token.to_owned(),
        }
    }

    /// Decodes `nfl:<prev|next>:<token>`.
    pub fn parse(id: &str) -> Result<Self, StateError> {
        let parts: Vec<&str> = id.split(':').collect();

        let [domain, direction, token] = parts.as_slice() else {
            return Err(StateError::InvalidControl);
        };
        if *domain != CONTROL_DOMAIN || token.is_empty() {
            return Err(StateError::InvalidControl);
        }

        let direction = match *direction {
            "prev" => Direction::Previous,
            "next" => Direction::Next,
            _ => return Err(StateError::InvalidControl),
        };

        Ok(ControlId::new(direction, token))
    }

    pub fn encode(&self) -> String {
        format!(
            "{}:{}:{}",
            CONTROL_DOMAIN,
            self.direction.as_str(),
            self.token
        )
    }
}

/// Previous/next controls for the item at `index` out of `total`.
///
/// Previous is disabled on the first item, next on the last one.
pub fn navigation_controls(token: &str, index: usize, total: usize) -> Vec<Control> {
    vec![
        Control {
            id: ControlId::new(Direction::Previous, token).encode(),
            label: "Previous".to_owned(),
            disabled: index == 0,
        },
        Control {
            id: ControlId::new(Direction::Next, token).encode(),
            label: "Next".to_owned(),
            disabled: index + 1 >= total,
        },
    ]
}
