//! Quantity counter for the add-to-cart control.

use serde::Serialize;

/// A positive item count. Starts at 1 and never drops below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const MIN: u32 = 1;

    pub fn new() -> Self {
        Self(Self::MIN)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Adds one.
    pub fn increase(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Subtracts one unless already at the floor. Returns whether it changed.
    pub fn decrease(&mut self) -> bool {
        if self.0 > Self::MIN {
            self.0 -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
