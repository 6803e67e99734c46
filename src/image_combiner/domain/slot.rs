use super::error::DomainError;
use serde::Serialize;

/// One of the two fixed positions an image can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }
}

impl TryFrom<usize> for Slot {
    type Error = DomainError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Slot::First),
            1 => Ok(Slot::Second),
            other => Err(DomainError::InvalidInput(format!(
                "slot index must be 0 or 1, got {}",
                other
            ))),
        }
    }
}
