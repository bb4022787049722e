use std::fmt::{Display, Formatter};

/// Fatal resource errors of the node storage.
///
/// Contract violations (zero references, unordered children and so on) are not
/// represented here: they panic immediately.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CapacityError {
    /// Every slot of the storage is occupied.
    StorageFull { capacity: usize },
}

impl Display for CapacityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CapacityError::StorageFull { capacity } => {
                write!(f, "Storage is full: capacity {} exhausted", capacity)
            }
        }
    }
}

impl std::error::Error for CapacityError {}
