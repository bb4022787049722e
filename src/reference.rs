use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// A signed reference to a node in the [`Bdd`][crate::bdd::Bdd] storage.
///
/// The absolute value is the index of the node, the sign encodes logical negation
/// (complement edge). Zero is never a valid reference.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ref(i32);

impl Ref {
    pub const fn new(value: i32) -> Self {
        assert!(value != 0, "Ref must be non-zero");
        Self(value)
    }

    pub const fn positive(index: u32) -> Self {
        Self::new(index as i32)
    }

    pub const fn negative(index: u32) -> Self {
        Self::new(-(index as i32))
    }

    pub const fn is_negated(self) -> bool {
        self.0 < 0
    }

    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Return the signed internal representation of the reference.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Return the index of the referenced node, ignoring the sign.
    pub const fn index(self) -> usize {
        self.0.unsigned_abs() as usize
    }

    /// Return the non-negated reference to the same node.
    pub const fn regular(self) -> Self {
        Self(self.0.abs())
    }

    /// Negate the reference when `negate` is true.
    pub const fn negate_if(self, negate: bool) -> Self {
        if negate {
            self.negate()
        } else {
            self
        }
    }
}

impl Neg for Ref {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}",
            if self.is_negated() { "~" } else { "" },
            self.index()
        )
    }
}
