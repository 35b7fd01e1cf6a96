use std::fmt;

use thiserror::Error;

/// A reference to a variable of the assembled program.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl VarId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The two domains the burning program needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Binary,
    /// Continuous, bounded below by zero.
    NonNegative,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("variable registered twice: {0}")]
    DuplicateVariable(String),
}
