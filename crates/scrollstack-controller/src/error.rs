use scrollstack_core::PaneId;
use thiserror::Error;

/// Misuse of a stack controller. These signal a contract violation by the
/// caller rather than a runtime condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    #[error("{0} is not registered with this stack")]
    UnknownPane(PaneId),

    #[error("{0} appears more than once in the pane list")]
    DuplicatePane(PaneId),

    #[error("pane index {index} out of bounds for a stack of {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, StackError>;
