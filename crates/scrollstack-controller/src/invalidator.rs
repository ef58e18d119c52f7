use std::cell::Cell;
use std::rc::Rc;

/// Handle a pane can hold to report that its content height changed.
///
/// Raising it from inside a lifecycle hook never re-enters the controller:
/// the flag is only read once the running pass has finished.
#[derive(Debug, Clone, Default)]
pub struct LayoutInvalidator {
    pending: Rc<Cell<bool>>,
}

impl LayoutInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&self) {
        self.pending.set(true);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    pub(crate) fn take(&self) -> bool {
        self.pending.replace(false)
    }
}
