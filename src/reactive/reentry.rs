use std::cell::Cell;

/// Scoped "in progress" marker over a `Cell<bool>`.
///
/// The flag is cleared on drop, including while unwinding from a panicking
/// observer or guard.
pub(crate) struct ReentryGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> ReentryGuard<'a> {
    /// Set the flag, or return `None` if it was already set.
    pub(crate) fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for ReentryGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_entry_is_refused_until_drop() {
        let flag = Cell::new(false);

        let guard = ReentryGuard::enter(&flag);
        assert!(guard.is_some());
        assert!(ReentryGuard::enter(&flag).is_none());
        assert!(flag.get());

        drop(guard);
        assert!(!flag.get());
        assert!(ReentryGuard::enter(&flag).is_some());
    }
}
