/// Value that remembers whether it was written since it was last observed.
///
/// Starts out dirty so the first observer always sees the initial value.
#[derive(Debug, Clone)]
pub(crate) struct Tracked<T> {
    value: T,
    changed: bool,
}

impl<T> Tracked<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            changed: true,
        }
    }

    pub(crate) fn get(&self) -> &T {
        &self.value
    }

    pub(crate) fn set(&mut self, value: T) {
        self.value = value;
        self.changed = true;
    }

    /// Returns the value if it changed since the previous call.
    pub(crate) fn take_change(&mut self) -> Option<&T> {
        if std::mem::take(&mut self.changed) {
            Some(&self.value)
        } else {
            None
        }
    }
}
