/// Fixed mapping from a user-chosen selector string to a typed value.
///
/// Matching is exact: selectors are stored verbatim by the settings screens,
/// so `" light"` or `"Light"` are unknown selectors, not aliases.
#[derive(Clone, Copy, Debug)]
pub struct SelectorTable<T: 'static> {
    entries: &'static [(&'static str, T)],
    fallback: T,
}

impl<T: Copy> SelectorTable<T> {
    pub const fn new(entries: &'static [(&'static str, T)], fallback: T) -> Self {
        Self { entries, fallback }
    }

    pub fn lookup(&self, selector: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(key, _)| *key == selector)
            .map(|(_, value)| *value)
    }

    /// Resolves a stored selector, falling back for missing or unknown input.
    pub fn resolve(&self, selector: Option<&str>) -> T {
        selector
            .and_then(|selector| self.lookup(selector))
            .unwrap_or(self.fallback)
    }
}
