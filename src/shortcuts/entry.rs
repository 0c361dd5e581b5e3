use std::fmt;

/// Callback invoked when a shortcut entry matches a key press.
///
/// Callbacks run synchronously on the UI thread and must not call back
/// into the registry that owns them; components that need to react to a
/// shortcut send an application event instead.
pub type ShortcutCallback = Box<dyn FnMut()>;

/// Opaque identifier for a registered shortcut group.
///
/// Ids are generated monotonically and never reused within a process
/// lifetime, so a stale id held across re-registration can never alias a
/// newer group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shortcut-group-{}", self.0)
    }
}

/// A single key binding: a key token, the action it triggers, and a
/// human-readable description for the help display.
pub struct ShortcutEntry {
    key: String,
    callback: ShortcutCallback,
    description: String,
    disabled: bool,
}

impl ShortcutEntry {
    /// Create an enabled entry for `key`.
    ///
    /// Keys are matched case-insensitively; single characters and named
    /// keys ("enter", "escape", "?") are both accepted.
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        callback: impl FnMut() + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            callback: Box::new(callback),
            description: description.into(),
            disabled: false,
        }
    }

    /// Set the initial disabled state (entries start enabled).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether this entry matches an already-normalized key token.
    pub fn matches(&self, token: &str) -> bool {
        self.key.eq_ignore_ascii_case(token)
    }

    pub(crate) fn invoke(&mut self) {
        (self.callback)()
    }

    pub(crate) fn apply(&mut self, updates: ShortcutUpdate) {
        if let Some(disabled) = updates.disabled {
            self.disabled = disabled;
        }
        if let Some(description) = updates.description {
            self.description = description;
        }
        if let Some(callback) = updates.callback {
            self.callback = callback;
        }
    }
}

impl fmt::Debug for ShortcutEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutEntry")
            .field("key", &self.key)
            .field("description", &self.description)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// Partial update applied to a single entry via
/// [`ShortcutRegistry::update_entry`](super::ShortcutRegistry::update_entry).
///
/// Unset fields leave the entry untouched.
#[derive(Default)]
pub struct ShortcutUpdate {
    pub(crate) disabled: Option<bool>,
    pub(crate) description: Option<String>,
    pub(crate) callback: Option<ShortcutCallback>,
}

impl ShortcutUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn callback(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

/// An ordered bundle of entries registered together by one caller.
///
/// Groups are owned by the registry and referenced only by id from the
/// outside; entries keep their declaration order because dispatch order
/// is observable behavior.
pub struct ShortcutGroup {
    id: GroupId,
    entries: Vec<ShortcutEntry>,
    disabled: bool,
}

impl ShortcutGroup {
    pub(crate) fn new(id: GroupId, entries: Vec<ShortcutEntry>) -> Self {
        Self {
            id,
            entries,
            disabled: false,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn entries(&self) -> &[ShortcutEntry] {
        &self.entries
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [ShortcutEntry] {
        &mut self.entries
    }
}

impl fmt::Debug for ShortcutGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutGroup")
            .field("id", &self.id)
            .field("entries", &self.entries)
            .field("disabled", &self.disabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_matches_case_insensitively() {
        let entry = ShortcutEntry::new("A", "Add a student", || {});
        assert!(entry.matches("a"));
        assert!(entry.matches("A"));
        assert!(!entry.matches("b"));
    }

    #[test]
    fn test_entry_partial_update() {
        let mut entry = ShortcutEntry::new("a", "Add a student", || {});
        assert!(!entry.is_disabled());

        entry.apply(ShortcutUpdate::new().disabled(true));
        assert!(entry.is_disabled());
        assert_eq!(entry.description(), "Add a student");

        entry.apply(ShortcutUpdate::new().description("Add"));
        assert!(entry.is_disabled());
        assert_eq!(entry.description(), "Add");
    }

    #[test]
    fn test_group_id_display() {
        assert_eq!(GroupId::new(3).to_string(), "shortcut-group-3");
    }
}
