//! Widget identity.
//!
//! A [`WidgetId`] is derived from the source location of the widget call
//! plus an optional caller-supplied salt. The same call site with the same
//! salt yields the same ID every frame, which is how persistent state and
//! pointer capture reattach to a widget that is re-declared from scratch.
//!
//! # Caller contract
//!
//! A call site evaluated more than once per frame (a loop, a helper
//! function called twice) MUST pass a distinct salt per evaluation:
//!
//! ```rust,ignore
//! for (i, item) in items.iter().enumerate() {
//!     gui.button(gen_id!(i), item);
//! }
//! ```
//!
//! Without a salt the widgets resolve to the same ID and silently share
//! persistent state and interaction capture. That is not detected.

use std::fmt;
use std::hash::Hasher;
use std::panic::Location;

use siphasher::sip::SipHasher24;

/// Fixed SipHash keys so IDs are stable across runs and platforms.
const ID_KEY_0: u64 = 0x7367_7569_5f69_6430;
const ID_KEY_1: u64 = 0x6361_6c6c_5f73_6974;

/// Unique identifier for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Creates a widget ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Derives an ID from a call-site token and a salt.
    #[must_use]
    pub fn from_site(file: &str, line: u32, column: u32, salt: u64) -> Self {
        let mut hasher = SipHasher24::new_with_keys(ID_KEY_0, ID_KEY_1);
        hasher.write(file.as_bytes());
        hasher.write_u32(line);
        hasher.write_u32(column);
        hasher.write_u64(salt);
        Self(hasher.finish())
    }

    /// Derives an ID from the location of the calling function.
    ///
    /// Equivalent to [`gen_id!`](crate::gen_id) but usable from helper
    /// functions annotated with `#[track_caller]`.
    #[track_caller]
    #[must_use]
    pub fn from_caller(salt: u64) -> Self {
        let location = Location::caller();
        Self::from_site(location.file(), location.line(), location.column(), salt)
    }

    /// Derives a sub-ID, used for the parts of a compound widget
    /// (popup rows, scrollbar thumbs).
    #[must_use]
    pub fn child(self, salt: u64) -> Self {
        let mut hasher = SipHasher24::new_with_keys(ID_KEY_0, ID_KEY_1);
        hasher.write_u64(self.0);
        hasher.write_u64(salt);
        Self(hasher.finish())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}

/// Generates a [`WidgetId`] for the current source location.
///
/// `gen_id!()` uses salt 0; `gen_id!(salt)` mixes in any value convertible
/// to `u64` with `as`. See the [module docs](crate::id) for the salt contract.
#[macro_export]
macro_rules! gen_id {
    () => {
        $crate::WidgetId::from_site(file!(), line!(), column!(), 0)
    };
    ($salt:expr) => {
        $crate::WidgetId::from_site(file!(), line!(), column!(), ($salt) as u64)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn id_here(salt: u64) -> WidgetId {
        WidgetId::from_caller(salt)
    }

    #[test]
    fn test_same_site_same_salt_is_stable() {
        let a = WidgetId::from_site("src/app.rs", 10, 5, 0);
        let b = WidgetId::from_site("src/app.rs", 10, 5, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_salt_separates_loop_widgets() {
        let ids: Vec<_> = (0..64u64).map(|i| gen_id!(i)).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_distinct_sites_differ() {
        let a = gen_id!();
        let b = gen_id!();
        assert_ne!(a, b);
        assert_ne!(
            WidgetId::from_site("a.rs", 1, 1, 0),
            WidgetId::from_site("a.rs", 1, 2, 0)
        );
    }

    #[test]
    fn test_track_caller_uses_call_site() {
        let mut ids = Vec::new();
        for _ in 0..2 {
            ids.push(id_here(0));
        }
        // Same call site evaluated twice without salt collides by contract.
        assert_eq!(ids[0], ids[1]);
        assert_ne!(id_here(0), ids[0]);
    }

    #[test]
    fn test_child_ids_are_distinct() {
        let parent = WidgetId::new(42);
        assert_ne!(parent.child(0), parent.child(1));
        assert_ne!(parent.child(0), parent);
        assert_eq!(parent.child(7), parent.child(7));
    }
}
