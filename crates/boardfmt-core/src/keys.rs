//! Keyboard input types and shortcut resolution.
//!
//! Platform-agnostic key representation. The browser layer converts DOM
//! `KeyboardEvent`s into `KeyEvent`s; `resolve_keydown` decides what, if
//! anything, the page should do with them.

use smol_str::SmolStr;

use crate::format::FormatTable;

/// Key values for keyboard input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key.
    Character(SmolStr),

    Escape,

    /// Any other named key (`"Enter"`, `"ArrowLeft"`, `"F5"`, ...).
    Named(SmolStr),

    /// Unknown/unidentified key.
    Unidentified,
}

impl Key {
    /// Create a character key.
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }

    /// Parse a W3C `KeyboardEvent.key` value.
    pub fn from_key_value(value: &str) -> Self {
        match value {
            "" | "Unidentified" => Self::Unidentified,
            "Escape" | "Esc" => Self::Escape,
            other if other.chars().count() == 1 => Self::Character(other.into()),
            other => Self::Named(other.into()),
        }
    }

    /// The single character of a character key.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Character(s) => {
                let mut chars = s.chars();
                let c = chars.next()?;
                chars.next().is_none().then_some(c)
            }
            _ => None,
        }
    }
}

/// Modifier key state for a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };
}

/// A key combination for triggering an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::CTRL,
        }
    }
}

/// Where a key event was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// The reply body textarea. `quick_reply` is set when it lives in the
    /// floating quick reply panel.
    ReplyBody { quick_reply: bool },
    /// The page itself (`document.body`), nothing focused.
    PageBody,
    /// Any other element.
    Other,
}

impl KeyTarget {
    pub fn is_reply_body(&self) -> bool {
        matches!(self, Self::ReplyBody { .. })
    }
}

/// A keydown as seen by the shortcut resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub combo: KeyCombo,
    pub target: KeyTarget,
}

impl KeyEvent {
    pub fn new(combo: KeyCombo, target: KeyTarget) -> Self {
        Self { combo, target }
    }
}

/// What the page should do in response to a keydown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Format the reply body with the named table entry.
    ApplyFormat(SmolStr),
    /// Dismiss the quick reply panel.
    CloseQuickReply,
    /// Navigate to the board catalog.
    OpenCatalog,
}

impl PageAction {
    /// Whether the browser default for the triggering key must be suppressed.
    pub fn keydown_result(&self) -> KeydownResult {
        match self {
            Self::ApplyFormat(_) => KeydownResult::Handled,
            Self::CloseQuickReply | Self::OpenCatalog => KeydownResult::NotHandled,
        }
    }
}

/// Result of handling a keydown event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeydownResult {
    /// Event was handled, prevent default.
    Handled,
    /// Let the platform handle it.
    NotHandled,
}

/// Map a keydown to a page action.
///
/// - `ctrl+<key>` in the reply body applies the entry bound to `<key>`
/// - Escape in the quick reply body closes the panel
/// - a bare `c` with nothing focused opens the catalog
///
/// Shortcut keys are compared after ASCII lowercasing of the key value. Keys
/// produced by non-ASCII layouts never match; that is a known limitation, not
/// something this function tries to paper over.
pub fn resolve_keydown(event: &KeyEvent, table: &FormatTable) -> Option<PageAction> {
    let KeyCombo { key, modifiers } = &event.combo;

    match event.target {
        KeyTarget::ReplyBody { quick_reply } => {
            if modifiers.ctrl
                && let Some(c) = key.as_char()
                && let Some(entry) = table.by_shortcut(c)
            {
                return Some(PageAction::ApplyFormat(entry.name.clone()));
            }
            (quick_reply && *key == Key::Escape).then_some(PageAction::CloseQuickReply)
        }
        KeyTarget::PageBody => {
            let bare = !modifiers.ctrl && !modifiers.alt && !modifiers.shift;
            let is_c = key.as_char().is_some_and(|c| c.eq_ignore_ascii_case(&'c'));
            (bare && is_c).then_some(PageAction::OpenCatalog)
        }
        KeyTarget::Other => None,
    }
}
