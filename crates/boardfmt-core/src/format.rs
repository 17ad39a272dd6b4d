//! Format descriptors and the toolbar format table.
//!
//! A `FormatDescriptor` is the pure data half of a markup style: the delimiters
//! and the line-span rules. A `FormatEntry` adds the presentation bits the
//! toolbar needs (label, tooltip, shortcut). Every entry is applied through the
//! same stateless routine, `crate::wrap::apply_format`.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Delimiters and line rules for one markup style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatDescriptor {
    /// Inserted before the selection.
    pub prefix: String,
    /// Inserted after the selection.
    pub suffix: String,
    /// The markup may span line breaks. When false, the delimiters are closed
    /// and reopened around every break inside the selection.
    #[serde(default)]
    pub multiline: bool,
    /// The markup must cover whole lines; the selection is widened to the
    /// surrounding line boundaries before wrapping.
    #[serde(default)]
    pub exclusive_line: bool,
}

impl FormatDescriptor {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            multiline: false,
            exclusive_line: false,
        }
    }

    /// Same prefix and suffix.
    pub fn symmetric(delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        Self::new(delimiter.clone(), delimiter)
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn exclusive_line(mut self) -> Self {
        self.exclusive_line = true;
        self
    }
}

/// One toolbar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatEntry {
    /// Stable identifier, used as the `data-format` attribute.
    pub name: SmolStr,
    /// Button label.
    pub display_text: SmolStr,
    /// Tooltip text. Entries without one get no tooltip at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<SmolStr>,
    pub options: FormatDescriptor,
    /// Bound to `ctrl+key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut_key: Option<char>,
}

impl FormatEntry {
    pub fn new(
        name: impl Into<SmolStr>,
        display_text: impl Into<SmolStr>,
        options: FormatDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            display_text: display_text.into(),
            alt_text: None,
            options,
            shortcut_key: None,
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<SmolStr>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    pub fn with_shortcut(mut self, key: char) -> Self {
        self.shortcut_key = Some(key);
        self
    }
}

/// Errors raised while building a `FormatTable`.
#[derive(thiserror::Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum FormatTableError {
    /// An entry has an empty name.
    #[error("format entry {index} has an empty name")]
    #[diagnostic(code(boardfmt::format::empty_name))]
    EmptyName { index: usize },

    /// Two entries share a name.
    #[error("duplicate format name `{name}`")]
    #[diagnostic(code(boardfmt::format::duplicate_name))]
    DuplicateName { name: SmolStr },

    /// An entry would render as an empty button.
    #[error("format `{name}` has no display text")]
    #[diagnostic(code(boardfmt::format::empty_display_text))]
    EmptyDisplayText { name: SmolStr },

    /// An entry would insert nothing before the selection.
    #[error("format `{name}` has an empty prefix")]
    #[diagnostic(code(boardfmt::format::empty_prefix))]
    EmptyPrefix { name: SmolStr },

    /// Shortcut is not a single ASCII letter or digit.
    #[error("format `{name}` uses shortcut {key:?}, expected an ASCII letter or digit")]
    #[diagnostic(
        code(boardfmt::format::invalid_shortcut),
        help("shortcuts are matched as ctrl+<key> against the lowercased key value")
    )]
    InvalidShortcut { name: SmolStr, key: char },

    /// Two entries claim the same shortcut.
    #[error("shortcut `{key}` is bound to both `{first}` and `{second}`")]
    #[diagnostic(code(boardfmt::format::duplicate_shortcut))]
    DuplicateShortcut {
        key: char,
        first: SmolStr,
        second: SmolStr,
    },
}

/// Ordered set of toolbar entries. Order is toolbar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FormatEntry>", into = "Vec<FormatEntry>")]
pub struct FormatTable {
    entries: Vec<FormatEntry>,
}

impl FormatTable {
    /// Validate and build a table. Shortcut keys are normalized to lowercase.
    pub fn new(entries: Vec<FormatEntry>) -> Result<Self, FormatTableError> {
        let mut entries = entries;

        for index in 0..entries.len() {
            let entry = &mut entries[index];
            if entry.name.is_empty() {
                return Err(FormatTableError::EmptyName { index });
            }
            if entry.display_text.is_empty() {
                return Err(FormatTableError::EmptyDisplayText {
                    name: entry.name.clone(),
                });
            }
            if entry.options.prefix.is_empty() {
                return Err(FormatTableError::EmptyPrefix {
                    name: entry.name.clone(),
                });
            }
            if let Some(key) = entry.shortcut_key {
                if !key.is_ascii_alphanumeric() {
                    return Err(FormatTableError::InvalidShortcut {
                        name: entry.name.clone(),
                        key,
                    });
                }
                entry.shortcut_key = Some(key.to_ascii_lowercase());
            }

            let entry = &entries[index];
            for earlier in &entries[..index] {
                if earlier.name == entry.name {
                    return Err(FormatTableError::DuplicateName {
                        name: entry.name.clone(),
                    });
                }
                if let (Some(a), Some(b)) = (earlier.shortcut_key, entry.shortcut_key)
                    && a == b
                {
                    return Err(FormatTableError::DuplicateShortcut {
                        key: a,
                        first: earlier.name.clone(),
                        second: entry.name.clone(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[FormatEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormatEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&FormatEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Find the entry bound to `key`, compared case-insensitively (ASCII).
    pub fn by_shortcut(&self, key: char) -> Option<&FormatEntry> {
        let key = key.to_ascii_lowercase();
        self.entries.iter().find(|e| e.shortcut_key == Some(key))
    }
}

impl Default for FormatTable {
    /// The built-in wiki-markup table.
    fn default() -> Self {
        let entries = vec![
            FormatEntry::new("bold", "B", FormatDescriptor::symmetric("'''"))
                .with_alt_text("bold")
                .with_shortcut('b'),
            FormatEntry::new("italics", "i", FormatDescriptor::symmetric("''"))
                .with_alt_text("italics")
                .with_shortcut('i'),
            FormatEntry::new("under", "U", FormatDescriptor::symmetric("__"))
                .with_alt_text("underline")
                .with_shortcut('u'),
            FormatEntry::new(
                "spoiler",
                "spoiler",
                FormatDescriptor::new("[spoiler]", "[/spoiler]"),
            )
            .with_alt_text("mark as spoiler")
            .with_shortcut('s'),
            FormatEntry::new(
                "code",
                "code",
                FormatDescriptor::new("[code]", "[/code]").multiline(),
            )
            .with_alt_text("code formatting"),
            FormatEntry::new("strike", "strike", FormatDescriptor::symmetric("~~"))
                .with_alt_text("strikethrough"),
            FormatEntry::new(
                "heading",
                "heading",
                FormatDescriptor::symmetric("==").exclusive_line(),
            )
            .with_alt_text("redtext"),
        ];

        Self { entries }
    }
}

impl TryFrom<Vec<FormatEntry>> for FormatTable {
    type Error = FormatTableError;

    fn try_from(entries: Vec<FormatEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<FormatTable> for Vec<FormatEntry> {
    fn from(table: FormatTable) -> Self {
        table.entries
    }
}

impl<'a> IntoIterator for &'a FormatTable {
    type Item = &'a FormatEntry;
    type IntoIter = std::slice::Iter<'a, FormatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
