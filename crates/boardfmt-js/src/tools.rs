//! Toolbar installation and the pure formatter wrapper.

use std::cell::{Cell, RefCell};

use boardfmt_browser::{BrowserError, FormattingTools};
use boardfmt_core::{FormatEntry, FormatTable, PageContext, PageKind, apply_format};
use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::types::{InstallOptions, JsFieldState, JsFormatDescriptor, JsFormatEntry};

/// The toolbar currently on the page, tagged with the install that made it.
struct Installed {
    generation: u64,
    tools: FormattingTools,
}

thread_local! {
    /// At most one toolbar per page. Both install entry points go through it.
    static INSTALLED: RefCell<Option<Installed>> = const { RefCell::new(None) };
    static GENERATION: Cell<u64> = const { Cell::new(0) };
}

fn js_error(err: BrowserError) -> JsError {
    JsError::new(&err.to_string())
}

fn window() -> Result<Window, JsError> {
    web_sys::window().ok_or_else(|| js_error(BrowserError::NoWindow))
}

fn document() -> Result<Document, JsError> {
    boardfmt_browser::document().map_err(js_error)
}

fn location_host(window: &Window) -> Result<String, JsError> {
    window
        .location()
        .host()
        .map_err(|e| js_error(BrowserError::from(e)))
}

/// Remove the installed toolbar, if any.
fn uninstall_current() {
    if let Some(previous) = INSTALLED.with(|slot| slot.borrow_mut().take()) {
        tracing::debug!(board = %previous.tools.context().board, "removing installed toolbar");
        previous.tools.uninstall();
    }
}

/// Replace whatever toolbar is installed with a fresh one.
///
/// Returns the generation of the new install, or `None` when the page has no
/// reply form.
fn install_exclusive(
    document: &Document,
    ctx: PageContext,
    table: FormatTable,
) -> Result<Option<u64>, BrowserError> {
    uninstall_current();

    let Some(tools) = FormattingTools::install(document, ctx, table)? else {
        return Ok(None);
    };
    let generation = GENERATION.with(|counter| {
        let next = counter.get() + 1;
        counter.set(next);
        next
    });
    INSTALLED.with(|slot| *slot.borrow_mut() = Some(Installed { generation, tools }));
    Ok(Some(generation))
}

/// Handle to an installed toolbar.
///
/// The toolbar lives until `uninstall()` is called or another install
/// replaces it; freeing the handle leaves it in place.
#[wasm_bindgen]
pub struct JsFormattingTools {
    generation: u64,
}

impl JsFormattingTools {
    fn with_installed<R>(&self, f: impl FnOnce(&Installed) -> R) -> Option<R> {
        INSTALLED.with(|slot| {
            slot.borrow()
                .as_ref()
                .filter(|installed| installed.generation == self.generation)
                .map(f)
        })
    }
}

#[wasm_bindgen]
impl JsFormattingTools {
    /// Whether this handle's toolbar is still installed.
    #[wasm_bindgen(getter, js_name = isInstalled)]
    pub fn is_installed(&self) -> bool {
        self.with_installed(|_| ()).is_some()
    }

    /// Board this toolbar was installed for.
    #[wasm_bindgen(getter)]
    pub fn board(&self) -> Option<String> {
        self.with_installed(|installed| installed.tools.context().board.to_string())
    }

    /// Remove the toolbar and detach its listeners. A no-op once another
    /// install has replaced it.
    pub fn uninstall(&self) {
        if self.is_installed() {
            uninstall_current();
        }
    }
}

/// Install the toolbar with explicit options.
///
/// Replaces any toolbar installed earlier, by either entry point. Returns
/// `undefined` when the page has no reply form.
#[wasm_bindgen(js_name = installFormattingTools)]
pub fn install_formatting_tools(
    options: InstallOptions,
) -> Result<Option<JsFormattingTools>, JsError> {
    let host = match options.host {
        Some(host) => host,
        None => location_host(&window()?)?,
    };
    let table = match options.formats {
        Some(formats) => build_table(formats)?,
        None => FormatTable::default(),
    };
    let ctx = PageContext::new(options.board, PageKind::parse(&options.active_page), host);

    let generation = install_exclusive(&document()?, ctx, table).map_err(js_error)?;
    Ok(generation.map(|generation| JsFormattingTools { generation }))
}

/// Install the toolbar from the page globals `board_name` and `active_page`.
///
/// Defers to `DOMContentLoaded` while the document is still loading. Replaces
/// any toolbar installed earlier, by either entry point.
#[wasm_bindgen(js_name = installFromPage)]
pub fn install_from_page() -> Result<(), JsError> {
    let document = document()?;
    if document.ready_state() == "loading" {
        tracing::debug!("document still loading, deferring toolbar install");
        EventListener::once(&document, "DOMContentLoaded", |_| {
            if let Err(e) = install_page_tools() {
                tracing::warn!("toolbar install failed: {:?}", e);
            }
        })
        .forget();
        return Ok(());
    }
    install_page_tools().map_err(js_error)
}

fn install_page_tools() -> Result<(), BrowserError> {
    let window = web_sys::window().ok_or(BrowserError::NoWindow)?;
    let document = window.document().ok_or(BrowserError::NoDocument)?;

    let board = page_global(&window, "board_name").unwrap_or_default();
    let page = page_global(&window, "active_page").unwrap_or_default();
    let host = window.location().host()?;
    let ctx = PageContext::new(board, PageKind::parse(&page), host);

    install_exclusive(&document, ctx, FormatTable::default())?;
    Ok(())
}

fn page_global(window: &Window, name: &str) -> Option<String> {
    js_sys::Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_string())
}

fn build_table(formats: Vec<JsFormatEntry>) -> Result<FormatTable, JsError> {
    let entries = formats
        .into_iter()
        .map(FormatEntry::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    FormatTable::new(entries).map_err(|e| JsError::new(&format!("Invalid format table: {}", e)))
}

/// The built-in format table.
#[wasm_bindgen(js_name = defaultFormats)]
pub fn default_formats() -> Result<JsValue, JsError> {
    let entries: Vec<JsFormatEntry> = FormatTable::default().iter().map(Into::into).collect();
    serde_wasm_bindgen::to_value(&entries)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Format the selection of `state` with `descriptor`.
///
/// Offsets in and out are UTF-16 code units, as `textarea.selectionStart`
/// reports them.
#[wasm_bindgen(js_name = applyFormat)]
pub fn apply_format_js(state: JsFieldState, descriptor: JsFormatDescriptor) -> JsFieldState {
    apply_format(&state.into(), &descriptor.into()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> JsFormatDescriptor {
        JsFormatDescriptor {
            prefix: "'''".into(),
            suffix: "'''".into(),
            multiline: false,
            exclusive_line: false,
        }
    }

    fn field(value: &str, start: usize, end: usize) -> JsFieldState {
        JsFieldState {
            value: value.into(),
            selection_start: start,
            selection_end: end,
            scroll_offset: 0,
        }
    }

    #[test]
    fn test_apply_format_takes_utf16_offsets() {
        // 🎉 is two UTF-16 units; "hi" sits at units 3..5.
        let out = apply_format_js(field("🎉 hi", 3, 5), bold());
        assert_eq!(out.value, "🎉 '''hi'''");
        assert_eq!((out.selection_start, out.selection_end), (11, 11));
    }

    #[test]
    fn test_apply_format_caret_after_astral_char() {
        let out = apply_format_js(field("🎉 ", 3, 3), bold());
        assert_eq!(out.value, "🎉 ''''''");
        // Between the delimiters: 2 + 1 + 3 units.
        assert_eq!(out.selection_start, 6);
    }

    #[test]
    fn test_apply_format_ascii_offsets_unchanged() {
        let mut state = field("say hello", 4, 9);
        state.scroll_offset = 42;
        let out = apply_format_js(state, bold());
        assert_eq!(out.value, "say '''hello'''");
        assert_eq!(out.selection_start, 15);
        assert_eq!(out.scroll_offset, 42);
    }
}
