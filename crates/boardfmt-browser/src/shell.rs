//! Page shell: installs the toolbar and routes keyboard and click events.

use std::rc::Rc;

use boardfmt_core::{
    FormatTable, KeydownResult, PageAction, PageContext, resolve_keydown, wrap_field,
};
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent};

use crate::error::BrowserError;
use crate::events::{
    QUICK_REPLY_CLOSE_SELECTOR, REPLY_BODY_SELECTOR, key_event_from_dom,
    toolbar_button_from_event,
};
use crate::field::TextareaField;
use crate::toolbar::{inject_css, mount_toolbar};

/// An installed toolbar with its document listeners.
///
/// Dropping this detaches the listeners; `uninstall` also removes the
/// toolbar element.
pub struct FormattingTools {
    toolbar: Element,
    shell: Rc<Shell>,
    _keydown: EventListener,
    _click: EventListener,
}

impl FormattingTools {
    /// Install the formatting tools on `document`.
    ///
    /// Returns `Ok(None)` when the page has no reply form or no reply body
    /// textarea.
    pub fn install(
        document: &Document,
        ctx: PageContext,
        table: FormatTable,
    ) -> Result<Option<Self>, BrowserError> {
        if !ctx.toolbar_enabled() {
            tracing::debug!(page = %ctx.page, "no reply form on this page, skipping toolbar");
            return Ok(None);
        }

        let Some(textarea) = document
            .query_selector(REPLY_BODY_SELECTOR)?
            .and_then(TextareaField::from_element)
        else {
            tracing::debug!("reply body not found, skipping toolbar");
            return Ok(None);
        };

        inject_css(document)?;
        let toolbar = mount_toolbar(document, textarea.element(), &table)?;

        let shell = Rc::new(Shell {
            document: document.clone(),
            ctx,
            table,
        });

        let target: &EventTarget = document;
        let keydown = {
            let shell = shell.clone();
            EventListener::new_with_options(
                target,
                "keydown",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                        shell.on_keydown(event);
                    }
                },
            )
        };
        let click = {
            let shell = shell.clone();
            EventListener::new(target, "click", move |event| shell.on_click(event))
        };

        tracing::debug!(
            board = %shell.ctx.board,
            formats = shell.table.len(),
            "formatting toolbar installed"
        );

        Ok(Some(Self {
            toolbar,
            shell,
            _keydown: keydown,
            _click: click,
        }))
    }

    /// The mounted toolbar element.
    pub fn toolbar(&self) -> &Element {
        &self.toolbar
    }

    pub fn context(&self) -> &PageContext {
        &self.shell.ctx
    }

    pub fn table(&self) -> &FormatTable {
        &self.shell.table
    }

    /// Detach listeners and remove the toolbar from the page.
    pub fn uninstall(self) {
        self.toolbar.remove();
    }
}

struct Shell {
    document: Document,
    ctx: PageContext,
    table: FormatTable,
}

impl Shell {
    fn on_keydown(&self, event: &KeyboardEvent) {
        let key_event = key_event_from_dom(event, &self.document);
        let Some(action) = resolve_keydown(&key_event, &self.table) else {
            return;
        };

        if action.keydown_result() == KeydownResult::Handled {
            event.prevent_default();
        }
        if let Err(e) = self.perform(&action, event.target()) {
            tracing::warn!("{:?} failed: {}", action, e);
        }
    }

    fn perform(&self, action: &PageAction, target: Option<EventTarget>) -> Result<(), BrowserError> {
        match action {
            PageAction::ApplyFormat(name) => {
                let Some(entry) = self.table.get(name) else {
                    return Ok(());
                };
                let mut field = target
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(TextareaField::from_element);
                wrap_field(field.as_mut(), &entry.options);
            }
            PageAction::CloseQuickReply => {
                let close = self
                    .document
                    .query_selector(QUICK_REPLY_CLOSE_SELECTOR)?
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                match close {
                    Some(button) => button.click(),
                    None => tracing::debug!("quick reply close button not found"),
                }
            }
            PageAction::OpenCatalog => {
                let window = web_sys::window().ok_or(BrowserError::NoWindow)?;
                window.location().set_href(&self.ctx.catalog_url())?;
            }
        }
        Ok(())
    }

    fn on_click(&self, event: &Event) {
        let Some((button, name)) = toolbar_button_from_event(event) else {
            return;
        };
        let Some(entry) = self.table.get(&name) else {
            tracing::warn!(format = %name, "toolbar button has no matching format");
            return;
        };

        // Button -> toolbar -> reply form container.
        let mut field = button
            .parent_element()
            .and_then(|toolbar| toolbar.parent_element())
            .and_then(|container| TextareaField::find(&container, "textarea"));

        if wrap_field(field.as_mut(), &entry.options)
            && let Some(field) = field
            && let Err(e) = field.element().focus()
        {
            tracing::warn!("focus failed: {:?}", e);
        }
    }
}
