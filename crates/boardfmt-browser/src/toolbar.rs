//! Stylesheet and toolbar injection.

use boardfmt_core::{FormatTable, TOOLBAR_CLASS, TOOLBAR_CSS, render_toolbar_html};
use web_sys::{Document, Element, HtmlTextAreaElement, Node};

use crate::error::BrowserError;

/// Shared stylesheet some boards already generate; we append to it if present.
pub const GENERATED_STYLE_SELECTOR: &str = "style.generated-css";

/// Id of the `<style>` element created when no shared stylesheet exists.
pub const STYLE_ELEMENT_ID: &str = "boardfmt_css";

/// Add the toolbar stylesheet to the page. Repeated calls add it once.
pub fn inject_css(document: &Document) -> Result<(), BrowserError> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }

    if let Some(existing) = document.query_selector(GENERATED_STYLE_SELECTOR)? {
        let mut css = existing.inner_html();
        if css.contains(TOOLBAR_CSS) {
            return Ok(());
        }
        css.push_str(TOOLBAR_CSS);
        existing.set_inner_html(&css);
        return Ok(());
    }

    let style = document.create_element("style")?;
    style.set_attribute("type", "text/css")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_inner_html(TOOLBAR_CSS);

    let head = document.head().ok_or(BrowserError::MissingElement("head"))?;
    head.append_child(&style)?;
    Ok(())
}

/// Create the toolbar and insert it right before `textarea`.
pub fn mount_toolbar(
    document: &Document,
    textarea: &HtmlTextAreaElement,
    table: &FormatTable,
) -> Result<Element, BrowserError> {
    let toolbar = document.create_element("div")?;
    toolbar.class_list().add_1(TOOLBAR_CLASS)?;
    toolbar.set_inner_html(&render_toolbar_html(table));

    let parent = textarea
        .parent_element()
        .ok_or(BrowserError::MissingElement("reply form container"))?;
    let anchor: &Node = textarea;
    parent.insert_before(&toolbar, Some(anchor))?;

    Ok(toolbar)
}
