//! Browser event extraction.
//!
//! Converts DOM keyboard and click events into the core's platform-agnostic
//! types.

use boardfmt_core::{Key, KeyCombo, KeyEvent, KeyTarget, Modifiers, TOOLBAR_BUTTON_SELECTOR};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent};

/// The reply body textarea.
pub const REPLY_BODY_SELECTOR: &str = r#"textarea[name="body"]"#;

/// The reply body inside the floating quick reply panel.
pub const QUICK_REPLY_BODY_SELECTOR: &str = r#"#quick-reply textarea[name="body"]"#;

/// Close button of the quick reply panel.
pub const QUICK_REPLY_CLOSE_SELECTOR: &str = "#quick-reply .close-btn";

/// Attribute carrying a toolbar button's format name.
pub const FORMAT_ATTRIBUTE: &str = "data-format";

/// Classify the target of a key event.
pub fn classify_key_target(target: Option<&EventTarget>, document: &Document) -> KeyTarget {
    let Some(target) = target else {
        return KeyTarget::Other;
    };

    if let Some(body) = document.body() {
        let target_value: &JsValue = target.as_ref();
        let body_value: &JsValue = body.as_ref();
        if target_value == body_value {
            return KeyTarget::PageBody;
        }
    }

    match target.dyn_ref::<Element>() {
        Some(el) if matches_selector(el, REPLY_BODY_SELECTOR) => KeyTarget::ReplyBody {
            quick_reply: matches_selector(el, QUICK_REPLY_BODY_SELECTOR),
        },
        _ => KeyTarget::Other,
    }
}

/// Extract modifier state from a keyboard event.
pub fn modifiers_from_event(event: &KeyboardEvent) -> Modifiers {
    Modifiers {
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        shift: event.shift_key(),
        meta: event.meta_key(),
    }
}

/// Build a core `KeyEvent` from a DOM keydown.
pub fn key_event_from_dom(event: &KeyboardEvent, document: &Document) -> KeyEvent {
    let combo = KeyCombo::with_modifiers(
        Key::from_key_value(&event.key()),
        modifiers_from_event(event),
    );
    let target = classify_key_target(event.target().as_ref(), document);
    KeyEvent::new(combo, target)
}

/// The toolbar button a click landed on, with its format name.
pub fn toolbar_button_from_event(event: &Event) -> Option<(Element, String)> {
    let button = event.target()?.dyn_into::<Element>().ok()?;
    if !matches_selector(&button, TOOLBAR_BUTTON_SELECTOR) {
        return None;
    }
    let name = button.get_attribute(FORMAT_ATTRIBUTE)?;
    if name.is_empty() {
        return None;
    }
    Some((button, name))
}

fn matches_selector(el: &Element, selector: &str) -> bool {
    el.matches(selector).unwrap_or(false)
}
