//! WASM browser tests for boardfmt-js.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use boardfmt_js::{InstallOptions, JsFormattingTools, install_formatting_tools};
use web_sys::{Document, HtmlTextAreaElement, KeyboardEvent, KeyboardEventInit};

const PAGE: &str = r#"
<form id="post-form">
  <div class="body-wrap"><textarea name="body"></textarea></div>
</form>
"#;

fn setup() -> Document {
    let document = gloo_utils::document();
    document.body().unwrap().set_inner_html(PAGE);
    document
}

fn options(board: &str) -> InstallOptions {
    InstallOptions {
        board: board.into(),
        active_page: "thread".into(),
        host: Some("example.org".into()),
        formats: None,
    }
}

fn install(board: &str) -> JsFormattingTools {
    install_formatting_tools(options(board))
        .map_err(|_| "install failed")
        .unwrap()
        .unwrap()
}

fn reply_body(document: &Document) -> HtmlTextAreaElement {
    document
        .query_selector(r#"textarea[name="body"]"#)
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlTextAreaElement>()
        .unwrap()
}

fn ctrl_b() -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key("b");
    init.set_ctrl_key(true);
    init.set_bubbles(true);
    init.set_cancelable(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
}

#[wasm_bindgen_test]
fn test_reinstall_replaces_previous_toolbar() {
    let document = setup();
    let first = install("tech");
    let second = install("meta");

    assert!(!first.is_installed());
    assert!(second.is_installed());
    assert_eq!(second.board().as_deref(), Some("meta"));
    assert_eq!(document.query_selector_all(".tf-toolbar").unwrap().length(), 1);

    let el = reply_body(&document);
    el.set_value("hello");
    el.set_selection_range(0, 5).unwrap();
    el.dispatch_event(&ctrl_b()).unwrap();
    assert_eq!(el.value(), "'''hello'''");

    second.uninstall();
}

#[wasm_bindgen_test]
fn test_stale_handle_uninstall_is_noop() {
    let document = setup();
    let first = install("tech");
    let second = install("tech");

    first.uninstall();
    assert!(second.is_installed());
    assert!(document.query_selector(".tf-toolbar").unwrap().is_some());

    second.uninstall();
    assert!(!second.is_installed());
    assert!(document.query_selector(".tf-toolbar").unwrap().is_none());
}

#[wasm_bindgen_test]
fn test_catalog_page_installs_nothing() {
    let document = setup();
    let mut opts = options("tech");
    opts.active_page = "catalog".into();

    let tools = install_formatting_tools(opts)
        .map_err(|_| "install failed")
        .unwrap();
    assert!(tools.is_none());
    assert!(document.query_selector(".tf-toolbar").unwrap().is_none());
}
