//! WASM browser tests for weft-editor-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use web_sys::{
    DataTransfer, Document, Element, Event, File, FilePropertyBag, HtmlCanvasElement, HtmlElement,
    HtmlImageElement, HtmlInputElement, HtmlTextAreaElement,
};
use weft_editor_browser::{
    Catalog, Editor, EditorConfig, EditorError, FormattingCommand, ImageQuality, PickerKind,
    PickerOption, PickerPanel, PopoverManager, compress, current_selection_context,
    read_file_as_data_uri, render_panel,
};

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Append `html` inside a fresh wrapper div and return the wrapper.
fn fixture(html: &str) -> Element {
    let doc = document();
    let wrapper = doc.create_element("div").unwrap();
    wrapper.set_inner_html(html);
    doc.body().unwrap().append_child(&wrapper).unwrap();
    wrapper
}

fn by_id<T: JsCast>(id: &str) -> T {
    document()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<T>()
        .unwrap()
}

fn count(selector: &str) -> u32 {
    document().query_selector_all(selector).unwrap().length()
}

fn clear_selection() {
    let selection = web_sys::window().unwrap().get_selection().unwrap().unwrap();
    selection.remove_all_ranges().unwrap();
}

/// Let pending promise callbacks and timers run.
async fn settle(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

fn select_contents_of(el: &Element) {
    let range = document().create_range().unwrap();
    range.select_node_contents(el).unwrap();
    let selection = web_sys::window().unwrap().get_selection().unwrap().unwrap();
    selection.remove_all_ranges().unwrap();
    selection.add_range(&range).unwrap();
}

// === Popover manager ===

#[wasm_bindgen_test]
fn test_second_popover_replaces_first() {
    let wrapper = fixture(r#"<button id="pop-anchor">A</button>"#);
    let anchor: Element = by_id("pop-anchor");
    let doc = document();
    let popover = PopoverManager::new(doc.clone());

    let first = doc.create_element("div").unwrap();
    first.set_id("pop-first");
    popover.show(&anchor, &first, None, None, Vec::new()).unwrap();
    let second = doc.create_element("div").unwrap();
    second.set_id("pop-second");
    popover.show(&anchor, &second, Some(120), None, Vec::new()).unwrap();

    assert_eq!(count(".editor-popup"), 1);
    assert_eq!(count(".editor-popup-overlay"), 1);
    assert!(doc.get_element_by_id("pop-first").is_none());
    assert!(doc.get_element_by_id("pop-second").is_some());

    let panel = popover.panel().unwrap();
    assert_eq!(panel.style().get_property_value("width").unwrap(), "120px");

    assert!(popover.dismiss());
    assert_eq!(count(".editor-popup"), 0);
    assert_eq!(count(".editor-popup-overlay"), 0);
    wrapper.remove();
}

#[wasm_bindgen_test]
fn test_dismiss_without_popover_is_noop() {
    let popover = PopoverManager::new(document());
    let before = document().body().unwrap().inner_html();
    assert!(!popover.dismiss());
    assert!(!popover.dismiss());
    assert_eq!(document().body().unwrap().inner_html(), before);
}

#[wasm_bindgen_test]
fn test_overlay_click_dismisses() {
    let wrapper = fixture(r#"<button id="overlay-anchor">A</button>"#);
    let anchor: Element = by_id("overlay-anchor");
    let doc = document();
    let popover = PopoverManager::new(doc.clone());
    let content = doc.create_element("div").unwrap();
    popover.show(&anchor, &content, None, None, Vec::new()).unwrap();

    let overlay = doc
        .query_selector(".editor-popup-overlay")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    overlay.click();

    assert!(!popover.is_open());
    assert_eq!(count(".editor-popup"), 0);
    wrapper.remove();
}

// === Picker rendering ===

#[wasm_bindgen_test]
fn test_color_panel_markup() {
    let panel = PickerPanel::build(
        PickerKind::ForeColor,
        &Catalog::default_colors(),
        &Catalog::default_icons(),
    );
    let (content, listeners) =
        render_panel(&document(), &panel, Rc::new(|_: &PickerOption| {})).unwrap();
    assert_eq!(content.class_name(), "editor-flexbox");
    assert_eq!(
        content
            .query_selector_all(".editor-popup-button-color")
            .unwrap()
            .length(),
        80
    );
    assert_eq!(content.query_selector_all(".editor-center").unwrap().length(), 1);
    assert_eq!(listeners.len(), 81);
}

#[wasm_bindgen_test]
fn test_picker_option_mousedown() {
    let panel = PickerPanel::build(
        PickerKind::FontSize,
        &Catalog::default_colors(),
        &Catalog::default_icons(),
    );
    let picked = Rc::new(Cell::new(0u8));
    let seen = picked.clone();
    let (content, _listeners) = render_panel(
        &document(),
        &panel,
        Rc::new(move |option: &PickerOption| {
            if let PickerOption::FontSize(level) = option {
                seen.set(*level);
            }
        }),
    )
    .unwrap();

    let third = content.children().item(2).unwrap();
    third
        .dispatch_event(&Event::new("mousedown").unwrap())
        .unwrap();
    assert_eq!(picked.get(), 3);
}

// === Editor controller ===

#[wasm_bindgen_test]
fn test_editor_rejects_bad_ids() {
    let wrapper = fixture(r#"<div id="bad-a"></div>"#);
    assert!(matches!(
        Editor::new(["bad-a", "bad-missing"], EditorConfig::default()),
        Err(EditorError::MissingElement(id)) if id == "bad-missing"
    ));
    assert!(matches!(
        Editor::new(["bad-a", "bad-a"], EditorConfig::default()),
        Err(EditorError::DuplicateField(_))
    ));
    wrapper.remove();
}

#[wasm_bindgen_test]
fn test_fields_become_editable() {
    let wrapper = fixture(
        r#"<div id="init-a"><p>one</p><img src="data:image/gif;base64,R0lGODlhAQABAAAAACw="></div>
           <div id="init-b">two</div>"#,
    );
    let editor = Editor::new(["init-a", "init-b"], EditorConfig::default()).unwrap();

    assert_eq!(editor.field_ids(), vec!["init-a", "init-b"]);
    let a: HtmlElement = by_id("init-a");
    assert!(a.is_content_editable());
    let img = a
        .query_selector("img")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlImageElement>()
        .unwrap();
    assert_eq!(img.title(), "Double click to resize");
    assert!(img.ondblclick().is_some());
    assert_eq!(editor.content("init-b").as_deref(), Some("two"));
    assert_eq!(editor.content("nope"), None);
    wrapper.remove();
}

#[wasm_bindgen_test]
fn test_commands_without_selection_leave_fields_alone() {
    let wrapper = fixture(
        r#"<div id="nosel-a"><p>alpha</p></div><div id="nosel-b"><p>beta</p></div>"#,
    );
    let editor = Editor::new(["nosel-a", "nosel-b"], EditorConfig::default()).unwrap();
    clear_selection();

    let commands = [
        FormattingCommand::Bold,
        FormattingCommand::Italic,
        FormattingCommand::Underline,
        FormattingCommand::Strikethrough,
        FormattingCommand::ForeColor("ff0000".into()),
        FormattingCommand::HiliteColor("ffff00".into()),
        FormattingCommand::FontSize(5),
        FormattingCommand::InsertOrderedList,
        FormattingCommand::JustifyCenter,
        FormattingCommand::Indent,
        FormattingCommand::Superscript,
        FormattingCommand::CreateLink("https://example.com".into()),
        FormattingCommand::Unlink,
        FormattingCommand::InsertText("x".into()),
        FormattingCommand::InsertHtml("<hr>".into()),
    ];
    for command in &commands {
        editor.apply(command);
    }

    assert_eq!(editor.content("nosel-a").as_deref(), Some("<p>alpha</p>"));
    assert_eq!(editor.content("nosel-b").as_deref(), Some("<p>beta</p>"));
    wrapper.remove();
}

#[wasm_bindgen_test]
fn test_active_field_follows_selection() {
    let wrapper = fixture(
        r#"<div id="act-a"><p id="act-p">alpha</p></div><div id="act-b">beta</div><p id="act-out">outside</p>"#,
    );
    let editor = Editor::new(["act-a", "act-b"], EditorConfig::default()).unwrap();

    select_contents_of(&by_id::<Element>("act-p"));
    assert_eq!(editor.active_field().map(|f| f.id.to_string()).as_deref(), Some("act-a"));

    let ctx = current_selection_context(&web_sys::window().unwrap()).unwrap();
    assert_eq!(ctx.anchor.id(), "act-p");
    assert_eq!(ctx.editable_root.map(|e| e.id()).as_deref(), Some("act-a"));

    select_contents_of(&by_id::<Element>("act-out"));
    assert_eq!(editor.active_field(), None);

    clear_selection();
    assert_eq!(editor.active_field(), None);
    assert!(current_selection_context(&web_sys::window().unwrap()).is_none());
    wrapper.remove();
}

#[wasm_bindgen_test]
fn test_reset_color_tracks_field_style() {
    let wrapper = fixture(r#"<div id="reset-a" style="color: rgb(255, 0, 0)">text</div>"#);
    let editor = Editor::new(["reset-a"], EditorConfig::default()).unwrap();
    let field: HtmlElement = by_id("reset-a");

    select_contents_of(&field);
    let first = editor.picker_commands(PickerKind::ForeColor, &PickerOption::ResetColor);

    field.style().set_property("color", "rgb(0, 0, 255)").unwrap();
    select_contents_of(&field);
    let second = editor.picker_commands(PickerKind::ForeColor, &PickerOption::ResetColor);

    assert_eq!(first, vec![FormattingCommand::ForeColor("rgb(255, 0, 0)".into())]);
    assert_eq!(second, vec![FormattingCommand::ForeColor("rgb(0, 0, 255)".into())]);

    clear_selection();
    assert!(
        editor
            .picker_commands(PickerKind::ForeColor, &PickerOption::ResetColor)
            .is_empty()
    );
    wrapper.remove();
}

#[wasm_bindgen_test]
fn test_toolbar_picker_round_trip() {
    let wrapper = fixture(
        r#"<div id="rt-a"><p id="rt-p">size me</p></div>
           <button class="editor-btn-fontsize" id="rt-btn">A</button>"#,
    );
    let editor = Editor::new(["rt-a"], EditorConfig::default()).unwrap();
    by_id::<HtmlElement>("rt-a").focus().unwrap();
    select_contents_of(&by_id::<Element>("rt-p"));

    by_id::<HtmlElement>("rt-btn").click();
    assert!(editor.popover().is_open());
    assert_eq!(count(".editor-popup"), 1);
    assert_eq!(count(".editor-popup-overlay"), 1);

    let size_three = document()
        .query_selector_all(".editor-popup .editor-button")
        .unwrap()
        .item(2)
        .unwrap();
    size_three
        .dispatch_event(&Event::new("mousedown").unwrap())
        .unwrap();

    assert!(!editor.popover().is_open());
    assert_eq!(count(".editor-popup"), 0);
    assert_eq!(count(".editor-popup-overlay"), 0);
    assert!(!editor.dismiss_popover());
    assert!(
        editor
            .content("rt-a")
            .unwrap()
            .contains(r#"<font size="3">"#)
    );
    wrapper.remove();
}

#[wasm_bindgen_test]
fn test_shared_toolbar_acts_on_selected_editor_only() {
    let wrapper = fixture(
        r#"<div id="two-a"><p id="two-p">alpha</p></div><div id="two-b"><p>beta</p></div>
           <button class="editor-btn-bold" id="two-bold">B</button>
           <button class="editor-btn-color" id="two-color">C</button>"#,
    );
    let first = Editor::new(["two-a"], EditorConfig::default()).unwrap();
    let second = Editor::new(["two-b"], EditorConfig::default()).unwrap();
    by_id::<HtmlElement>("two-a").focus().unwrap();
    select_contents_of(&by_id::<Element>("two-p"));

    // A double toggle would leave the text unbolded.
    by_id::<HtmlElement>("two-bold").click();
    assert!(first.content("two-a").unwrap().contains("<b>alpha</b>"));
    assert_eq!(second.content("two-b").as_deref(), Some("<p>beta</p>"));

    by_id::<HtmlElement>("two-color").click();
    assert_eq!(count(".editor-popup"), 1);
    assert_eq!(count(".editor-popup-overlay"), 1);
    assert!(first.popover().is_open());
    assert!(!second.popover().is_open());

    assert!(first.dismiss_popover());
    wrapper.remove();
}

#[wasm_bindgen_test]
fn test_two_way_mirror_no_cascade() {
    let wrapper = fixture(
        r#"<div id="mirror-src"><p>start</p></div><textarea id="mirror-ta"></textarea>"#,
    );
    let editor = Editor::new(["mirror-src"], EditorConfig::default()).unwrap();
    let changes = Rc::new(Cell::new(0u32));
    let seen = changes.clone();
    editor.set_on_content_change(move |id, _html| {
        assert_eq!(id, "mirror-src");
        seen.set(seen.get() + 1);
    });

    editor
        .link_field_to_element("mirror-src", "mirror-ta", true)
        .unwrap();
    let textarea: HtmlTextAreaElement = by_id("mirror-ta");
    assert_eq!(textarea.value(), "<p>start</p>");

    textarea.set_value("<p>typed</p>");
    textarea
        .dispatch_event(&Event::new("keyup").unwrap())
        .unwrap();

    assert_eq!(editor.content("mirror-src").as_deref(), Some("<p>typed</p>"));
    assert_eq!(textarea.value(), "<p>typed</p>");
    assert_eq!(changes.get(), 1);
    wrapper.remove();
}

#[wasm_bindgen_test]
fn test_two_way_needs_textarea() {
    let wrapper = fixture(r#"<div id="pv-src">a</div><div id="pv-out"></div>"#);
    let editor = Editor::new(["pv-src"], EditorConfig::default()).unwrap();
    editor.link_field_to_element("pv-src", "pv-out", true).unwrap();

    let preview: HtmlElement = by_id("pv-out");
    assert_eq!(preview.inner_html(), "a");
    preview.set_inner_html("changed");
    preview.dispatch_event(&Event::new("input").unwrap()).unwrap();
    assert_eq!(editor.content("pv-src").as_deref(), Some("a"));

    assert!(matches!(
        editor.link_field_to_element("pv-src", "pv-missing", false),
        Err(EditorError::MissingElement(_))
    ));
    wrapper.remove();
}

// === Image pipeline ===

fn canvas_data_uri(width: u32, height: u32) -> String {
    let canvas = document()
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    canvas.to_data_url().unwrap()
}

#[wasm_bindgen_test]
async fn test_compress_scales_wide_image() {
    let source = canvas_data_uri(200, 100);
    let embed = compress(&source, Some(50), "image/png", ImageQuality::default())
        .await
        .unwrap();
    assert_eq!((embed.width, embed.height), (50, 25));
    assert_eq!(embed.mime_type, "image/png");
    assert!(embed.data_uri.starts_with("data:image/png;base64,"));
}

#[wasm_bindgen_test]
async fn test_compress_keeps_narrow_image() {
    let source = canvas_data_uri(40, 30);
    let embed = compress(&source, Some(500), "image/png", ImageQuality::default())
        .await
        .unwrap();
    assert_eq!((embed.width, embed.height), (40, 30));
}

#[wasm_bindgen_test]
async fn test_compress_rejects_garbage() {
    let result = compress(
        "data:image/png;base64,AAAA",
        None,
        "image/png",
        ImageQuality::default(),
    )
    .await;
    assert!(matches!(result, Err(EditorError::Decode(_))));
}

#[wasm_bindgen_test]
async fn test_read_file() {
    let parts = js_sys::Array::of1(&"hello".into());
    let bag = FilePropertyBag::new();
    bag.set_type("text/plain");
    let file = File::new_with_str_sequence_and_options(&parts, "hello.txt", &bag).unwrap();
    let uri = read_file_as_data_uri(&file).await.unwrap();
    assert_eq!(uri, "data:text/plain;base64,aGVsbG8=");
}

fn png_file(width: u32, height: u32) -> File {
    let uri = canvas_data_uri(width, height);
    let (_, encoded) = uri.split_once(',').unwrap();
    let binary = web_sys::window().unwrap().atob(encoded).unwrap();
    let bytes: Vec<u8> = binary.chars().map(|c| c as u8).collect();
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
    let bag = FilePropertyBag::new();
    bag.set_type("image/png");
    File::new_with_u8_array_sequence_and_options(&parts, "blank.png", &bag).unwrap()
}

#[wasm_bindgen_test]
async fn test_image_upload_inserts_embed() {
    let wrapper = fixture(
        r#"<div id="up-a"><p id="up-p">x</p></div>
           <input type="file" class="editor-btn-img" id="up-input">"#,
    );
    let config = EditorConfig {
        image_max_width: Some(50),
        ..EditorConfig::default()
    };
    let editor = Editor::new(["up-a"], config).unwrap();
    let changes = Rc::new(RefCell::new(Vec::<String>::new()));
    let seen = changes.clone();
    editor.set_on_content_change(move |_id, html| seen.borrow_mut().push(html.to_string()));

    let field: HtmlElement = by_id("up-a");
    field.focus().unwrap();
    select_contents_of(&by_id::<Element>("up-p"));

    let transfer = DataTransfer::new().unwrap();
    transfer.items().add_with_file(&png_file(200, 100)).unwrap();
    let input: HtmlInputElement = by_id("up-input");
    input.set_files(transfer.files().as_ref());
    input
        .dispatch_event(&Event::new("change").unwrap())
        .unwrap();

    let mut inserted = None;
    for _ in 0..50 {
        settle(20).await;
        inserted = field.query_selector("img").unwrap();
        if inserted.is_some() {
            break;
        }
    }
    let img = inserted
        .expect("image was not inserted")
        .dyn_into::<HtmlImageElement>()
        .unwrap();

    assert!(img.src().starts_with("data:image/png;base64,"));
    assert!(
        img.get_attribute("style")
            .unwrap_or_default()
            .contains("max-width: 100%")
    );
    assert_eq!(img.title(), "Double click to resize");
    assert!(img.ondblclick().is_some());

    let changes = changes.borrow();
    assert!(changes.last().is_some_and(|html| html.contains("<img")));
    drop(editor);
    wrapper.remove();
}
