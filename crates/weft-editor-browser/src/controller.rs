//! The editor controller.
//!
//! `Editor` binds a set of existing elements as editable fields, wires the
//! toolbar controls found in the document, and keeps mirrors and the
//! content-change callback informed.
//!
//! All listeners hold a `Weak` back-reference, so dropping the last `Editor`
//! handle detaches everything. RefCell borrows are never held across
//! `execCommand`, which fires `input` synchronously.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, HtmlDocument, HtmlElement, HtmlImageElement, HtmlInputElement, KeyboardEvent,
    MouseEvent, Window,
};
use weft_editor_core::{
    EditorConfig, EditorError, FieldHandle, FieldSet, FieldState, FieldStyle, FormattingBackend,
    FormattingCommand, MirrorDirection, Modifiers, PickerKind, PickerOption, PickerPanel,
    ToolbarAction, ToolbarControl, active_field, apply_keydown, apply_link_input,
    apply_picker_option,
};

use crate::backend::ExecCommandBackend;
use crate::image::{ResizeOutcome, compress, read_file_as_data_uri, resize_interactive};
use crate::mirror::{MirrorBinding, bind_mirror};
use crate::pickers::render_panel;
use crate::popover::PopoverManager;
use crate::selection::selection_snapshot;

/// Content-change callback: `(field_id, inner_html)`.
pub type ContentCallback = Rc<dyn Fn(&str, &str)>;

struct EditorInner {
    window: Window,
    document: HtmlDocument,
    fields: FieldSet,
    /// Index-aligned with `fields`.
    elements: Vec<HtmlElement>,
    states: RefCell<Vec<FieldState>>,
    config: EditorConfig,
    backend: ExecCommandBackend,
    popover: PopoverManager,
    on_change: RefCell<Option<ContentCallback>>,
    listeners: RefCell<Vec<EventListener>>,
    mirrors: RefCell<Vec<MirrorBinding>>,
    /// Shared `ondblclick` handler for embedded images.
    resize_handler: Closure<dyn FnMut(MouseEvent)>,
}

/// A rich-text editor over one or more existing elements.
#[derive(Clone)]
pub struct Editor {
    inner: Rc<EditorInner>,
}

impl Editor {
    /// Bind the elements with the given ids and wire the toolbar.
    ///
    /// Fails if an id is repeated or has no element.
    pub fn new<I, S>(ids: I, config: EditorConfig) -> Result<Self, EditorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let window = web_sys::window().ok_or_else(|| EditorError::missing("window"))?;
        let document = window
            .document()
            .ok_or_else(|| EditorError::missing("document"))?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| EditorError::Dom("document is not an HtmlDocument".into()))?;

        let ids: Vec<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
        let fields = FieldSet::new(ids.iter().map(String::as_str))?;
        let elements = fields
            .iter()
            .map(|field| {
                document
                    .get_element_by_id(&field.id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    .ok_or_else(|| EditorError::missing(field.id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let inner = Rc::new_cyclic(|weak: &Weak<EditorInner>| {
            let resize_weak = weak.clone();
            let resize_handler = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                if let Some(inner) = resize_weak.upgrade() {
                    inner.resize_image(&event);
                }
            });
            EditorInner {
                states: RefCell::new(vec![FieldState::Idle; fields.len()]),
                backend: ExecCommandBackend::new(document.clone()),
                popover: PopoverManager::new(document.clone().into()),
                on_change: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                mirrors: RefCell::new(Vec::new()),
                window,
                document,
                fields,
                elements,
                config,
                resize_handler,
            }
        });

        let editor = Self { inner };
        editor.init_content();
        editor.init_buttons();
        tracing::debug!(
            target: "weft::editor",
            fields = editor.inner.fields.len(),
            "editor initialized"
        );
        Ok(editor)
    }

    /// Make every field editable and (re)attach image resize handlers.
    ///
    /// Field listeners are attached once; images are rescanned on every
    /// call so newly inserted images pick up the handler.
    pub fn init_content(&self) {
        EditorInner::init_content(&self.inner);
    }

    fn init_buttons(&self) {
        let inner = &self.inner;
        let mut listeners = Vec::new();
        for control in ToolbarControl::ALL {
            let Ok(nodes) = inner.document.query_selector_all(&control.selector()) else {
                continue;
            };
            for i in 0..nodes.length() {
                let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let weak = Rc::downgrade(inner);
                let anchor = el.clone();
                listeners.push(EventListener::new(&el, control.trigger_event(), move |event| {
                    if let Some(inner) = weak.upgrade() {
                        EditorInner::handle_control(&inner, control, &anchor, event);
                    }
                }));
            }
        }
        tracing::debug!(target: "weft::editor", controls = listeners.len(), "toolbar wired");
        inner.listeners.borrow_mut().extend(listeners);
    }

    /// Register the content-change callback, replacing any previous one.
    pub fn set_on_content_change(&self, callback: impl Fn(&str, &str) + 'static) {
        *self.inner.on_change.borrow_mut() = Some(Rc::new(callback));
    }

    /// Mirror field `editor_id` into the element `element_id`.
    ///
    /// Two-way binding is honored only for textarea targets.
    pub fn link_field_to_element(
        &self,
        editor_id: &str,
        element_id: &str,
        two_way: bool,
    ) -> Result<(), EditorError> {
        let source = self
            .inner
            .element_for(editor_id)
            .ok_or_else(|| EditorError::missing(editor_id))?;
        let target = self
            .inner
            .document
            .get_element_by_id(element_id)
            .ok_or_else(|| EditorError::missing(element_id))?;
        let binding = bind_mirror(
            source.clone().into(),
            target,
            MirrorDirection::from_flag(two_way),
        );
        self.inner.mirrors.borrow_mut().push(binding);
        Ok(())
    }

    /// Run a formatting command against the current selection.
    pub fn apply(&self, command: &FormattingCommand) -> bool {
        self.inner.backend.execute(command)
    }

    /// Commands the given picker option would run right now.
    pub fn picker_commands(&self, kind: PickerKind, option: &PickerOption) -> Vec<FormattingCommand> {
        let style = option
            .needs_field_style()
            .then(|| self.inner.active_field_style())
            .flatten();
        option.resolve(kind, style.as_ref())
    }

    /// Open the picker for `kind` below `anchor`.
    pub fn open_picker(&self, kind: PickerKind, anchor: &Element) -> Result<(), EditorError> {
        EditorInner::open_picker(&self.inner, kind, anchor)
    }

    /// Close the open picker, if any.
    pub fn dismiss_popover(&self) -> bool {
        self.inner.popover.dismiss()
    }

    pub fn popover(&self) -> &PopoverManager {
        &self.inner.popover
    }

    /// Prompt for a link target and apply it to the selection.
    pub fn link(&self) {
        self.inner.link();
    }

    /// Insert literal HTML at the selection and rescan images.
    pub fn insert_html(&self, html: &str) {
        self.inner.insert_html(html);
    }

    /// The field containing the selection.
    pub fn active_field(&self) -> Option<FieldHandle> {
        self.inner.active_field()
    }

    /// Current HTML of field `id`.
    pub fn content(&self, id: &str) -> Option<String> {
        self.inner.element_for(id).map(|el| el.inner_html())
    }

    pub fn field_ids(&self) -> Vec<String> {
        self.inner.fields.ids().map(str::to_string).collect()
    }

    pub fn field_state(&self, id: &str) -> Option<FieldState> {
        let index = self.inner.fields.get(id)?.index;
        self.inner.states.borrow().get(index).copied()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.inner.config
    }
}

impl EditorInner {
    fn init_content(this: &Rc<Self>) {
        for field in this.fields.iter() {
            let el = &this.elements[field.index];
            let idle = this.states.borrow()[field.index] == FieldState::Idle;
            if idle {
                el.set_content_editable("true");
                let listeners = Self::field_listeners(this, field.index, el);
                this.listeners.borrow_mut().extend(listeners);
                this.states.borrow_mut()[field.index] = FieldState::Editing;
            }
            this.init_images(el);
        }
    }

    fn field_listeners(this: &Rc<Self>, index: usize, el: &HtmlElement) -> [EventListener; 2] {
        let weak = Rc::downgrade(this);
        let keydown = EventListener::new_with_options(
            el,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let (Some(inner), Some(event)) = (weak.upgrade(), event.dyn_ref::<KeyboardEvent>())
                else {
                    return;
                };
                let modifiers = Modifiers {
                    ctrl: event.ctrl_key(),
                    alt: event.alt_key(),
                    shift: event.shift_key(),
                    meta: event.meta_key(),
                };
                if apply_keydown(&inner.backend, &event.key(), modifiers) {
                    event.prevent_default();
                }
            },
        );

        let weak = Rc::downgrade(this);
        let input = EventListener::new(el, "input", move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.notify_change(index);
            }
        });
        [keydown, input]
    }

    fn init_images(&self, el: &HtmlElement) {
        let Ok(images) = el.query_selector_all("img") else {
            return;
        };
        for i in 0..images.length() {
            if let Some(img) = images
                .item(i)
                .and_then(|n| n.dyn_into::<HtmlImageElement>().ok())
            {
                img.set_ondblclick(Some(self.resize_handler.as_ref().unchecked_ref()));
                img.set_title(&self.config.resize_hint);
            }
        }
    }

    fn notify_change(&self, index: usize) {
        // Clone out so the callback may re-register itself.
        let callback = self.on_change.borrow().clone();
        if let (Some(callback), Some(field), Some(el)) = (
            callback,
            self.fields.iter().nth(index),
            self.elements.get(index),
        ) {
            callback(field.id.as_str(), &el.inner_html());
        }
    }

    fn handle_control(this: &Rc<Self>, control: ToolbarControl, anchor: &Element, event: &Event) {
        // Toolbar controls are shared by every editor on the page; only the
        // one holding the selection reacts.
        if this.active_field().is_none() {
            tracing::trace!(
                target: "weft::editor",
                control = control.class_name(),
                "toolbar: selection elsewhere"
            );
            return;
        }
        tracing::trace!(target: "weft::editor", control = control.class_name(), "toolbar");
        match control.action() {
            ToolbarAction::Command(command) => {
                this.backend.execute(&command);
            }
            ToolbarAction::Picker(kind) => {
                if let Err(err) = Self::open_picker(this, kind, anchor) {
                    tracing::warn!(target: "weft::popover", ?kind, %err, "picker failed to open");
                }
            }
            ToolbarAction::Link => this.link(),
            ToolbarAction::ImageUpload => Self::ingest_image(this, event),
        }
    }

    fn open_picker(this: &Rc<Self>, kind: PickerKind, anchor: &Element) -> Result<(), EditorError> {
        let panel = PickerPanel::build(kind, &this.config.colors, &this.config.icons);
        let weak = Rc::downgrade(this);
        let on_pick = Rc::new(move |option: &PickerOption| {
            if let Some(inner) = weak.upgrade() {
                inner.pick(kind, option);
            }
        });
        let (content, listeners) = render_panel(&this.document, &panel, on_pick)?;
        this.popover.show(anchor, &content, None, None, listeners)
    }

    fn pick(&self, kind: PickerKind, option: &PickerOption) {
        let style = option
            .needs_field_style()
            .then(|| self.active_field_style())
            .flatten();
        let applied = apply_picker_option(&self.backend, kind, option, style.as_ref());
        tracing::trace!(target: "weft::editor", ?kind, ?option, applied, "picked");
        self.popover.dismiss();
    }

    fn link(&self) {
        let current = selection_snapshot(&self.window)
            .and_then(|s| s.current_link().map(str::to_string))
            .unwrap_or_default();
        match self
            .window
            .prompt_with_message_and_default("Enter the URL", &current)
        {
            Ok(input) => {
                apply_link_input(&self.backend, input.as_deref());
            }
            Err(err) => tracing::warn!(target: "weft::editor", ?err, "link prompt failed"),
        }
    }

    fn ingest_image(this: &Rc<Self>, event: &Event) {
        let Some(input) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let inner = this.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let mime = file.type_();
            let result = match read_file_as_data_uri(&file).await {
                Ok(source) => {
                    compress(
                        &source,
                        inner.config.image_max_width,
                        &mime,
                        inner.config.image_quality,
                    )
                    .await
                }
                Err(err) => Err(err),
            };
            match result {
                Ok(embed) => {
                    // Inserted where the selection is when the result arrives.
                    inner.insert_html(&embed.to_html());
                    inner.trigger_input(None);
                }
                Err(err) => {
                    tracing::warn!(target: "weft::image", file = %file.name(), %err, "image not inserted")
                }
            }
        });
    }

    fn insert_html(self: &Rc<Self>, html: &str) {
        self.backend
            .execute(&FormattingCommand::InsertHtml(html.to_string()));
        Self::init_content(self);
    }

    /// Dispatch a synthetic `input` on `el`, or on the active field.
    fn trigger_input(&self, el: Option<&HtmlElement>) {
        let target = match el {
            Some(el) => Some(el.clone()),
            None => self
                .active_field()
                .and_then(|f| self.elements.get(f.index).cloned()),
        };
        let Some(target) = target else {
            return;
        };
        match Event::new("input") {
            Ok(event) => {
                if let Err(err) = target.dispatch_event(&event) {
                    tracing::warn!(target: "weft::editor", ?err, "input dispatch failed");
                }
            }
            Err(err) => tracing::warn!(target: "weft::editor", ?err, "could not create input event"),
        }
    }

    fn resize_image(&self, event: &MouseEvent) {
        let Some(img) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())
        else {
            return;
        };
        if let ResizeOutcome::Resized(_) = resize_interactive(&self.window, &img) {
            let node: &web_sys::Node = &img;
            let owner = self.elements.iter().find(|el| el.contains(Some(node)));
            self.trigger_input(owner);
        }
    }

    fn active_field(&self) -> Option<FieldHandle> {
        active_field(selection_snapshot(&self.window).as_ref(), &self.fields)
    }

    fn active_field_style(&self) -> Option<FieldStyle> {
        let field = self.active_field()?;
        let el = self.elements.get(field.index)?;
        let style = self.window.get_computed_style(el).ok().flatten()?;
        Some(FieldStyle {
            color: style.get_property_value("color").ok()?.into(),
            background_color: style.get_property_value("background-color").ok()?.into(),
        })
    }

    fn element_for(&self, id: &str) -> Option<&HtmlElement> {
        self.elements.get(self.fields.get(id)?.index)
    }
}

impl Drop for EditorInner {
    fn drop(&mut self) {
        self.popover.dismiss();
        for el in &self.elements {
            let Ok(images) = el.query_selector_all("img") else {
                continue;
            };
            for i in 0..images.length() {
                if let Some(img) = images
                    .item(i)
                    .and_then(|n| n.dyn_into::<HtmlImageElement>().ok())
                {
                    img.set_ondblclick(None);
                }
            }
        }
    }
}
