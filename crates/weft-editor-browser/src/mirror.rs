//! DOM side of mirror bindings.

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlTextAreaElement};
use weft_editor_core::{
    ElementKind, LinkedMirror, MirrorDirection, MirrorEvent, Propagation, SmolStr,
};

/// An element content can be copied to or from.
#[derive(Debug, Clone)]
pub enum MirrorElement {
    TextArea(HtmlTextAreaElement),
    Rich(Element),
}

impl MirrorElement {
    pub fn new(el: Element) -> Self {
        match el.dyn_into::<HtmlTextAreaElement>() {
            Ok(textarea) => Self::TextArea(textarea),
            Err(el) => Self::Rich(el),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::TextArea(_) => ElementKind::TextArea,
            Self::Rich(_) => ElementKind::Rich,
        }
    }

    pub fn element(&self) -> &Element {
        match self {
            Self::TextArea(textarea) => textarea.as_ref(),
            Self::Rich(el) => el,
        }
    }

    pub fn content(&self) -> String {
        match self {
            Self::TextArea(textarea) => textarea.value(),
            Self::Rich(el) => el.inner_html(),
        }
    }

    pub fn set_content(&self, content: &str) {
        match self {
            Self::TextArea(textarea) => textarea.set_value(content),
            Self::Rich(el) => el.set_inner_html(content),
        }
    }
}

/// A live binding. Dropping it detaches its listeners.
pub struct MirrorBinding {
    mirror: LinkedMirror,
    _listeners: Vec<EventListener>,
}

impl MirrorBinding {
    pub fn mirror(&self) -> &LinkedMirror {
        &self.mirror
    }
}

/// Bind `target` to `source` and copy the current content across.
pub fn bind_mirror(source: Element, target: Element, requested: MirrorDirection) -> MirrorBinding {
    let source = MirrorElement::new(source);
    let target = MirrorElement::new(target);
    let mirror = LinkedMirror::new(
        SmolStr::new(source.element().id()),
        SmolStr::new(target.element().id()),
        target.kind(),
        requested,
    );

    perform(Propagation::SourceToTarget, &source, &target);

    let mut listeners = Vec::new();
    {
        let (mirror, src, tgt) = (mirror.clone(), source.clone(), target.clone());
        listeners.push(EventListener::new(
            source.element(),
            source.kind().change_event(),
            move |_| {
                for step in mirror.propagations(MirrorEvent::SourceChanged) {
                    perform(step, &src, &tgt);
                }
            },
        ));
    }
    if mirror.is_two_way() {
        let (mirror, src, tgt) = (mirror.clone(), source.clone(), target.clone());
        listeners.push(EventListener::new(
            target.element(),
            target.kind().change_event(),
            move |_| {
                for step in mirror.propagations(MirrorEvent::TargetKeyup) {
                    perform(step, &src, &tgt);
                }
            },
        ));
    }

    tracing::debug!(
        target: "weft::mirror",
        from = %mirror.source,
        to = %mirror.target,
        two_way = mirror.is_two_way(),
        "mirror bound"
    );
    MirrorBinding {
        mirror,
        _listeners: listeners,
    }
}

fn perform(step: Propagation, source: &MirrorElement, target: &MirrorElement) {
    match step {
        Propagation::SourceToTarget => target.set_content(&source.content()),
        Propagation::TargetToSource => source.set_content(&target.content()),
        Propagation::NotifySource => match Event::new("input") {
            Ok(event) => {
                if let Err(err) = source.element().dispatch_event(&event) {
                    tracing::warn!(target: "weft::mirror", ?err, "input dispatch failed");
                }
            }
            Err(err) => tracing::warn!(target: "weft::mirror", ?err, "could not create input event"),
        },
    }
}
