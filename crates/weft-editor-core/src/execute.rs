//! Dispatch of user intents through a [`FormattingBackend`].
//!
//! These helpers sit between the decision logic (pickers, link prompt, key
//! handling) and the backend. They are generic so they run the same against
//! the DOM and against a recording backend in tests.

use crate::actions::{FormattingCommand, KeydownResult, Modifiers, handle_keydown};
use crate::link::{LinkIntent, classify_link_input};
use crate::picker::{FieldStyle, PickerKind, PickerOption};
use crate::platform::FormattingBackend;

/// Apply a picker option. Returns how many commands the backend applied.
pub fn apply_picker_option<B: FormattingBackend>(
    backend: &B,
    kind: PickerKind,
    option: &PickerOption,
    style: Option<&FieldStyle>,
) -> usize {
    let commands = option.resolve(kind, style);
    backend.execute_all(&commands)
}

/// Apply the answer to the link prompt.
///
/// `None` is a cancelled prompt and does nothing. Returns the intent that
/// was carried out.
pub fn apply_link_input<B: FormattingBackend>(
    backend: &B,
    input: Option<&str>,
) -> Option<LinkIntent> {
    let intent = classify_link_input(input?);
    let command = match &intent {
        LinkIntent::Create(url) => FormattingCommand::CreateLink(url.clone()),
        LinkIntent::Remove => FormattingCommand::Unlink,
    };
    backend.execute(&command);
    Some(intent)
}

/// Handle a keydown. Returns `true` when the default action must be
/// suppressed.
pub fn apply_keydown<B: FormattingBackend>(backend: &B, key: &str, modifiers: Modifiers) -> bool {
    match handle_keydown(key, modifiers) {
        KeydownResult::Handled(command) => {
            backend.execute(&command);
            true
        }
        KeydownResult::PassThrough => false,
    }
}
