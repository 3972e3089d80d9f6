//! Platform abstraction for formatting.
//!
//! The editor decides *which* command to run; a `FormattingBackend` decides
//! *how*. The browser implementation forwards to `document.execCommand`;
//! other platforms provide their own native rich-text primitive.

use crate::actions::FormattingCommand;

/// Executes formatting commands against the current selection.
///
/// Implementations must treat "no active selection inside an editable region"
/// as a silent no-op. Returning `false` signals that the platform did not apply
/// the command; callers log it and carry on.
pub trait FormattingBackend {
    /// Execute one command.
    fn execute(&self, command: &FormattingCommand) -> bool;

    /// Execute commands in order. Returns how many were applied.
    fn execute_all(&self, commands: &[FormattingCommand]) -> usize {
        commands.iter().filter(|cmd| self.execute(cmd)).count()
    }
}

impl<B: FormattingBackend + ?Sized> FormattingBackend for &B {
    fn execute(&self, command: &FormattingCommand) -> bool {
        (**self).execute(command)
    }
}

impl<B: FormattingBackend + ?Sized> FormattingBackend for std::rc::Rc<B> {
    fn execute(&self, command: &FormattingCommand) -> bool {
        (**self).execute(command)
    }
}
