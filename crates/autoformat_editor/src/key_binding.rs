// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Named editing commands and the default keyboard mapping onto them.

use strum_macros::{AsRefStr, Display, EnumString};

/// A command the editor knows how to run. The string forms are the names a
/// host passes to [`crate::RichEditor::handle_key_command`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum KeyCommand {
    Undo,
    Redo,
    Delete,
    DeleteWord,
    Backspace,
    BackspaceWord,
    BackspaceToStartOfLine,
    Bold,
    Code,
    Italic,
    Strikethrough,
    Underline,
    SplitBlock,
}

/// The parts of a keyboard event that key bindings look at. `key` is the
/// DOM `KeyboardEvent.key` value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Ctrl on most platforms, Cmd on macOS.
    fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Map a key event to the command it triggers by default, if any.
pub fn default_key_binding(event: &KeyEvent) -> Option<KeyCommand> {
    match event.key.as_str() {
        "Enter" => Some(KeyCommand::SplitBlock),
        "Backspace" if event.meta => Some(KeyCommand::BackspaceToStartOfLine),
        "Backspace" if event.alt || event.ctrl => {
            Some(KeyCommand::BackspaceWord)
        }
        "Backspace" => Some(KeyCommand::Backspace),
        "Delete" if event.alt || event.ctrl => Some(KeyCommand::DeleteWord),
        "Delete" => Some(KeyCommand::Delete),
        key if event.has_command_modifier() => {
            command_shortcut(&key.to_lowercase(), event)
        }
        _ => None,
    }
}

fn command_shortcut(key: &str, event: &KeyEvent) -> Option<KeyCommand> {
    match key {
        "b" => Some(KeyCommand::Bold),
        "i" => Some(KeyCommand::Italic),
        "u" => Some(KeyCommand::Underline),
        "j" => Some(KeyCommand::Code),
        "x" if event.shift => Some(KeyCommand::Strikethrough),
        "z" if event.shift => Some(KeyCommand::Redo),
        "z" => Some(KeyCommand::Undo),
        "y" if event.ctrl => Some(KeyCommand::Redo),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn command_names_round_trip() {
        assert_eq!(KeyCommand::SplitBlock.to_string(), "split-block");
        assert_eq!(
            KeyCommand::from_str("backspace-to-start-of-line").unwrap(),
            KeyCommand::BackspaceToStartOfLine
        );
        assert!(KeyCommand::from_str("make-it-pretty").is_err());
    }

    #[test]
    fn formatting_shortcuts_need_a_command_modifier() {
        assert_eq!(
            default_key_binding(&KeyEvent::new("b").ctrl()),
            Some(KeyCommand::Bold)
        );
        assert_eq!(
            default_key_binding(&KeyEvent::new("I").meta()),
            Some(KeyCommand::Italic)
        );
        assert_eq!(default_key_binding(&KeyEvent::new("b")), None);
    }

    #[test]
    fn undo_and_redo_shortcuts() {
        assert_eq!(
            default_key_binding(&KeyEvent::new("z").meta()),
            Some(KeyCommand::Undo)
        );
        assert_eq!(
            default_key_binding(&KeyEvent::new("z").meta().shift()),
            Some(KeyCommand::Redo)
        );
        assert_eq!(
            default_key_binding(&KeyEvent::new("y").ctrl()),
            Some(KeyCommand::Redo)
        );
        assert_eq!(default_key_binding(&KeyEvent::new("y").meta()), None);
    }

    #[test]
    fn deletion_keys() {
        assert_eq!(
            default_key_binding(&KeyEvent::new("Backspace")),
            Some(KeyCommand::Backspace)
        );
        assert_eq!(
            default_key_binding(&KeyEvent::new("Backspace").alt()),
            Some(KeyCommand::BackspaceWord)
        );
        assert_eq!(
            default_key_binding(&KeyEvent::new("Backspace").meta()),
            Some(KeyCommand::BackspaceToStartOfLine)
        );
        assert_eq!(
            default_key_binding(&KeyEvent::new("Delete").ctrl()),
            Some(KeyCommand::DeleteWord)
        );
    }

    #[test]
    fn plain_characters_have_no_binding() {
        assert_eq!(default_key_binding(&KeyEvent::new("#")), None);
        assert_eq!(default_key_binding(&KeyEvent::new(" ")), None);
        assert_eq!(
            default_key_binding(&KeyEvent::new("Enter")),
            Some(KeyCommand::SplitBlock)
        );
    }
}
