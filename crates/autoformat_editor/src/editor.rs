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

//! The editor component: owns the current [`EditorState`], routes input
//! and key commands to it and saves it to a [`KeyValueStore`].

use std::str::FromStr;

use strum_macros::{AsRefStr, Display};
use tracing::{debug, info, warn};

use crate::autoformat;
use crate::config::EditorConfig;
use crate::content::BlockKey;
use crate::editor_state::EditorState;
use crate::error::{PersistenceError, SelectionError, SnapshotError};
use crate::key_binding::{default_key_binding, KeyCommand, KeyEvent};
use crate::persistence;
use crate::raw;
use crate::render;
use crate::rich_utils;
use crate::selection::SelectionState;
use crate::storage::KeyValueStore;

/// Whether an input or command was consumed by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum HandleResult {
    Handled,
    NotHandled,
}

/// What [`RichEditor::mount`] found in the store.
#[derive(Debug)]
pub enum RestoreOutcome {
    /// A saved document was loaded.
    Restored,
    /// Nothing was saved; the editor is empty.
    Empty,
    /// The saved document could not be read; the editor is empty.
    Discarded(PersistenceError),
}

pub struct RichEditor<S: KeyValueStore> {
    state: EditorState,
    store: S,
    config: EditorConfig,
}

impl<S: KeyValueStore> RichEditor<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, EditorConfig::default())
    }

    pub fn with_config(store: S, config: EditorConfig) -> Self {
        Self {
            state: EditorState::create_empty(),
            store,
            config,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Install `next` as the current state.
    pub fn set_state(&mut self, next: EditorState) {
        self.state = next;
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start from an empty document, then restore the saved one if there
    /// is one. A snapshot that cannot be read leaves the editor empty.
    pub fn mount(&mut self) -> RestoreOutcome {
        self.state = EditorState::create_empty();
        let key = self.config.storage_key.as_str();
        match persistence::load(&self.store, key) {
            Ok(Some(content)) => {
                info!(key, "restored saved document");
                self.state = EditorState::create_with_content(content);
                RestoreOutcome::Restored
            }
            Ok(None) => RestoreOutcome::Empty,
            Err(err) => {
                warn!(key, error = %err, "discarding saved document");
                RestoreOutcome::Discarded(err)
            }
        }
    }

    /// Run the named key command, e.g. `"bold"` or `"split-block"`.
    pub fn handle_key_command(&mut self, command: &str) -> HandleResult {
        let Ok(parsed) = KeyCommand::from_str(command) else {
            debug!(command, "unknown key command");
            return HandleResult::NotHandled;
        };
        match rich_utils::handle_key_command(&self.state, parsed) {
            Some(next) => {
                debug!(%parsed, "key command handled");
                self.state = next;
                HandleResult::Handled
            }
            None => HandleResult::NotHandled,
        }
    }

    /// Run the command bound to `event` by [`default_key_binding`].
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> HandleResult {
        match default_key_binding(event) {
            Some(command) => self.handle_key_command(command.as_ref()),
            None => HandleResult::NotHandled,
        }
    }

    /// Offer `chars` to the autoformat shortcuts before they are inserted.
    /// `Handled` means the characters were consumed and must not be
    /// inserted.
    pub fn handle_before_input(&mut self, chars: &str) -> HandleResult {
        match autoformat::handle_before_input(&self.state, chars) {
            Some(next) => {
                self.state = next;
                HandleResult::Handled
            }
            None => HandleResult::NotHandled,
        }
    }

    /// Insert `text` at the selection with the current inline style.
    pub fn insert_text(&mut self, text: &str) {
        self.state = rich_utils::insert_characters(&self.state, text);
    }

    /// Type `chars`: autoformat shortcuts first, plain insertion otherwise.
    /// Returns [`HandleResult::Handled`] when a shortcut consumed them.
    pub fn input(&mut self, chars: &str) -> HandleResult {
        let result = self.handle_before_input(chars);
        if result == HandleResult::NotHandled {
            self.insert_text(chars);
        }
        result
    }

    /// Move the selection. Offsets past the end of a block are clamped.
    pub fn select(
        &mut self,
        anchor_key: &str,
        anchor_offset: usize,
        focus_key: &str,
        focus_offset: usize,
    ) -> Result<(), SelectionError> {
        let selection = SelectionState::between(
            self.state.current_content(),
            &BlockKey::from(anchor_key),
            anchor_offset,
            &BlockKey::from(focus_key),
            focus_offset,
        )?;
        self.state = self.state.accept_selection(selection);
        Ok(())
    }

    /// Write the current document to the store.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let key = self.config.storage_key.as_str();
        persistence::save(&self.store, key, self.state.current_content())
            .inspect_err(|err| warn!(key, error = %err, "saving failed"))
    }

    pub fn to_html(&self) -> String {
        render::to_html(self.state.current_content(), &self.config.style_map)
    }

    pub fn to_raw_json(&self) -> Result<String, SnapshotError> {
        raw::to_json(self.state.current_content())
    }

    pub fn to_tree(&self) -> String {
        render::to_tree(&self.state)
    }
}
