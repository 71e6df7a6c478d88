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

//! JavaScript bindings for the autoformat editor.
//!
//! The host page owns the contenteditable surface: it forwards
//! `beforeinput`, key commands and selection changes to an
//! [`EditorComponent`] and re-renders from [`EditorComponent::to_html`].

mod browser_storage;

use autoformat_editor::{
    default_key_binding, EditorConfig, HandleResult, KeyEvent, RestoreOutcome,
    RichEditor,
};
use wasm_bindgen::prelude::*;

pub use crate::browser_storage::BrowserStorage;

#[wasm_bindgen]
pub struct EditorComponent {
    inner: RichEditor<BrowserStorage>,
}

#[wasm_bindgen]
impl EditorComponent {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// An editor saving under `key` instead of `editorState`.
    #[wasm_bindgen(js_name = withStorageKey)]
    pub fn with_storage_key(key: &str) -> Self {
        Self::with_config(EditorConfig::default().with_storage_key(key))
    }

    /// Restore the saved document, if any. Returns a notice for the user
    /// when a saved document existed but could not be read.
    pub fn mount(&mut self) -> Option<String> {
        match self.inner.mount() {
            RestoreOutcome::Restored | RestoreOutcome::Empty => None,
            RestoreOutcome::Discarded(err) => {
                let notice =
                    format!("Saved document could not be restored: {err}");
                web_sys::console::warn_1(&JsValue::from_str(&notice));
                Some(notice)
            }
        }
    }

    /// Returns `"handled"` or `"not-handled"`.
    #[wasm_bindgen(js_name = handleKeyCommand)]
    pub fn handle_key_command(&mut self, command: &str) -> String {
        self.inner.handle_key_command(command).to_string()
    }

    /// Returns `"handled"` when the characters were consumed by a shortcut
    /// and must not be inserted by the host.
    #[wasm_bindgen(js_name = handleBeforeInput)]
    pub fn handle_before_input(&mut self, chars: &str) -> String {
        self.inner.handle_before_input(chars).to_string()
    }

    /// Type `chars` through the shortcuts; returns whether a shortcut
    /// fired.
    pub fn input(&mut self, chars: &str) -> bool {
        self.inner.input(chars) == HandleResult::Handled
    }

    /// The command name bound to a keyboard event, for use as the host's
    /// key binding function.
    #[wasm_bindgen(js_name = keyBindingFn)]
    pub fn key_binding(
        &self,
        key: &str,
        ctrl: bool,
        meta: bool,
        alt: bool,
        shift: bool,
    ) -> Option<String> {
        let event = KeyEvent {
            key: key.to_owned(),
            ctrl,
            meta,
            alt,
            shift,
        };
        default_key_binding(&event).map(|command| command.to_string())
    }

    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(&mut self, text: &str) {
        self.inner.insert_text(text);
    }

    pub fn select(
        &mut self,
        anchor_key: &str,
        anchor_offset: u32,
        focus_key: &str,
        focus_offset: u32,
    ) -> Result<(), JsError> {
        self.inner.select(
            anchor_key,
            anchor_offset as usize,
            focus_key,
            focus_offset as usize,
        )?;
        Ok(())
    }

    /// `[anchorKey, anchorOffset, focusKey, focusOffset]`.
    pub fn selection(&self) -> js_sys::Array {
        let selection = self.inner.state().selection();
        let out = js_sys::Array::new();
        out.push(&JsValue::from_str(selection.anchor_key().as_str()));
        out.push(&JsValue::from(selection.anchor_offset() as u32));
        out.push(&JsValue::from_str(selection.focus_key().as_str()));
        out.push(&JsValue::from(selection.focus_offset() as u32));
        out
    }

    /// Whether the host must move its DOM selection to [`Self::selection`].
    #[wasm_bindgen(js_name = mustForceSelection)]
    pub fn must_force_selection(&self) -> bool {
        self.inner.state().must_force_selection()
    }

    /// Write the document to `localStorage`.
    pub fn save(&self) -> Result<(), JsError> {
        self.inner.save().map_err(|err| {
            web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
            JsError::from(err)
        })
    }

    #[wasm_bindgen(js_name = toHtml)]
    pub fn to_html(&self) -> String {
        self.inner.to_html()
    }

    #[wasm_bindgen(js_name = toRawJson)]
    pub fn to_raw_json(&self) -> Result<String, JsError> {
        Ok(self.inner.to_raw_json()?)
    }

    #[wasm_bindgen(js_name = toTree)]
    pub fn to_tree(&self) -> String {
        self.inner.to_tree()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.state().can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.state().can_redo()
    }
}

impl EditorComponent {
    fn with_config(config: EditorConfig) -> Self {
        console_error_panic_hook::set_once();
        Self {
            inner: RichEditor::with_config(BrowserStorage::local(), config),
        }
    }
}

impl Default for EditorComponent {
    fn default() -> Self {
        Self::new()
    }
}
