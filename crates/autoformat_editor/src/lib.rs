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

//! A block-based rich-text editor model with markdown-style autoformat
//! shortcuts and key-value persistence.

pub mod autoformat;
mod block_type;
mod config;
mod content;
mod editor;
mod editor_state;
mod entity;
mod error;
mod history;
mod inline_style;
pub mod key_binding;
pub mod modifier;
pub mod persistence;
pub mod raw;
pub mod render;
pub mod rich_utils;
mod selection;
mod storage;
mod style_map;

pub use crate::autoformat::{AutoformatAction, AutoformatRule};
pub use crate::block_type::BlockType;
pub use crate::config::EditorConfig;
pub use crate::content::{
    BlockKey, CharacterMetadata, ContentBlock, ContentState,
};
pub use crate::editor::{HandleResult, RestoreOutcome, RichEditor};
pub use crate::editor_state::{ChangeType, EditorState};
pub use crate::entity::{Entity, EntityKey, Mutability};
pub use crate::error::{
    EntityError, PersistenceError, SelectionError, SnapshotError,
    StorageError,
};
pub use crate::history::History;
pub use crate::inline_style::{toggled, InlineStyle, StyleSet};
pub use crate::key_binding::{default_key_binding, KeyCommand, KeyEvent};
pub use crate::persistence::EDITOR_STATE_KEY;
pub use crate::raw::{
    RawDraftContentBlock, RawDraftContentState, RawDraftEntity,
    RawEntityRange, RawInlineStyleRange,
};
pub use crate::selection::SelectionState;
pub use crate::storage::{KeyValueStore, MemoryStore};
pub use crate::style_map::{CssDeclaration, StyleMap};
