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

//! Saving and loading documents as raw JSON in a [`KeyValueStore`].

use tracing::debug;

use crate::content::ContentState;
use crate::error::PersistenceError;
use crate::raw;
use crate::storage::KeyValueStore;

/// The key documents are stored under unless configured otherwise.
pub const EDITOR_STATE_KEY: &str = "editorState";

/// Write `content` under `key`, replacing whatever was there.
pub fn save(
    store: &impl KeyValueStore,
    key: &str,
    content: &ContentState,
) -> Result<(), PersistenceError> {
    let json = raw::to_json(content)?;
    store.set(key, &json)?;
    debug!(key, bytes = json.len(), "saved document");
    Ok(())
}

/// Read the document stored under `key`. `Ok(None)` means nothing has been
/// saved yet.
pub fn load(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<ContentState>, PersistenceError> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    let content = raw::from_json(&json)?;
    debug!(key, blocks = content.blocks().len(), "loaded document");
    Ok(Some(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_type::BlockType;
    use crate::error::{SnapshotError, StorageError};
    use crate::inline_style::InlineStyle;
    use crate::modifier;
    use crate::selection::SelectionState;
    use crate::storage::MemoryStore;

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QuotaExceeded)
        }
    }

    fn sample() -> ContentState {
        let base = ContentState::create_from_text("Title\nbody text");
        let first = base.first_block().key().clone();
        let second = base.blocks()[1].key().clone();
        let content = modifier::set_block_type(
            &base,
            &SelectionState::collapsed(first, 0),
            BlockType::HeaderOne,
        );
        modifier::apply_inline_style(
            &content,
            &SelectionState::within_block(second, 5, 9),
            InlineStyle::Red,
        )
    }

    #[test]
    fn load_from_empty_store_is_none() {
        let store = MemoryStore::new();
        assert!(load(&store, EDITOR_STATE_KEY).unwrap().is_none());
    }

    #[test]
    fn save_then_load_keeps_text_types_and_styles() {
        let store = MemoryStore::new();
        let content = sample();
        save(&store, EDITOR_STATE_KEY, &content).unwrap();

        let loaded = load(&store, EDITOR_STATE_KEY).unwrap().unwrap();
        assert_eq!(loaded.blocks(), content.blocks());
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let store = MemoryStore::new();
        save(&store, EDITOR_STATE_KEY, &sample()).unwrap();
        save(
            &store,
            EDITOR_STATE_KEY,
            &ContentState::create_from_text("second"),
        )
        .unwrap();
        let loaded = load(&store, EDITOR_STATE_KEY).unwrap().unwrap();
        assert_eq!(loaded.plain_text("\n"), "second");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        let store =
            MemoryStore::new().with_entry(EDITOR_STATE_KEY, "{\"blocks\":");
        assert!(matches!(
            load(&store, EDITOR_STATE_KEY),
            Err(PersistenceError::Snapshot(SnapshotError::Json(_)))
        ));
    }

    // Only reachable while the invariant checks are compiled out.
    #[cfg(not(feature = "assert-invariants"))]
    #[test]
    fn dangling_entity_reference_is_dropped_so_the_save_loads_again() {
        use std::collections::BTreeMap;

        use crate::content::{BlockKey, CharacterMetadata, ContentBlock};
        use crate::entity::EntityKey;
        use crate::inline_style::StyleSet;

        let linked =
            CharacterMetadata::new(StyleSet::new(), Some(EntityKey::new("7")));
        let block = ContentBlock::with_characters(
            BlockKey::new("a"),
            BlockType::Unstyled,
            "ab",
            vec![linked, CharacterMetadata::default()],
        );
        let content = ContentState::from_blocks(vec![block], BTreeMap::new());

        let store = MemoryStore::new();
        save(&store, EDITOR_STATE_KEY, &content).unwrap();
        let loaded = load(&store, EDITOR_STATE_KEY).unwrap().unwrap();
        assert_eq!(loaded.plain_text("\n"), "ab");
        assert_eq!(loaded.first_block().entity_at(0), None);
        assert!(loaded.entity_map().is_empty());
    }

    #[test]
    fn storage_failures_are_reported() {
        assert!(matches!(
            save(&FullStore, EDITOR_STATE_KEY, &sample()),
            Err(PersistenceError::Storage(StorageError::QuotaExceeded))
        ));
    }
}
