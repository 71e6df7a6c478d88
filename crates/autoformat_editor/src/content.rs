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

//! The document model: an ordered list of blocks plus an entity map.
//!
//! Each block stores its text together with one [`CharacterMetadata`] per
//! `char`, so inline styles and entities are attached to characters rather
//! than kept as separate interval lists. All offsets in this module are
//! `char` offsets within a block.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::block_type::BlockType;
use crate::entity::{Entity, EntityKey};
use crate::inline_style::StyleSet;
use crate::selection::SelectionState;

/// Key of a block, unique within one [`ContentState`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base-36 key for a sequence number.
    pub(crate) fn for_index(mut index: usize) -> Self {
        const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut digits = Vec::new();
        loop {
            digits.push(DIGITS[index % 36]);
            index /= 36;
            if index == 0 {
                break;
            }
        }
        digits.reverse();
        Self(digits.into_iter().map(char::from).collect())
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Style and entity of a single character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterMetadata {
    pub style: StyleSet,
    pub entity: Option<EntityKey>,
}

impl CharacterMetadata {
    pub fn new(style: StyleSet, entity: Option<EntityKey>) -> Self {
        Self { style, entity }
    }
}

/// One paragraph-level unit of the document.
///
/// The block's contents sit behind an [`Arc`], so cloning a block is cheap
/// and history snapshots share every block an edit left alone.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentBlock(Arc<BlockData>);

#[derive(Clone, Debug, PartialEq)]
struct BlockData {
    key: BlockKey,
    block_type: BlockType,
    text: String,
    characters: Vec<CharacterMetadata>,
    depth: u32,
    data: Map<String, Value>,
}

impl ContentBlock {
    /// A block whose characters carry no style and no entity.
    pub fn new(
        key: BlockKey,
        block_type: BlockType,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let characters =
            vec![CharacterMetadata::default(); text.chars().count()];
        Self::with_characters(key, block_type, text, characters)
    }

    /// A block with explicit per-character metadata. `characters` must have
    /// one entry per `char` of `text`.
    pub fn with_characters(
        key: BlockKey,
        block_type: BlockType,
        text: impl Into<String>,
        characters: Vec<CharacterMetadata>,
    ) -> Self {
        let text = text.into();
        debug_assert_eq!(text.chars().count(), characters.len());
        Self(Arc::new(BlockData {
            key,
            block_type,
            text,
            characters,
            depth: 0,
            data: Map::new(),
        }))
    }

    fn data_mut(&mut self) -> &mut BlockData {
        Arc::make_mut(&mut self.0)
    }

    pub fn with_block_type(mut self, block_type: BlockType) -> Self {
        self.data_mut().block_type = block_type;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.data_mut().depth = depth;
        self
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data_mut().data = data;
        self
    }

    pub(crate) fn with_key(mut self, key: BlockKey) -> Self {
        self.data_mut().key = key;
        self
    }

    pub fn key(&self) -> &BlockKey {
        &self.0.key
    }

    pub fn block_type(&self) -> BlockType {
        self.0.block_type
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn characters(&self) -> &[CharacterMetadata] {
        &self.0.characters
    }

    pub fn depth(&self) -> u32 {
        self.0.depth
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.0.data
    }

    /// Length in `char`s.
    pub fn len(&self) -> usize {
        self.0.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.characters.is_empty()
    }

    /// Whether `self` and `other` are the same allocation, not just equal.
    pub fn shares_storage_with(&self, other: &ContentBlock) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Text from the start of the block up to `offset`.
    pub fn text_before(&self, offset: usize) -> &str {
        &self.0.text[..self.byte_offset(offset)]
    }

    /// Text in `[start, end)`.
    pub fn text_between(&self, start: usize, end: usize) -> &str {
        &self.0.text[self.byte_offset(start)..self.byte_offset(end)]
    }

    pub fn style_at(&self, offset: usize) -> StyleSet {
        self.0
            .characters
            .get(offset)
            .map(|c| c.style.clone())
            .unwrap_or_default()
    }

    pub fn entity_at(&self, offset: usize) -> Option<&EntityKey> {
        self.0.characters.get(offset).and_then(|c| c.entity.as_ref())
    }

    pub(crate) fn byte_offset(&self, offset: usize) -> usize {
        self.0
            .text
            .char_indices()
            .nth(offset)
            .map_or(self.0.text.len(), |(i, _)| i)
    }

    fn with_contents(
        &self,
        text: String,
        characters: Vec<CharacterMetadata>,
    ) -> Self {
        Self(Arc::new(BlockData {
            text,
            characters,
            key: self.0.key.clone(),
            block_type: self.0.block_type,
            depth: self.0.depth,
            data: self.0.data.clone(),
        }))
    }

    /// Replace `[start, end)` with `insert`, giving every inserted character
    /// `metadata`.
    pub(crate) fn splice(
        &self,
        start: usize,
        end: usize,
        insert: &str,
        metadata: &CharacterMetadata,
    ) -> Self {
        let start_byte = self.byte_offset(start);
        let end_byte = self.byte_offset(end);
        let old = &self.0.text;

        let mut text = String::with_capacity(
            old.len() - (end_byte - start_byte) + insert.len(),
        );
        text.push_str(&old[..start_byte]);
        text.push_str(insert);
        text.push_str(&old[end_byte..]);

        let mut characters = self.0.characters.clone();
        characters.splice(
            start..end,
            std::iter::repeat(metadata.clone()).take(insert.chars().count()),
        );

        self.with_contents(text, characters)
    }

    /// Split into `[0, offset)` and `[offset, len)`. Both halves keep this
    /// block's key, type, depth and data; the caller re-keys the tail.
    pub(crate) fn split_at(&self, offset: usize) -> (Self, Self) {
        let byte = self.byte_offset(offset);
        let head = self.with_contents(
            self.0.text[..byte].to_owned(),
            self.0.characters[..offset].to_vec(),
        );
        let tail = self.with_contents(
            self.0.text[byte..].to_owned(),
            self.0.characters[offset..].to_vec(),
        );
        (head, tail)
    }

    /// Append the text and characters of `other` to this block.
    pub(crate) fn concat(&self, other: &ContentBlock) -> Self {
        let mut joined = self.clone();
        let data = joined.data_mut();
        data.text.push_str(&other.0.text);
        data.characters.extend(other.0.characters.iter().cloned());
        joined
    }

    /// Apply `f` to the metadata of every character in `[start, end)`.
    pub(crate) fn map_characters(
        &self,
        start: usize,
        end: usize,
        f: impl Fn(&mut CharacterMetadata),
    ) -> Self {
        let mut block = self.clone();
        let characters = &mut block.data_mut().characters;
        let end = end.min(characters.len());
        for metadata in characters.iter_mut().take(end).skip(start) {
            f(metadata);
        }
        block
    }
}

/// The whole document, plus the selections before and after the edit that
/// produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentState {
    blocks: Vec<ContentBlock>,
    entity_map: BTreeMap<EntityKey, Entity>,
    selection_before: SelectionState,
    selection_after: SelectionState,
}

impl ContentState {
    /// A document holding a single empty unstyled block.
    pub fn create_empty() -> Self {
        Self::create_from_text("")
    }

    /// One unstyled block per line of `text`.
    pub fn create_from_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                ContentBlock::new(
                    BlockKey::for_index(i),
                    BlockType::Unstyled,
                    line.trim_end_matches('\r'),
                )
            })
            .collect();
        Self::from_blocks(blocks, BTreeMap::new())
    }

    /// Build a document from blocks. An empty list gets one empty block so
    /// that there is always somewhere to put the cursor.
    pub fn from_blocks(
        mut blocks: Vec<ContentBlock>,
        entity_map: BTreeMap<EntityKey, Entity>,
    ) -> Self {
        if blocks.is_empty() {
            blocks.push(ContentBlock::new(
                BlockKey::for_index(0),
                BlockType::Unstyled,
                "",
            ));
        }
        let selection =
            SelectionState::collapsed(blocks[0].key().clone(), 0);
        let content = Self {
            blocks,
            entity_map,
            selection_before: selection.clone(),
            selection_after: selection,
        };
        content.assert_invariants();
        content
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn first_block(&self) -> &ContentBlock {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &ContentBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key() == key)
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.key() == key)
    }

    pub fn block_before(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.block_index(key)?;
        index.checked_sub(1).map(|i| &self.blocks[i])
    }

    pub fn block_after(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.block_index(key)?;
        self.blocks.get(index + 1)
    }

    /// The text of all blocks joined with `delimiter`.
    pub fn plain_text(&self, delimiter: &str) -> String {
        self.blocks
            .iter()
            .map(ContentBlock::text)
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    pub fn has_text(&self) -> bool {
        self.blocks.len() > 1 || !self.blocks[0].is_empty()
    }

    pub fn entity(&self, key: &EntityKey) -> Option<&Entity> {
        self.entity_map.get(key)
    }

    pub fn entity_map(&self) -> &BTreeMap<EntityKey, Entity> {
        &self.entity_map
    }

    /// Register `entity` and return its key.
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        let mut n = self.entity_map.len();
        let key = loop {
            let candidate = EntityKey::new(n.to_string());
            if !self.entity_map.contains_key(&candidate) {
                break candidate;
            }
            n += 1;
        };
        self.entity_map.insert(key.clone(), entity);
        key
    }

    pub fn selection_before(&self) -> &SelectionState {
        &self.selection_before
    }

    pub fn selection_after(&self) -> &SelectionState {
        &self.selection_after
    }

    pub(crate) fn with_selection_before(
        mut self,
        selection: SelectionState,
    ) -> Self {
        self.selection_before = selection;
        self
    }

    pub(crate) fn with_selection_after(
        mut self,
        selection: SelectionState,
    ) -> Self {
        self.selection_after = selection;
        self
    }

    /// A block key not used by any block of this document.
    pub fn generate_key(&self) -> BlockKey {
        let used: HashSet<&BlockKey> =
            self.blocks.iter().map(ContentBlock::key).collect();
        (self.blocks.len()..)
            .map(BlockKey::for_index)
            .find(|k| !used.contains(k))
            .unwrap_or_else(|| BlockKey::for_index(usize::MAX))
    }

    pub(crate) fn set_block(&mut self, index: usize, block: ContentBlock) {
        self.blocks[index] = block;
    }

    /// Replace the blocks at `range` with `with`.
    pub(crate) fn replace_blocks(
        &mut self,
        range: RangeInclusive<usize>,
        with: Vec<ContentBlock>,
    ) {
        self.blocks.splice(range, with);
    }

    pub(crate) fn insert_block(&mut self, index: usize, block: ContentBlock) {
        self.blocks.insert(index, block);
    }

    /// Check the structural invariants, panicking if any is broken.
    pub fn explicitly_assert_invariants(&self) {
        assert!(!self.blocks.is_empty(), "document has no blocks");
        let mut seen = HashSet::new();
        for block in &self.blocks {
            assert!(seen.insert(block.key()), "duplicate key {}", block.key());
            assert_eq!(
                block.text().chars().count(),
                block.len(),
                "metadata length mismatch in block {}",
                block.key()
            );
            for entity in
                block.characters().iter().filter_map(|c| c.entity.as_ref())
            {
                assert!(
                    self.entity_map.contains_key(entity),
                    "block {} references missing entity {entity}",
                    block.key()
                );
            }
        }
    }

    pub(crate) fn assert_invariants(&self) {
        #[cfg(feature = "assert-invariants")]
        self.explicitly_assert_invariants();
    }
}
