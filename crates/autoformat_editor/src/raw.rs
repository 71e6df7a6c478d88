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

//! The raw JSON document format.
//!
//! Styles and entities are stored as ranges over each block's text instead
//! of per character. Offsets and lengths count UTF-16 code units, which is
//! what browser strings index by, so a snapshot written here can be read by
//! any Draft-compatible editor and vice versa.

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::block_type::BlockType;
use crate::content::{BlockKey, CharacterMetadata, ContentBlock, ContentState};
use crate::entity::{Entity, EntityKey, Mutability};
use crate::error::SnapshotError;
use crate::inline_style::{InlineStyle, StyleSet};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDraftContentState {
    pub blocks: Vec<RawDraftContentBlock>,
    #[serde(default)]
    pub entity_map: BTreeMap<String, RawDraftEntity>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDraftContentBlock {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default = "unstyled")]
    pub block_type: String,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

fn unstyled() -> String {
    BlockType::Unstyled.to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDraftEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub mutability: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Convert a document to its raw form. Entities are renumbered from `0` in
/// order of first use; entities no character refers to are left out, and so
/// are references to entities missing from the map.
pub fn convert_to_raw(content: &ContentState) -> RawDraftContentState {
    let mut entity_order: Vec<&EntityKey> = Vec::new();
    let mut blocks = Vec::with_capacity(content.blocks().len());

    for block in content.blocks() {
        let utf16 = utf16_offsets(block.text());
        let span =
            |start: usize, end: usize| (utf16[start], utf16[end] - utf16[start]);

        let styles: StyleSet = block
            .characters()
            .iter()
            .flat_map(|c| c.style.iter().copied())
            .collect();
        let mut inline_style_ranges = Vec::new();
        for style in styles {
            let present =
                block.characters().iter().map(|c| c.style.contains(&style));
            for (start, end, ()) in runs(present.map(|p| p.then_some(()))) {
                let (offset, length) = span(start, end);
                inline_style_ranges.push(RawInlineStyleRange {
                    offset,
                    length,
                    style: style.to_string(),
                });
            }
        }

        let entities = block.characters().iter().map(|c| {
            c.entity.as_ref().filter(|key| content.entity(key).is_some())
        });
        let entity_ranges = runs(entities)
            .into_iter()
            .map(|(start, end, key)| {
                let index = match entity_order.iter().position(|k| *k == key) {
                    Some(index) => index,
                    None => {
                        entity_order.push(key);
                        entity_order.len() - 1
                    }
                };
                let (offset, length) = span(start, end);
                RawEntityRange {
                    offset,
                    length,
                    key: index as u32,
                }
            })
            .collect();

        blocks.push(RawDraftContentBlock {
            key: block.key().to_string(),
            text: block.text().to_owned(),
            block_type: block.block_type().to_string(),
            depth: block.depth(),
            inline_style_ranges,
            entity_ranges,
            data: block.data().clone(),
        });
    }

    let entity_map = entity_order
        .into_iter()
        .enumerate()
        .filter_map(|(index, key)| {
            let entity = content.entity(key)?;
            Some((
                index.to_string(),
                RawDraftEntity {
                    entity_type: entity.entity_type.clone(),
                    mutability: entity.mutability.to_string(),
                    data: entity.data.clone(),
                },
            ))
        })
        .collect();

    RawDraftContentState { blocks, entity_map }
}

/// Build a document from its raw form, rejecting anything that would not
/// make a well-formed [`ContentState`]. Blocks with an empty key are given
/// a fresh one.
pub fn convert_from_raw(
    raw: &RawDraftContentState,
) -> Result<ContentState, SnapshotError> {
    if raw.blocks.is_empty() {
        return Err(SnapshotError::NoBlocks);
    }

    let mut entity_map = BTreeMap::new();
    for (key, entity) in &raw.entity_map {
        let mutability = Mutability::from_str(&entity.mutability).map_err(
            |_| SnapshotError::UnknownMutability(entity.mutability.clone()),
        )?;
        entity_map.insert(
            EntityKey::new(key.as_str()),
            Entity {
                entity_type: entity.entity_type.clone(),
                mutability,
                data: entity.data.clone(),
            },
        );
    }

    let mut used_keys: HashSet<&str> = HashSet::new();
    for block in raw.blocks.iter().filter(|b| !b.key.is_empty()) {
        if !used_keys.insert(block.key.as_str()) {
            return Err(SnapshotError::DuplicateBlockKey(block.key.clone()));
        }
    }

    let mut next_generated = 0;
    let mut blocks = Vec::with_capacity(raw.blocks.len());
    for raw_block in &raw.blocks {
        let key = if raw_block.key.is_empty() {
            loop {
                let candidate = BlockKey::for_index(next_generated);
                next_generated += 1;
                if !used_keys.contains(candidate.as_str()) {
                    break candidate;
                }
            }
        } else {
            BlockKey::new(raw_block.key.as_str())
        };
        blocks.push(block_from_raw(key, raw_block, &entity_map)?);
    }

    Ok(ContentState::from_blocks(blocks, entity_map))
}

fn block_from_raw(
    key: BlockKey,
    raw: &RawDraftContentBlock,
    entity_map: &BTreeMap<EntityKey, Entity>,
) -> Result<ContentBlock, SnapshotError> {
    let block_type = BlockType::from_str(&raw.block_type)
        .map_err(|_| SnapshotError::UnknownBlockType(raw.block_type.clone()))?;

    let utf16 = utf16_offsets(&raw.text);
    let mut characters = vec![CharacterMetadata::default(); utf16.len() - 1];

    for range in &raw.inline_style_ranges {
        let style = InlineStyle::from_str(&range.style)
            .map_err(|_| SnapshotError::UnknownInlineStyle(range.style.clone()))?;
        let (start, end) =
            char_range(&key, &utf16, range.offset, range.length)?;
        for c in &mut characters[start..end] {
            c.style.insert(style);
        }
    }

    for range in &raw.entity_ranges {
        let entity = EntityKey::new(range.key.to_string());
        if !entity_map.contains_key(&entity) {
            return Err(SnapshotError::UnknownEntity {
                block: key.to_string(),
                entity: range.key,
            });
        }
        let (start, end) =
            char_range(&key, &utf16, range.offset, range.length)?;
        for c in &mut characters[start..end] {
            c.entity = Some(entity.clone());
        }
    }

    Ok(ContentBlock::with_characters(
        key,
        block_type,
        raw.text.as_str(),
        characters,
    )
    .with_depth(raw.depth)
    .with_data(raw.data.clone()))
}

/// Serialize a document as raw JSON.
pub fn to_json(content: &ContentState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&convert_to_raw(content))?)
}

/// Parse raw JSON into a document.
pub fn from_json(json: &str) -> Result<ContentState, SnapshotError> {
    let raw: RawDraftContentState = serde_json::from_str(json)?;
    convert_from_raw(&raw)
}

/// UTF-16 offset of each `char` of `text`, followed by the total length.
fn utf16_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(text.len() + 1);
    let mut position = 0;
    offsets.push(0);
    for c in text.chars() {
        position += c.len_utf16();
        offsets.push(position);
    }
    offsets
}

/// Map a UTF-16 range onto `char` indices. A boundary that falls inside a
/// surrogate pair is moved past that character.
fn char_range(
    key: &BlockKey,
    utf16: &[usize],
    offset: usize,
    length: usize,
) -> Result<(usize, usize), SnapshotError> {
    let block_len = utf16.last().copied().unwrap_or(0);
    let end = offset.checked_add(length).filter(|end| *end <= block_len);
    let Some(end) = end else {
        return Err(SnapshotError::RangeOutOfBounds {
            block: key.to_string(),
            offset,
            length,
            block_len,
        });
    };
    let to_char = |unit: usize| utf16.partition_point(|&o| o < unit);
    Ok((to_char(offset), to_char(end)))
}

/// Maximal runs of equal `Some` values, as `(start, end, value)`.
fn runs<T: PartialEq>(
    items: impl Iterator<Item = Option<T>>,
) -> Vec<(usize, usize, T)> {
    let mut out: Vec<(usize, usize, T)> = Vec::new();
    for (i, item) in items.enumerate() {
        let Some(value) = item else { continue };
        match out.last_mut() {
            Some((_, end, last)) if *end == i && *last == value => *end = i + 1,
            _ => out.push((i, i + 1, value)),
        }
    }
    out
}
