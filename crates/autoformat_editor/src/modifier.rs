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

//! Content transforms: text replacement, range removal, block splitting,
//! block types and inline styles.
//!
//! Every function takes a [`ContentState`] and a [`SelectionState`] and
//! returns a new [`ContentState`]; the input is never modified. The result
//! records the selection the edit was made with (`selection_before`) and
//! where the cursor ends up (`selection_after`).

use crate::block_type::BlockType;
use crate::content::{CharacterMetadata, ContentState};
use crate::entity::EntityKey;
use crate::error::EntityError;
use crate::inline_style::{InlineStyle, StyleSet};
use crate::selection::SelectionState;

/// Block indices covered by `selection`, or `None` if it refers to a block
/// that is not in `content`.
fn block_range(
    content: &ContentState,
    selection: &SelectionState,
) -> Option<(usize, usize)> {
    let start = content.block_index(selection.start_key())?;
    let end = content.block_index(selection.end_key())?;
    (start <= end).then_some((start, end))
}

/// Remove the selected text. Removing across blocks joins the first and
/// last block, keeping the first block's key and type.
pub fn remove_range(
    content: &ContentState,
    selection: &SelectionState,
) -> ContentState {
    let cursor = selection.collapse_to_start();
    let mut next = content.clone();

    if !selection.is_collapsed() {
        if let Some((start_index, end_index)) = block_range(content, selection)
        {
            let blocks = content.blocks();
            let start_offset =
                selection.start_offset().min(blocks[start_index].len());
            let end_offset =
                selection.end_offset().min(blocks[end_index].len());

            if start_index == end_index {
                let block = blocks[start_index].splice(
                    start_offset,
                    end_offset,
                    "",
                    &CharacterMetadata::default(),
                );
                next.set_block(start_index, block);
            } else {
                let (head, _) = blocks[start_index].split_at(start_offset);
                let (_, tail) = blocks[end_index].split_at(end_offset);
                next.replace_blocks(
                    start_index..=end_index,
                    vec![head.concat(&tail)],
                );
            }
        }
    }

    next.assert_invariants();
    next.with_selection_before(selection.clone())
        .with_selection_after(cursor)
}

/// Insert `text` at a collapsed `selection`, giving the new characters
/// `style` and `entity`. A range selection is removed first.
pub fn insert_text(
    content: &ContentState,
    selection: &SelectionState,
    text: &str,
    style: &StyleSet,
    entity: Option<EntityKey>,
) -> ContentState {
    let removed = remove_range(content, selection);
    let cursor = removed.selection_after().clone();

    let Some(index) = removed.block_index(cursor.start_key()) else {
        return removed;
    };
    let block = &removed.blocks()[index];
    let offset = cursor.start_offset().min(block.len());
    let metadata = CharacterMetadata::new(style.clone(), entity);
    let updated = block.splice(offset, offset, text, &metadata);
    let key = updated.key().clone();

    let mut next = removed;
    next.set_block(index, updated);
    next.assert_invariants();
    next.with_selection_before(selection.clone())
        .with_selection_after(SelectionState::collapsed(
            key,
            offset + text.chars().count(),
        ))
}

/// Replace the selected range with `text`.
pub fn replace_text(
    content: &ContentState,
    selection: &SelectionState,
    text: &str,
    style: &StyleSet,
    entity: Option<EntityKey>,
) -> ContentState {
    insert_text(content, selection, text, style, entity)
}

/// Split the block at the cursor into two. The new block after the cursor
/// keeps the type of the split block, except that splitting a header at its
/// end starts an unstyled paragraph.
pub fn split_block(
    content: &ContentState,
    selection: &SelectionState,
) -> ContentState {
    let removed = remove_range(content, selection);
    let cursor = removed.selection_after().clone();

    let Some(index) = removed.block_index(cursor.start_key()) else {
        return removed;
    };
    let block = &removed.blocks()[index];
    let offset = cursor.start_offset().min(block.len());
    let (head, tail) = block.split_at(offset);

    let tail_type = if block.block_type().is_header() && tail.is_empty() {
        BlockType::Unstyled
    } else {
        block.block_type()
    };
    let new_key = removed.generate_key();
    let tail = tail.with_key(new_key.clone()).with_block_type(tail_type);

    let mut next = removed;
    next.set_block(index, head);
    next.insert_block(index + 1, tail);
    next.assert_invariants();
    next.with_selection_before(selection.clone())
        .with_selection_after(SelectionState::collapsed(new_key, 0))
}

/// Set the type of every block touched by `selection`.
pub fn set_block_type(
    content: &ContentState,
    selection: &SelectionState,
    block_type: BlockType,
) -> ContentState {
    let mut next = content.clone();
    if let Some((start, end)) = block_range(content, selection) {
        for (index, block) in
            content.blocks().iter().enumerate().take(end + 1).skip(start)
        {
            next.set_block(index, block.clone().with_block_type(block_type));
        }
    }
    next.with_selection_before(selection.clone())
        .with_selection_after(selection.clone())
}

/// Apply `f` to the metadata of every selected character.
fn modify_characters(
    content: &ContentState,
    selection: &SelectionState,
    f: impl Fn(&mut CharacterMetadata),
) -> ContentState {
    let mut next = content.clone();
    if let Some((start_index, end_index)) = block_range(content, selection) {
        for index in start_index..=end_index {
            let block = &content.blocks()[index];
            let from = if index == start_index {
                selection.start_offset()
            } else {
                0
            };
            let to = if index == end_index {
                selection.end_offset()
            } else {
                block.len()
            };
            next.set_block(index, block.map_characters(from, to, &f));
        }
    }
    next.assert_invariants();
    next.with_selection_before(selection.clone())
        .with_selection_after(selection.clone())
}

pub fn apply_inline_style(
    content: &ContentState,
    selection: &SelectionState,
    style: InlineStyle,
) -> ContentState {
    modify_characters(content, selection, |c| {
        c.style.insert(style);
    })
}

pub fn remove_inline_style(
    content: &ContentState,
    selection: &SelectionState,
    style: InlineStyle,
) -> ContentState {
    modify_characters(content, selection, |c| {
        c.style.remove(&style);
    })
}

/// Attach `entity` to the selected characters, or detach any entity when
/// `entity` is `None`. The key must already be in the entity map.
pub fn apply_entity(
    content: &ContentState,
    selection: &SelectionState,
    entity: Option<EntityKey>,
) -> Result<ContentState, EntityError> {
    if let Some(key) = &entity {
        if content.entity(key).is_none() {
            return Err(EntityError::UnknownEntity(key.to_string()));
        }
    }
    Ok(modify_characters(content, selection, |c| {
        c.entity = entity.clone();
    }))
}
