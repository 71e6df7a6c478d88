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

//! Editing commands on [`EditorState`]: style toggles, deletion, block
//! splitting, undo/redo and plain character insertion.
//!
//! Each command returns the next state; commands that have nothing to do
//! in the current state return `None`.

use unicode_segmentation::UnicodeSegmentation;

use crate::block_type::BlockType;
use crate::editor_state::{ChangeType, EditorState};
use crate::inline_style::{toggled, InlineStyle};
use crate::key_binding::KeyCommand;
use crate::modifier;
use crate::selection::SelectionState;

/// Run `command` against `state`.
pub fn handle_key_command(
    state: &EditorState,
    command: KeyCommand,
) -> Option<EditorState> {
    match command {
        KeyCommand::Bold => Some(toggle_inline_style(state, InlineStyle::Bold)),
        KeyCommand::Italic => {
            Some(toggle_inline_style(state, InlineStyle::Italic))
        }
        KeyCommand::Underline => {
            Some(toggle_inline_style(state, InlineStyle::Underline))
        }
        KeyCommand::Code => Some(toggle_code(state)),
        KeyCommand::Strikethrough => {
            Some(toggle_inline_style(state, InlineStyle::Strikethrough))
        }
        KeyCommand::Backspace => backspace(state),
        KeyCommand::BackspaceWord => backspace_word(state),
        KeyCommand::BackspaceToStartOfLine => {
            backspace_to_start_of_line(state)
        }
        KeyCommand::Delete => delete(state),
        KeyCommand::DeleteWord => delete_word(state),
        KeyCommand::SplitBlock => Some(split_block(state)),
        KeyCommand::Undo => state.undo(),
        KeyCommand::Redo => state.redo(),
    }
}

/// Type of the block holding the start of the selection.
pub fn current_block_type(state: &EditorState) -> BlockType {
    state
        .current_content()
        .block_for_key(state.selection().start_key())
        .map(|b| b.block_type())
        .unwrap_or_default()
}

/// Set the selected blocks to `block_type`, or back to unstyled if the
/// current block already has that type.
pub fn toggle_block_type(
    state: &EditorState,
    block_type: BlockType,
) -> EditorState {
    let target = if current_block_type(state) == block_type {
        BlockType::Unstyled
    } else {
        block_type
    };
    let content = modifier::set_block_type(
        state.current_content(),
        state.selection(),
        target,
    );
    state.push(content, ChangeType::ChangeBlockType)
}

/// `code` is a block type for a cursor or a selection across blocks, and
/// an inline style for a range inside one block.
pub fn toggle_code(state: &EditorState) -> EditorState {
    let selection = state.selection();
    if selection.is_collapsed() || selection.start_key() != selection.end_key()
    {
        toggle_block_type(state, BlockType::CodeBlock)
    } else {
        toggle_inline_style(state, InlineStyle::Code)
    }
}

/// Toggle `style`. With a collapsed cursor only the style used for the next
/// insertion changes; with a range the selected characters are restyled.
pub fn toggle_inline_style(
    state: &EditorState,
    style: InlineStyle,
) -> EditorState {
    let current = state.current_inline_style();
    let selection = state.selection();

    if selection.is_collapsed() {
        return state.set_inline_style_override(toggled(&current, style));
    }

    let content = if current.contains(&style) {
        modifier::remove_inline_style(state.current_content(), selection, style)
    } else {
        modifier::apply_inline_style(state.current_content(), selection, style)
    };
    state.push(content, ChangeType::ChangeInlineStyle)
}

/// Insert `text` at the selection using the current inline style. Line
/// breaks in `text` split the block.
pub fn insert_characters(state: &EditorState, text: &str) -> EditorState {
    if text.is_empty() {
        return state.clone();
    }

    let style = state.current_inline_style();
    let mut content = state.current_content().clone();
    let mut selection = state.selection().clone();
    let mut lines = text.split('\n');
    let mut multiline = false;

    if let Some(first) = lines.next() {
        content = modifier::replace_text(
            &content,
            &selection,
            first.trim_end_matches('\r'),
            &style,
            None,
        );
        selection = content.selection_after().clone();
    }
    for line in lines {
        multiline = true;
        content = modifier::split_block(&content, &selection);
        selection = content.selection_after().clone();
        content = modifier::insert_text(
            &content,
            &selection,
            line.trim_end_matches('\r'),
            &style,
            None,
        );
        selection = content.selection_after().clone();
    }

    let change = if multiline {
        ChangeType::InsertFragment
    } else {
        ChangeType::InsertCharacters
    };
    state.push(content, change)
}

fn remove_selection(state: &EditorState, change: ChangeType) -> EditorState {
    let content =
        modifier::remove_range(state.current_content(), state.selection());
    state.push(content, change)
}

/// Remove `[start, end)` of the block holding the cursor.
fn remove_in_block(
    state: &EditorState,
    start: usize,
    end: usize,
    change: ChangeType,
) -> EditorState {
    let key = state.selection().start_key().clone();
    let range = SelectionState::within_block(key, start, end);
    let content = modifier::remove_range(state.current_content(), &range);
    state.push(content, change)
}

/// Reset a styled block to unstyled when backspacing at its start.
fn try_to_remove_block_style(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() || selection.start_offset() != 0 {
        return None;
    }
    let content = state.current_content();
    let block = content.block_for_key(selection.start_key())?;
    let is_first = content.first_block().key() == block.key();
    if block.block_type() == BlockType::Unstyled
        || !(block.is_empty() || is_first)
    {
        return None;
    }
    let next =
        modifier::set_block_type(content, selection, BlockType::Unstyled);
    Some(state.push(next, ChangeType::ChangeBlockType))
}

/// Join the cursor's block onto the end of the block above it.
fn join_with_previous(state: &EditorState) -> Option<EditorState> {
    let content = state.current_content();
    let key = state.selection().start_key();
    let previous = content.block_before(key)?;
    let range = SelectionState::between(
        content,
        previous.key(),
        previous.len(),
        key,
        0,
    )
    .ok()?;
    let next = modifier::remove_range(content, &range);
    Some(state.push(next, ChangeType::BackspaceCharacter))
}

/// Join the block below onto the end of the cursor's block.
fn join_with_next(state: &EditorState) -> Option<EditorState> {
    let content = state.current_content();
    let key = state.selection().start_key();
    let block = content.block_for_key(key)?;
    let following = content.block_after(key)?;
    let range = SelectionState::between(
        content,
        key,
        block.len(),
        following.key(),
        0,
    )
    .ok()?;
    let next = modifier::remove_range(content, &range);
    Some(state.push(next, ChangeType::DeleteCharacter))
}

fn backspace(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Some(remove_selection(state, ChangeType::RemoveRange));
    }
    let offset = selection.start_offset();
    if offset == 0 {
        return try_to_remove_block_style(state)
            .or_else(|| join_with_previous(state));
    }

    let block = state
        .current_content()
        .block_for_key(selection.start_key())?;
    let grapheme_len = block
        .text_before(offset)
        .graphemes(true)
        .next_back()
        .map_or(1, |g| g.chars().count());
    Some(remove_in_block(
        state,
        offset - grapheme_len,
        offset,
        ChangeType::BackspaceCharacter,
    ))
}

fn backspace_word(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Some(remove_selection(state, ChangeType::RemoveRange));
    }
    let offset = selection.start_offset();
    if offset == 0 {
        return backspace(state);
    }

    let block = state
        .current_content()
        .block_for_key(selection.start_key())?;
    let removed = word_span(block.text_before(offset).split_word_bounds().rev());
    Some(remove_in_block(
        state,
        offset - removed,
        offset,
        ChangeType::RemoveRange,
    ))
}

fn backspace_to_start_of_line(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Some(remove_selection(state, ChangeType::RemoveRange));
    }
    let offset = selection.start_offset();
    if offset == 0 {
        return backspace(state);
    }
    Some(remove_in_block(state, 0, offset, ChangeType::RemoveRange))
}

fn delete(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Some(remove_selection(state, ChangeType::RemoveRange));
    }
    let offset = selection.start_offset();
    let block = state
        .current_content()
        .block_for_key(selection.start_key())?;
    if offset >= block.len() {
        return join_with_next(state);
    }

    let grapheme_len = block
        .text_between(offset, block.len())
        .graphemes(true)
        .next()
        .map_or(1, |g| g.chars().count());
    Some(remove_in_block(
        state,
        offset,
        offset + grapheme_len,
        ChangeType::DeleteCharacter,
    ))
}

fn delete_word(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Some(remove_selection(state, ChangeType::RemoveRange));
    }
    let offset = selection.start_offset();
    let block = state
        .current_content()
        .block_for_key(selection.start_key())?;
    if offset >= block.len() {
        return join_with_next(state);
    }

    let removed =
        word_span(block.text_between(offset, block.len()).split_word_bounds());
    Some(remove_in_block(
        state,
        offset,
        offset + removed,
        ChangeType::RemoveRange,
    ))
}

/// Number of chars covered by leading whitespace segments followed by one
/// word segment.
fn word_span<'a>(segments: impl Iterator<Item = &'a str>) -> usize {
    let mut count = 0;
    for segment in segments {
        count += segment.chars().count();
        if !segment.chars().all(char::is_whitespace) {
            break;
        }
    }
    count
}

fn split_block(state: &EditorState) -> EditorState {
    let content =
        modifier::split_block(state.current_content(), state.selection());
    state.push(content, ChangeType::SplitBlock)
}
