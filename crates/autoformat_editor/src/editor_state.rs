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

//! The immutable editor snapshot.
//!
//! An [`EditorState`] bundles the current content, the selection, the
//! inline style to use for the next insertion and the undo/redo stacks.
//! Every transition returns a new value; content and history are shared
//! through `Arc`, so keeping the previous state around is cheap.

use std::sync::Arc;

use strum_macros::{AsRefStr, Display};

use crate::content::{BlockKey, ContentState};
use crate::history::History;
use crate::inline_style::StyleSet;
use crate::selection::SelectionState;

/// The kind of edit that produced a content state. Consecutive edits of the
/// same character-level kind are merged into one undo step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ChangeType {
    InsertCharacters,
    InsertFragment,
    BackspaceCharacter,
    DeleteCharacter,
    RemoveRange,
    SplitBlock,
    ChangeBlockType,
    ChangeInlineStyle,
    ApplyEntity,
    Undo,
    Redo,
}

impl ChangeType {
    fn merges_with_previous(&self) -> bool {
        matches!(
            self,
            Self::InsertCharacters
                | Self::BackspaceCharacter
                | Self::DeleteCharacter
        )
    }
}

#[derive(Clone, Debug)]
pub struct EditorState {
    current_content: Arc<ContentState>,
    selection: SelectionState,
    inline_style_override: Option<StyleSet>,
    undo_stack: History,
    redo_stack: History,
    last_change_type: Option<ChangeType>,
    force_selection: bool,
}

impl EditorState {
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::create_empty())
    }

    /// A fresh state with the cursor at the start of the first block and no
    /// history.
    pub fn create_with_content(content: ContentState) -> Self {
        let selection =
            SelectionState::collapsed(content.first_block().key().clone(), 0);
        Self {
            current_content: Arc::new(content),
            selection,
            inline_style_override: None,
            undo_stack: History::new(),
            redo_stack: History::new(),
            last_change_type: None,
            force_selection: false,
        }
    }

    pub fn current_content(&self) -> &ContentState {
        &self.current_content
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn inline_style_override(&self) -> Option<&StyleSet> {
        self.inline_style_override.as_ref()
    }

    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change_type
    }

    pub fn undo_stack(&self) -> &History {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &History {
        &self.redo_stack
    }

    /// True when the host should apply [`Self::selection`] to its surface
    /// instead of trusting the selection it already shows.
    pub fn must_force_selection(&self) -> bool {
        self.force_selection
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Install `content` as the result of a `change` edit.
    ///
    /// The cursor moves to `content.selection_after()`, the inline style
    /// override is dropped and the redo stack is cleared. The previous
    /// content becomes a new undo step unless this edit continues a run of
    /// the same typing/deleting change without the selection having moved.
    pub fn push(&self, content: ContentState, change: ChangeType) -> Self {
        let current = &self.current_content;
        let selection_moved = self.selection != *current.selection_after();
        let new_boundary = selection_moved
            || self.last_change_type != Some(change)
            || !change.merges_with_previous();

        let (undo_stack, content) = if new_boundary {
            let before = self.selection.clone();
            (
                self.undo_stack.push(Arc::clone(current)),
                content.with_selection_before(before),
            )
        } else {
            (
                self.undo_stack.clone(),
                content.with_selection_before(
                    current.selection_before().clone(),
                ),
            )
        };

        let selection = content.selection_after().clone();

        Self {
            current_content: Arc::new(content),
            selection,
            inline_style_override: None,
            undo_stack,
            redo_stack: History::new(),
            last_change_type: Some(change),
            force_selection: true,
        }
    }

    /// Take a selection reported by the host. Any pending inline style
    /// override is dropped.
    pub fn accept_selection(&self, selection: SelectionState) -> Self {
        Self {
            selection,
            inline_style_override: None,
            force_selection: false,
            ..self.clone()
        }
    }

    /// Like [`Self::accept_selection`], but the host must move its own
    /// selection to match.
    pub fn force_selection(&self, selection: SelectionState) -> Self {
        Self {
            force_selection: true,
            ..self.accept_selection(selection)
        }
    }

    /// Set the styles that the next inserted characters will carry.
    pub fn set_inline_style_override(&self, style: StyleSet) -> Self {
        Self {
            inline_style_override: Some(style),
            ..self.clone()
        }
    }

    /// The styles the next inserted character would carry.
    ///
    /// With a collapsed cursor this is the override if one is set, otherwise
    /// the style of the character before the cursor, falling back to the
    /// first character of the block and then to the last character of the
    /// nearest non-empty block above. With a range selection it is the
    /// style at the start of the range.
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(style) = &self.inline_style_override {
            return style.clone();
        }

        let content = self.current_content();
        let key = self.selection.start_key();
        let offset = self.selection.start_offset();
        let Some(block) = content.block_for_key(key) else {
            return StyleSet::new();
        };

        if self.selection.is_collapsed() {
            if offset > 0 {
                return block.style_at(offset - 1);
            }
            if !block.is_empty() {
                return block.style_at(0);
            }
        } else {
            if offset < block.len() {
                return block.style_at(offset);
            }
            if offset > 0 {
                return block.style_at(offset - 1);
            }
        }
        look_upward_for_inline_style(content, key)
    }

    pub fn undo(&self) -> Option<Self> {
        let (previous, undo_stack) = self.undo_stack.pop()?;
        let current = Arc::clone(&self.current_content);
        Some(Self {
            selection: current.selection_before().clone(),
            current_content: previous,
            inline_style_override: None,
            undo_stack,
            redo_stack: self.redo_stack.push(current),
            last_change_type: Some(ChangeType::Undo),
            force_selection: true,
        })
    }

    pub fn redo(&self) -> Option<Self> {
        let (next, redo_stack) = self.redo_stack.pop()?;
        Some(Self {
            selection: next.selection_after().clone(),
            current_content: next,
            inline_style_override: None,
            undo_stack: self.undo_stack.push(Arc::clone(&self.current_content)),
            redo_stack,
            last_change_type: Some(ChangeType::Redo),
            force_selection: true,
        })
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}

fn look_upward_for_inline_style(
    content: &ContentState,
    key: &BlockKey,
) -> StyleSet {
    let Some(index) = content.block_index(key) else {
        return StyleSet::new();
    };
    content.blocks()[..index]
        .iter()
        .rev()
        .find(|b| !b.is_empty())
        .map(|b| b.style_at(b.len() - 1))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline_style::InlineStyle;
    use crate::modifier;

    fn type_text(state: &EditorState, text: &str) -> EditorState {
        let content = modifier::insert_text(
            state.current_content(),
            state.selection(),
            text,
            &state.current_inline_style(),
            None,
        );
        state.push(content, ChangeType::InsertCharacters)
    }

    fn plain(state: &EditorState) -> String {
        state.current_content().plain_text("\n")
    }

    #[test]
    fn empty_state_has_cursor_at_start() {
        let state = EditorState::create_empty();
        assert!(state.selection().is_collapsed());
        assert_eq!(state.selection().start_offset(), 0);
        assert!(!state.can_undo());
        assert!(!state.can_redo());
    }

    #[test]
    fn undo_snapshots_share_untouched_blocks() {
        let state = EditorState::create_with_content(
            ContentState::create_from_text("title\nbody"),
        );
        let state = type_text(&state, "x");
        assert_eq!(plain(&state), "xtitle\nbody");

        let (previous, _) = state.undo_stack().pop().unwrap();
        let before = previous.blocks();
        let after = state.current_content().blocks();
        assert!(before[1].shares_storage_with(&after[1]));
        assert!(!before[0].shares_storage_with(&after[0]));
    }

    #[test]
    fn push_moves_selection_to_selection_after() {
        let state = type_text(&EditorState::create_empty(), "abc");
        assert_eq!(plain(&state), "abc");
        assert_eq!(state.selection().start_offset(), 3);
        assert_eq!(state.last_change_type(), Some(ChangeType::InsertCharacters));
    }

    #[test]
    fn consecutive_typing_is_one_undo_step() {
        let mut state = EditorState::create_empty();
        for c in ["a", "b", "c"] {
            state = type_text(&state, c);
        }
        assert_eq!(state.undo_stack().len(), 1);
        let undone = state.undo().unwrap();
        assert_eq!(plain(&undone), "");
    }

    #[test]
    fn moving_the_cursor_starts_a_new_undo_step() {
        let state = type_text(&EditorState::create_empty(), "ab");
        let key = state.current_content().first_block().key().clone();
        let state =
            state.accept_selection(SelectionState::collapsed(key, 1));
        let state = type_text(&state, "X");
        assert_eq!(plain(&state), "aXb");
        assert_eq!(state.undo_stack().len(), 2);
        assert_eq!(plain(&state.undo().unwrap()), "ab");
    }

    #[test]
    fn undo_then_redo_restores_content_and_selection() {
        let state = type_text(&EditorState::create_empty(), "hello");
        let undone = state.undo().unwrap();
        assert_eq!(plain(&undone), "");
        assert_eq!(undone.selection().start_offset(), 0);
        assert!(undone.can_redo());

        let redone = undone.redo().unwrap();
        assert_eq!(plain(&redone), "hello");
        assert_eq!(redone.selection().start_offset(), 5);
        assert!(!redone.can_redo());
    }

    #[test]
    fn undo_and_redo_on_fresh_state_do_nothing() {
        let state = EditorState::create_empty();
        assert!(state.undo().is_none());
        assert!(state.redo().is_none());
    }

    #[test]
    fn new_edit_after_undo_clears_redo() {
        let state = type_text(&EditorState::create_empty(), "hello");
        let undone = state.undo().unwrap();
        let edited = type_text(&undone, "world");
        assert!(!edited.can_redo());
        assert_eq!(plain(&edited), "world");
    }

    #[test]
    fn previous_state_is_left_untouched() {
        let before = EditorState::create_empty();
        let after = type_text(&before, "abc");
        assert_eq!(plain(&before), "");
        assert_eq!(plain(&after), "abc");
    }

    #[test]
    fn override_wins_and_is_cleared_by_push() {
        let state = EditorState::create_empty()
            .set_inline_style_override(StyleSet::from([InlineStyle::Red]));
        assert!(state.current_inline_style().contains(&InlineStyle::Red));
        let typed = type_text(&state, "x");
        assert!(typed.inline_style_override().is_none());
        assert!(typed
            .current_content()
            .first_block()
            .style_at(0)
            .contains(&InlineStyle::Red));
        // The next character inherits the style of the one before it.
        assert!(typed.current_inline_style().contains(&InlineStyle::Red));
    }

    #[test]
    fn edits_force_the_selection_and_accepted_selections_do_not() {
        let typed = type_text(&EditorState::create_empty(), "ab");
        assert!(typed.must_force_selection());

        let key = typed.current_content().first_block().key().clone();
        let accepted =
            typed.accept_selection(SelectionState::collapsed(key.clone(), 1));
        assert!(!accepted.must_force_selection());

        let forced = accepted.force_selection(SelectionState::collapsed(key, 0));
        assert!(forced.must_force_selection());
        assert_eq!(forced.selection().start_offset(), 0);
    }

    #[test]
    fn accepting_a_selection_drops_the_override() {
        let state = EditorState::create_empty()
            .set_inline_style_override(StyleSet::from([InlineStyle::Bold]));
        let key = state.current_content().first_block().key().clone();
        let moved = state.accept_selection(SelectionState::collapsed(key, 0));
        assert!(moved.inline_style_override().is_none());
        assert!(moved.current_inline_style().is_empty());
    }

    #[test]
    fn empty_block_inherits_style_from_block_above() {
        let base = ContentState::create_from_text("ab\n");
        let first = base.first_block().key().clone();
        let content = modifier::apply_inline_style(
            &base,
            &SelectionState::within_block(first, 0, 2),
            InlineStyle::Underline,
        );
        let second = content.blocks()[1].key().clone();
        let state = EditorState::create_with_content(content)
            .accept_selection(SelectionState::collapsed(second, 0));
        assert!(state
            .current_inline_style()
            .contains(&InlineStyle::Underline));
    }
}
