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

//! Markdown-style shortcuts typed at the start of a line.
//!
//! When a space is about to be inserted at a collapsed cursor and the text
//! of the line up to the cursor is exactly one of the triggers below, the
//! trigger is deleted and the space is swallowed:
//!
//! | Trigger | Effect                         |
//! |---------|--------------------------------|
//! | `#`     | block becomes `header-one`     |
//! | `*`     | toggle `BOLD` for new text     |
//! | `**`    | toggle `RED` for new text      |
//! | `***`   | toggle `UNDERLINE` for new text |

use tracing::debug;

use crate::block_type::BlockType;
use crate::editor_state::{ChangeType, EditorState};
use crate::inline_style::{InlineStyle, StyleSet};
use crate::modifier;
use crate::rich_utils;
use crate::selection::SelectionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoformatAction {
    SetBlockType(BlockType),
    ToggleInlineStyle(InlineStyle),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoformatRule {
    pub trigger: &'static str,
    pub action: AutoformatAction,
}

pub const RULES: [AutoformatRule; 4] = [
    AutoformatRule {
        trigger: "#",
        action: AutoformatAction::SetBlockType(BlockType::HeaderOne),
    },
    AutoformatRule {
        trigger: "*",
        action: AutoformatAction::ToggleInlineStyle(InlineStyle::Bold),
    },
    AutoformatRule {
        trigger: "**",
        action: AutoformatAction::ToggleInlineStyle(InlineStyle::Red),
    },
    AutoformatRule {
        trigger: "***",
        action: AutoformatAction::ToggleInlineStyle(InlineStyle::Underline),
    },
];

/// The action for a line prefix, if it is exactly one of the triggers.
pub fn match_trigger(line_prefix: &str) -> Option<AutoformatAction> {
    RULES
        .iter()
        .find(|rule| rule.trigger == line_prefix)
        .map(|rule| rule.action)
}

/// Decide what to do with `chars` before they are inserted.
///
/// Returns the state to install when a trigger fires, in which case
/// `chars` must not be inserted. `None` means the characters should be
/// inserted as normal.
pub fn handle_before_input(
    state: &EditorState,
    chars: &str,
) -> Option<EditorState> {
    if chars != " " {
        return None;
    }

    let selection = state.selection();
    if !selection.is_collapsed() {
        return None;
    }

    let content = state.current_content();
    let block = content.block_for_key(selection.start_key())?;
    let offset = selection.start_offset().min(block.len());
    let line_prefix = block.text_before(offset);
    let action = match_trigger(line_prefix)?;

    debug!(trigger = line_prefix, ?action, "autoformat trigger matched");

    let trigger_len = line_prefix.chars().count();
    let trigger_span = SelectionState::within_block(
        block.key().clone(),
        offset - trigger_len,
        offset,
    );
    let without_trigger = modifier::replace_text(
        content,
        &trigger_span,
        "",
        &StyleSet::new(),
        None,
    );
    let next = state.push(without_trigger, ChangeType::ChangeInlineStyle);

    Some(match action {
        AutoformatAction::SetBlockType(block_type) => {
            rich_utils::toggle_block_type(&next, block_type)
        }
        AutoformatAction::ToggleInlineStyle(style) => {
            rich_utils::toggle_inline_style(&next, style)
        }
    })
}
