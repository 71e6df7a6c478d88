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

//! Cursor and range selection.
//!
//! A selection is an anchor (where it started) and a focus (where it
//! ends), each a block key plus a character offset within that block.
//! `is_backward` records whether the focus lies before the anchor in
//! document order, so start/end can be answered without the content.

use crate::content::{BlockKey, ContentState};
use crate::error::SelectionError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionState {
    anchor_key: BlockKey,
    anchor_offset: usize,
    focus_key: BlockKey,
    focus_offset: usize,
    is_backward: bool,
}

impl SelectionState {
    /// A collapsed cursor at `offset` inside block `key`.
    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        Self {
            anchor_key: key.clone(),
            anchor_offset: offset,
            focus_key: key,
            focus_offset: offset,
            is_backward: false,
        }
    }

    /// A range inside a single block. Offsets may be given in either order;
    /// `focus < anchor` produces a backward selection.
    pub fn within_block(
        key: BlockKey,
        anchor_offset: usize,
        focus_offset: usize,
    ) -> Self {
        Self {
            anchor_key: key.clone(),
            anchor_offset,
            focus_key: key,
            focus_offset,
            is_backward: focus_offset < anchor_offset,
        }
    }

    /// Build a selection between two positions of `content`, working out
    /// the direction from block order. Offsets past the end of a block are
    /// clamped to its length.
    pub fn between(
        content: &ContentState,
        anchor_key: &BlockKey,
        anchor_offset: usize,
        focus_key: &BlockKey,
        focus_offset: usize,
    ) -> Result<Self, SelectionError> {
        let anchor_index = content
            .block_index(anchor_key)
            .ok_or_else(|| SelectionError::UnknownBlock(anchor_key.to_string()))?;
        let focus_index = content
            .block_index(focus_key)
            .ok_or_else(|| SelectionError::UnknownBlock(focus_key.to_string()))?;

        let blocks = content.blocks();
        let anchor_offset = anchor_offset.min(blocks[anchor_index].len());
        let focus_offset = focus_offset.min(blocks[focus_index].len());

        let is_backward = if anchor_index == focus_index {
            focus_offset < anchor_offset
        } else {
            focus_index < anchor_index
        };

        Ok(Self {
            anchor_key: anchor_key.clone(),
            anchor_offset,
            focus_key: focus_key.clone(),
            focus_offset,
            is_backward,
        })
    }

    pub fn anchor_key(&self) -> &BlockKey {
        &self.anchor_key
    }

    pub fn anchor_offset(&self) -> usize {
        self.anchor_offset
    }

    pub fn focus_key(&self) -> &BlockKey {
        &self.focus_key
    }

    pub fn focus_offset(&self) -> usize {
        self.focus_offset
    }

    pub fn is_backward(&self) -> bool {
        self.is_backward
    }

    /// True when the selection is a single cursor position.
    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key
            && self.anchor_offset == self.focus_offset
    }

    pub fn start_key(&self) -> &BlockKey {
        if self.is_backward {
            &self.focus_key
        } else {
            &self.anchor_key
        }
    }

    pub fn start_offset(&self) -> usize {
        if self.is_backward {
            self.focus_offset
        } else {
            self.anchor_offset
        }
    }

    pub fn end_key(&self) -> &BlockKey {
        if self.is_backward {
            &self.anchor_key
        } else {
            &self.focus_key
        }
    }

    pub fn end_offset(&self) -> usize {
        if self.is_backward {
            self.anchor_offset
        } else {
            self.focus_offset
        }
    }

    /// The selection collapsed onto its start.
    pub fn collapse_to_start(&self) -> Self {
        Self::collapsed(self.start_key().clone(), self.start_offset())
    }
}
