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

//! Undo/redo stacks of content snapshots.
//!
//! [`History`] is a persistent stack: `push` and `pop` return a new stack
//! that shares its tail with the old one, so an [`crate::EditorState`] can
//! be cloned without copying its history.

use std::sync::Arc;

use crate::content::ContentState;

#[derive(Debug)]
struct Node {
    content: Arc<ContentState>,
    next: Option<Arc<Node>>,
}

#[derive(Clone, Debug, Default)]
pub struct History {
    head: Option<Arc<Node>>,
    len: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn peek(&self) -> Option<&Arc<ContentState>> {
        self.head.as_ref().map(|node| &node.content)
    }

    pub fn push(&self, content: Arc<ContentState>) -> Self {
        Self {
            head: Some(Arc::new(Node {
                content,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// The top snapshot and the stack below it.
    pub fn pop(&self) -> Option<(Arc<ContentState>, Self)> {
        let node = self.head.as_ref()?;
        Some((
            Arc::clone(&node.content),
            Self {
                head: node.next.clone(),
                len: self.len - 1,
            },
        ))
    }
}

impl Drop for History {
    // Unlink iteratively so a long history does not recurse on drop.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}
