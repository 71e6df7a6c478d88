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

//! Error types for snapshot parsing, storage access and persistence.

/// A stored snapshot could not be turned back into a document.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot contains no blocks")]
    NoBlocks,
    #[error("unknown block type `{0}`")]
    UnknownBlockType(String),
    #[error("unknown inline style `{0}`")]
    UnknownInlineStyle(String),
    #[error("unknown entity mutability `{0}`")]
    UnknownMutability(String),
    #[error("block `{block}` references missing entity {entity}")]
    UnknownEntity { block: String, entity: u32 },
    #[error("duplicate block key `{0}`")]
    DuplicateBlockKey(String),
    #[error(
        "range {offset}+{length} is outside block `{block}` \
         (length {block_len})"
    )]
    RangeOutOfBounds {
        block: String,
        offset: usize,
        length: usize,
        block_len: usize,
    },
}

/// The key-value store refused a read or a write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("storage error: {0}")]
    Backend(String),
}

/// Failure of a save or load through the persistence adapter.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// An edit referred to an entity that is not in the document's entity map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    #[error("no entity with key `{0}`")]
    UnknownEntity(String),
}

/// A selection referred to a block that is not in the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no block with key `{0}`")]
    UnknownBlock(String),
}
