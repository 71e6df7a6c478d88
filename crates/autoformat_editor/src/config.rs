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

use crate::persistence::EDITOR_STATE_KEY;
use crate::style_map::StyleMap;

/// Host-tunable settings of a [`crate::RichEditor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    pub storage_key: String,
    pub style_map: StyleMap,
}

impl EditorConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_style_map(mut self, style_map: StyleMap) -> Self {
        self.style_map = style_map;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: EDITOR_STATE_KEY.to_owned(),
            style_map: StyleMap::default(),
        }
    }
}
