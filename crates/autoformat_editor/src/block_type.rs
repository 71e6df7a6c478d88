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

use strum_macros::{AsRefStr, Display, EnumString};

/// The type of a block. The string forms are the ones used in stored
/// snapshots (`"unstyled"`, `"header-one"`, ...).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum BlockType {
    #[default]
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    Blockquote,
    CodeBlock,
    UnorderedListItem,
    OrderedListItem,
    Atomic,
}

impl BlockType {
    pub fn is_header(&self) -> bool {
        matches!(
            self,
            Self::HeaderOne
                | Self::HeaderTwo
                | Self::HeaderThree
                | Self::HeaderFour
                | Self::HeaderFive
                | Self::HeaderSix
        )
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, Self::UnorderedListItem | Self::OrderedListItem)
    }

    /// The HTML element used to render a block of this type.
    pub fn html_tag(&self) -> &'static str {
        match self {
            Self::Unstyled => "div",
            Self::HeaderOne => "h1",
            Self::HeaderTwo => "h2",
            Self::HeaderThree => "h3",
            Self::HeaderFour => "h4",
            Self::HeaderFive => "h5",
            Self::HeaderSix => "h6",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "pre",
            Self::UnorderedListItem | Self::OrderedListItem => "li",
            Self::Atomic => "figure",
        }
    }

    /// The wrapping list element for list item blocks.
    pub fn list_wrapper_tag(&self) -> Option<&'static str> {
        match self {
            Self::UnorderedListItem => Some("ul"),
            Self::OrderedListItem => Some("ol"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::BlockType;

    #[test]
    fn block_types_use_snapshot_names() {
        assert_eq!(BlockType::Unstyled.to_string(), "unstyled");
        assert_eq!(BlockType::HeaderOne.to_string(), "header-one");
        assert_eq!(BlockType::Blockquote.as_ref(), "blockquote");
        assert_eq!(
            BlockType::UnorderedListItem.to_string(),
            "unordered-list-item"
        );
    }

    #[test]
    fn block_types_parse_from_snapshot_names() {
        assert_eq!(
            BlockType::from_str("header-one").unwrap(),
            BlockType::HeaderOne
        );
        assert_eq!(
            BlockType::from_str("code-block").unwrap(),
            BlockType::CodeBlock
        );
        assert!(BlockType::from_str("header-seven").is_err());
    }

    #[test]
    fn only_list_items_have_a_wrapper() {
        assert_eq!(
            BlockType::OrderedListItem.list_wrapper_tag(),
            Some("ol")
        );
        assert_eq!(BlockType::HeaderOne.list_wrapper_tag(), None);
        assert!(BlockType::HeaderThree.is_header());
        assert!(!BlockType::Unstyled.is_header());
    }
}
