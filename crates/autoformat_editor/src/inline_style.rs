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

use std::collections::BTreeSet;

use strum_macros::{AsRefStr, Display, EnumString};

/// A character-level style. `RED` is the custom colour style; the others
/// are the usual rich-text toggles.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    Red,
}

/// The set of styles carried by one character.
pub type StyleSet = BTreeSet<InlineStyle>;

/// Return `styles` with `style` added if absent, removed if present.
pub fn toggled(styles: &StyleSet, style: InlineStyle) -> StyleSet {
    let mut out = styles.clone();
    if !out.remove(&style) {
        out.insert(style);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn inline_styles_use_snapshot_names() {
        assert_eq!(InlineStyle::Bold.to_string(), "BOLD");
        assert_eq!(InlineStyle::Red.as_ref(), "RED");
        assert_eq!(InlineStyle::Strikethrough.to_string(), "STRIKETHROUGH");
        assert_eq!(
            InlineStyle::from_str("UNDERLINE").unwrap(),
            InlineStyle::Underline
        );
        assert!(InlineStyle::from_str("bold").is_err());
    }

    #[test]
    fn toggling_adds_then_removes() {
        let empty = StyleSet::new();
        let bold = toggled(&empty, InlineStyle::Bold);
        assert!(bold.contains(&InlineStyle::Bold));
        assert!(toggled(&bold, InlineStyle::Bold).is_empty());
    }
}
