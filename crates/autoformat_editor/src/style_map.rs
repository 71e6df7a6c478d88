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

//! CSS for inline styles.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::inline_style::{InlineStyle, StyleSet};

/// A single `property: value` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssDeclaration {
    pub property: &'static str,
    pub value: String,
}

impl CssDeclaration {
    pub fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

/// The CSS each inline style is drawn with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleMap {
    styles: BTreeMap<InlineStyle, Vec<CssDeclaration>>,
}

static DEFAULT_STYLE_MAP: Lazy<StyleMap> = Lazy::new(|| {
    StyleMap::empty()
        .with_style(
            InlineStyle::Bold,
            vec![CssDeclaration::new("font-weight", "bold")],
        )
        .with_style(
            InlineStyle::Italic,
            vec![CssDeclaration::new("font-style", "italic")],
        )
        .with_style(
            InlineStyle::Underline,
            vec![CssDeclaration::new("text-decoration", "underline")],
        )
        .with_style(
            InlineStyle::Strikethrough,
            vec![CssDeclaration::new("text-decoration", "line-through")],
        )
        .with_style(
            InlineStyle::Code,
            vec![
                CssDeclaration::new("font-family", "monospace"),
                CssDeclaration::new("word-wrap", "break-word"),
            ],
        )
        .with_style(InlineStyle::Red, vec![CssDeclaration::new("color", "red")])
});

impl StyleMap {
    /// A map with no CSS for any style.
    pub fn empty() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    /// Replace the CSS for `style`.
    pub fn with_style(
        mut self,
        style: InlineStyle,
        declarations: Vec<CssDeclaration>,
    ) -> Self {
        self.styles.insert(style, declarations);
        self
    }

    pub fn declarations(&self, style: InlineStyle) -> &[CssDeclaration] {
        self.styles.get(&style).map(Vec::as_slice).unwrap_or_default()
    }

    /// Inline CSS for a set of styles, or an empty string if none of them
    /// has any. Later styles override earlier ones, except that
    /// `text-decoration` values are combined so underline and
    /// strikethrough can be shown together.
    pub fn css_for(&self, styles: &StyleSet) -> String {
        let mut merged: Vec<(&'static str, String)> = Vec::new();
        for declaration in styles.iter().flat_map(|s| self.declarations(*s)) {
            let existing =
                merged.iter_mut().find(|(p, _)| *p == declaration.property);
            match existing {
                Some((_, value)) if declaration.property == "text-decoration" => {
                    if !value.split(' ').any(|v| v == declaration.value) {
                        value.push(' ');
                        value.push_str(&declaration.value);
                    }
                }
                Some((_, value)) => *value = declaration.value.clone(),
                None => merged
                    .push((declaration.property, declaration.value.clone())),
            }
        }
        merged
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        DEFAULT_STYLE_MAP.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_is_drawn_in_red() {
        let map = StyleMap::default();
        assert_eq!(
            map.css_for(&StyleSet::from([InlineStyle::Red])),
            "color: red;"
        );
    }

    #[test]
    fn no_styles_means_no_css() {
        assert_eq!(StyleMap::default().css_for(&StyleSet::new()), "");
        assert_eq!(
            StyleMap::empty().css_for(&StyleSet::from([InlineStyle::Bold])),
            ""
        );
    }

    #[test]
    fn text_decorations_are_combined() {
        let map = StyleMap::default();
        let css = map.css_for(&StyleSet::from([
            InlineStyle::Underline,
            InlineStyle::Strikethrough,
            InlineStyle::Bold,
        ]));
        assert_eq!(
            css,
            "font-weight: bold; text-decoration: underline line-through;"
        );
    }

    #[test]
    fn custom_styles_override_defaults() {
        let map = StyleMap::default().with_style(
            InlineStyle::Red,
            vec![CssDeclaration::new("color", "#c00")],
        );
        assert_eq!(
            map.css_for(&StyleSet::from([InlineStyle::Red])),
            "color: #c00;"
        );
    }
}
