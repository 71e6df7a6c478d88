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

//! Rendering a document as the markup of the editing surface.
//!
//! Block types map to elements as follows:
//! - `unstyled`               → `<div>`
//! - `header-one` … `header-six` → `<h1>` … `<h6>`
//! - `blockquote`             → `<blockquote>`
//! - `code-block`             → `<pre>`
//! - `unordered-list-item`    → `<ul><li>…</li></ul>`
//! - `ordered-list-item`      → `<ol><li>…</li></ol>`
//! - `atomic`                 → `<figure>`
//!
//! Consecutive list items of the same type share one `<ul>` or `<ol>`
//! wrapper. Inside a block, each run of characters with the same styles is
//! a `<span>` carrying the CSS from the [`StyleMap`].

use crate::content::{ContentBlock, ContentState};
use crate::editor_state::EditorState;
use crate::inline_style::StyleSet;
use crate::style_map::StyleMap;

/// Render `content` as HTML.
pub fn to_html(content: &ContentState, style_map: &StyleMap) -> String {
    let mut html = String::new();
    let mut wrapper: Option<&'static str> = None;

    for block in content.blocks() {
        let block_wrapper = block.block_type().list_wrapper_tag();
        if wrapper != block_wrapper {
            if let Some(tag) = wrapper {
                html.push_str(&format!("</{tag}>"));
            }
            if let Some(tag) = block_wrapper {
                html.push_str(&format!("<{tag}>"));
            }
            wrapper = block_wrapper;
        }
        emit_block(&mut html, block, style_map);
    }

    if let Some(tag) = wrapper {
        html.push_str(&format!("</{tag}>"));
    }
    html
}

fn emit_block(html: &mut String, block: &ContentBlock, style_map: &StyleMap) {
    let tag = block.block_type().html_tag();
    let key = html_escape::encode_double_quoted_attribute(block.key().as_str());
    html.push_str(&format!("<{tag} data-block-key=\"{key}\""));
    if block.depth() > 0 {
        html.push_str(&format!(" data-depth=\"{}\"", block.depth()));
    }
    html.push('>');

    if block.is_empty() {
        html.push_str(&format!("<span data-offset-key=\"{key}-0-0\"><br></span>"));
    }
    for (index, (start, end, styles)) in style_runs(block).into_iter().enumerate()
    {
        html.push_str(&format!("<span data-offset-key=\"{key}-0-{index}\""));
        let css = style_map.css_for(styles);
        if !css.is_empty() {
            html.push_str(&format!(
                " style=\"{}\"",
                html_escape::encode_double_quoted_attribute(&css)
            ));
        }
        html.push('>');
        html.push_str(&html_escape::encode_text(block.text_between(start, end)));
        html.push_str("</span>");
    }

    html.push_str(&format!("</{tag}>"));
}

/// Maximal runs of characters carrying the same styles, as
/// `(start, end, styles)`.
fn style_runs(block: &ContentBlock) -> Vec<(usize, usize, &StyleSet)> {
    let mut runs: Vec<(usize, usize, &StyleSet)> = Vec::new();
    for (i, c) in block.characters().iter().enumerate() {
        match runs.last_mut() {
            Some((_, end, style)) if **style == c.style => *end = i + 1,
            _ => runs.push((i, i + 1, &c.style)),
        }
    }
    runs
}

/// A readable dump of the document and selection, for debugging and tests.
pub fn to_tree(state: &EditorState) -> String {
    let selection = state.selection();
    let mut out = format!(
        "sel: {}:{} -> {}:{}\n",
        selection.anchor_key(),
        selection.anchor_offset(),
        selection.focus_key(),
        selection.focus_offset()
    );

    for block in state.current_content().blocks() {
        out.push_str(&format!(
            "├─ {}({})\n",
            block.block_type(),
            block.key()
        ));
        let runs = style_runs(block);
        let last = runs.len().saturating_sub(1);
        for (i, (start, end, styles)) in runs.into_iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            let text = block.text_between(start, end);
            if styles.is_empty() {
                out.push_str(&format!("│  {branch} {text:?}\n"));
            } else {
                let names: Vec<&str> =
                    styles.iter().map(|s| s.as_ref()).collect();
                out.push_str(&format!(
                    "│  {branch} {text:?} {}\n",
                    names.join(",")
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::block_type::BlockType;
    use crate::inline_style::InlineStyle;
    use crate::modifier;
    use crate::raw::from_json;
    use crate::selection::SelectionState;

    fn html(content: &ContentState) -> String {
        to_html(content, &StyleMap::default())
    }

    // ===================================================================
    // Blocks
    // ===================================================================

    #[test]
    fn plain_paragraph() {
        let content = ContentState::create_from_text("hello");
        assert_eq!(
            html(&content),
            "<div data-block-key=\"0\">\
             <span data-offset-key=\"0-0-0\">hello</span></div>"
        );
    }

    #[test]
    fn empty_block_renders_a_line_break() {
        let content = ContentState::create_empty();
        assert_eq!(
            html(&content),
            "<div data-block-key=\"0\">\
             <span data-offset-key=\"0-0-0\"><br></span></div>"
        );
    }

    #[test]
    fn heading_uses_h1() {
        let base = ContentState::create_from_text("Title");
        let key = base.first_block().key().clone();
        let content = modifier::set_block_type(
            &base,
            &SelectionState::collapsed(key, 0),
            BlockType::HeaderOne,
        );
        let h = html(&content);
        assert!(h.starts_with("<h1 "), "expected <h1> in: {h}");
        assert!(h.ends_with("</h1>"), "expected </h1> in: {h}");
    }

    #[test]
    fn consecutive_list_items_share_a_wrapper() {
        let content = from_json(
            r#"{"blocks": [
                {"key": "a", "text": "one", "type": "unordered-list-item"},
                {"key": "b", "text": "two", "type": "unordered-list-item"},
                {"key": "c", "text": "three", "type": "ordered-list-item"},
                {"key": "d", "text": "after"}
            ]}"#,
        )
        .unwrap();
        let h = html(&content);
        assert_eq!(h.matches("<ul>").count(), 1, "in: {h}");
        assert_eq!(h.matches("<ol>").count(), 1, "in: {h}");
        assert!(h.contains("</ul><ol><li"), "in: {h}");
        assert!(h.contains("</ol><div"), "in: {h}");
    }

    // ===================================================================
    // Inline styles
    // ===================================================================

    #[test]
    fn red_run_gets_a_colour() {
        let base = ContentState::create_from_text("say hi");
        let key = base.first_block().key().clone();
        let content = modifier::apply_inline_style(
            &base,
            &SelectionState::within_block(key, 4, 6),
            InlineStyle::Red,
        );
        assert_eq!(
            html(&content),
            "<div data-block-key=\"0\">\
             <span data-offset-key=\"0-0-0\">say </span>\
             <span data-offset-key=\"0-0-1\" style=\"color: red;\">hi</span>\
             </div>"
        );
    }

    #[test]
    fn text_is_escaped() {
        let content = ContentState::create_from_text("<b>&</b>");
        let h = html(&content);
        assert!(h.contains("&lt;b&gt;&amp;&lt;/b&gt;"), "in: {h}");
    }

    // ===================================================================
    // to_tree debug output
    // ===================================================================

    #[test]
    fn tree_shows_blocks_runs_and_selection() {
        let base = ContentState::create_from_text("abcd\n");
        let key = base.first_block().key().clone();
        let content = modifier::apply_inline_style(
            &base,
            &SelectionState::within_block(key, 2, 4),
            InlineStyle::Bold,
        );
        let state = EditorState::create_with_content(content);
        assert_eq!(
            to_tree(&state),
            indoc! {r#"
                sel: 0:0 -> 0:0
                ├─ unstyled(0)
                │  ├─ "ab"
                │  └─ "cd" BOLD
                ├─ unstyled(1)
            "#}
        );
    }
}
