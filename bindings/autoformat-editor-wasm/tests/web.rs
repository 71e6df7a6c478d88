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

#![cfg(target_arch = "wasm32")]

use autoformat_editor_wasm::EditorComponent;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn local_storage() -> web_sys::Storage {
    web_sys::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap()
}

fn fresh(key: &str) -> EditorComponent {
    local_storage().remove_item(key).unwrap();
    let mut editor = EditorComponent::with_storage_key(key);
    assert_eq!(editor.mount(), None);
    editor
}

fn type_str(editor: &mut EditorComponent, text: &str) {
    for c in text.chars() {
        editor.input(&c.to_string());
    }
}

#[wasm_bindgen_test]
fn hash_space_renders_a_heading() {
    let mut editor = fresh("web-test-heading");
    assert!(!editor.input("#"));
    assert_eq!(editor.handle_before_input(" "), "handled");
    type_str(&mut editor, "Hi");
    assert!(editor.to_html().starts_with("<h1 "));
}

#[wasm_bindgen_test]
fn red_text_after_double_star() {
    let mut editor = fresh("web-test-red");
    type_str(&mut editor, "**");
    assert!(editor.input(" "));
    type_str(&mut editor, "hi");
    assert!(editor.to_html().contains("color: red;"));
}

#[wasm_bindgen_test]
fn save_writes_to_local_storage_and_remount_restores() {
    let key = "web-test-save";
    let mut editor = fresh(key);
    type_str(&mut editor, "# Saved");
    editor.save().unwrap();
    assert!(local_storage().get_item(key).unwrap().is_some());

    let mut again = EditorComponent::with_storage_key(key);
    assert_eq!(again.mount(), None);
    assert!(again.to_html().contains("Saved"));
}

#[wasm_bindgen_test]
fn corrupt_snapshot_gives_a_notice() {
    let key = "web-test-corrupt";
    local_storage().set_item(key, "{oops").unwrap();
    let mut editor = EditorComponent::with_storage_key(key);
    assert!(editor.mount().is_some());
    assert!(editor.to_html().contains("<br>"));
}

#[wasm_bindgen_test]
fn key_binding_names_commands() {
    let editor = fresh("web-test-keys");
    assert_eq!(
        editor.key_binding("b", true, false, false, false),
        Some("bold".to_owned())
    );
    assert_eq!(editor.key_binding("#", false, false, false, false), None);
}

#[wasm_bindgen_test]
fn edits_ask_the_host_to_move_its_selection() {
    let mut editor = fresh("web-test-force");
    assert!(!editor.must_force_selection());
    type_str(&mut editor, "ab");
    assert!(editor.must_force_selection());
    editor.select("0", 1, "0", 1).unwrap();
    assert!(!editor.must_force_selection());
}
