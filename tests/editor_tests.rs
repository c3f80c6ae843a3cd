// End-to-end session tests: scripted key bytes through the full
// decode -> edit -> move -> scroll -> render loop, asserting on document
// state, cursor position, saved files and rendered frames.

mod common;

use common::harness::*;

#[test]
fn test_edit_save_reload() {
    let mut h = EditorHarness::with_lines(&["hello"], 10, 40);
    h.send(&[END, b"!", CTRL_S]);
    assert_eq!(h.lines(), vec!["hello!"]);
    assert_eq!(h.saved_text(), "hello!\n");
    assert!(h.frames().contains("Saved file successfully!"));
}

#[test]
fn test_sticky_column_across_short_line() {
    let mut h = EditorHarness::with_lines(&["abcdefgh", "xy", "abcdefgh"], 10, 40);
    h.send(&[END]);
    assert_eq!(h.cursor_pos(), (0, 8));
    h.send(&[DOWN]);
    assert_eq!(h.cursor_pos(), (1, 2));
    h.send(&[DOWN]);
    assert_eq!(h.cursor_pos(), (2, 8));
}

#[test]
fn test_delete_at_line_end_joins() {
    let mut h = EditorHarness::with_lines(&["ab", "cd"], 10, 40);
    h.send(&[END, DELETE, CTRL_S]);
    assert_eq!(h.lines(), vec!["abcd"]);
    assert_eq!(h.saved_text(), "abcd\n");
}

#[test]
fn test_backspace_joins_at_previous_line_length() {
    let mut h = EditorHarness::with_lines(&["hello", "world"], 10, 40);
    h.send(&[DOWN, BACKSPACE]);
    assert_eq!(h.lines(), vec!["helloworld"]);
    assert_eq!(h.cursor_pos(), (0, 5));
}

#[test]
fn test_page_down_lands_with_overlap() {
    let lines: Vec<String> = (0..40).map(|i| format!("line{i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut h = EditorHarness::with_lines(&refs, 10, 40);
    // A full frame of unwrapped lines occupies rows + 1 physical rows;
    // the landing row keeps two of them in view.
    h.send(&[PAGE_DOWN]);
    assert_eq!(h.cursor_pos(), (9, 0));
    assert_eq!(h.editor.cursor().scroll_top(), 9);

    h.send(&[PAGE_DOWN]);
    assert_eq!(h.cursor_pos(), (18, 0));
    assert_eq!(h.editor.cursor().scroll_top(), 18);
}

#[test]
fn test_page_up_walks_window_back() {
    let lines: Vec<String> = (0..40).map(|i| format!("line{i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut h = EditorHarness::with_lines(&refs, 10, 40);
    h.send(&[PAGE_DOWN]);
    assert_eq!(h.editor.cursor().scroll_top(), 9);

    // The window retreats as far as the cursor row allows
    h.send(&[PAGE_UP]);
    assert_eq!(h.cursor_pos(), (10, 0));
    assert_eq!(h.editor.cursor().scroll_top(), 1);

    h.send(&[PAGE_UP]);
    assert_eq!(h.cursor_pos(), (2, 0));
    assert_eq!(h.editor.cursor().scroll_top(), 0);

    // At the top the cursor collapses to the first line
    h.send(&[PAGE_UP]);
    assert_eq!(h.cursor_pos(), (0, 0));
}

#[test]
fn test_wrapped_line_scroll_absorbs_hidden_wrap() {
    let long = "x".repeat(25); // 3 physical rows at 10 columns
    let mut lines = vec![long];
    lines.extend((0..30).map(|i| format!("line{i}")));
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut h = EditorHarness::with_lines(&refs, 5, 10);

    h.send_owned(&repeat(DOWN, 6));
    let cursor = h.editor.cursor();
    assert_eq!(cursor.hidden_wrap(), 2);
    assert!(cursor.scroll_top() >= 1);
    let phys = cursor.physical_row(h.editor.content(), 10);
    assert!((0..=5).contains(&phys), "physical row {phys}");
}

#[test]
fn test_long_walk_keeps_cursor_in_window_every_step() {
    // Walk the full document down and back up past a multi-row wrapped
    // line, checking the projected row after every single keystroke
    // (the step right after the wrap absorb is the one that regresses).
    let long = "x".repeat(25);
    let mut lines = vec![long];
    lines.extend((0..30).map(|i| format!("line{i}")));
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut h = EditorHarness::with_lines(&refs, 5, 10);

    for step in 0..35 {
        h.send(&[DOWN]);
        let phys = h.editor.cursor().physical_row(h.editor.content(), 10);
        assert!((0..=5).contains(&phys), "physical row {phys} after {} downs", step + 1);
    }
    assert_eq!(h.editor.cursor().row(), 30);

    for step in 0..35 {
        h.send(&[UP]);
        let phys = h.editor.cursor().physical_row(h.editor.content(), 10);
        assert!((0..=5).contains(&phys), "physical row {phys} after {} ups", step + 1);
    }
    assert_eq!(h.cursor_pos(), (0, 0));
    assert_eq!(h.editor.cursor().scroll_top(), 0);
    assert_eq!(h.editor.cursor().hidden_wrap(), 0);
}

#[test]
fn test_find_jumps_and_scrolls() {
    let mut lines: Vec<String> = (0..40).map(|i| format!("line{i}")).collect();
    lines[20] = "the needle here".to_string();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut h = EditorHarness::with_lines(&refs, 10, 40);

    h.send(&[CTRL_F, b"needle", ENTER]);
    assert_eq!(h.cursor_pos(), (20, 4));
    assert_eq!(h.editor.cursor().scroll_top(), 20);
    assert!(h.frames().contains("Search: needle"));
}

#[test]
fn test_find_steps_between_matches() {
    let mut h = EditorHarness::with_lines(&["abc", "abc", "abc"], 10, 40);
    h.send(&[CTRL_F, b"abc", RIGHT, RIGHT, LEFT, ENTER]);
    assert_eq!(h.cursor_pos(), (1, 0));
}

#[test]
fn test_unsaved_changes_guard() {
    let mut h = EditorHarness::with_lines(&["hello"], 10, 40);
    h.send(&[b"x", CTRL_Q]);
    assert!(h.frames().contains("unsaved changes"));
    // Still running: the next script is processed
    h.send(&[CTRL_S, CTRL_Q]);
    assert_eq!(h.saved_text(), "xhello\n");
}

#[test]
fn test_overflow_line_renders_placeholder_rows() {
    let long = "y".repeat(100);
    let mut h = EditorHarness::with_lines(&[&long], 3, 10);
    h.send(&[]);
    assert!(h.frames().contains('@'));
    assert!(!h.frames().contains('y'));
}

#[test]
fn test_filler_rows_past_document_end() {
    let mut h = EditorHarness::with_lines(&["one"], 5, 40);
    h.send(&[]);
    assert!(h.frames().contains('~'));
}

#[test]
fn test_status_line_shows_viewport_counters() {
    let mut h = EditorHarness::with_lines(&["hello"], 10, 60);
    h.send(&[]);
    let frames = h.frames();
    assert!(frames.contains("cY: 0"));
    assert!(frames.contains("oY: 0"));
    assert!(frames.contains("hw: 0"));
}

#[test]
fn test_wide_codepoint_editing() {
    let mut h = EditorHarness::with_lines(&["你好"], 10, 40);
    h.send(&[RIGHT, b"x", CTRL_S]);
    assert_eq!(h.lines(), vec!["你x好"]);
    assert_eq!(h.saved_text(), "你x好\n");
    assert_eq!(h.cursor_pos(), (0, 2));
}

#[test]
fn test_enter_splits_and_saves_both_lines() {
    let mut h = EditorHarness::with_lines(&["split here"], 10, 40);
    h.send(&[RIGHT, RIGHT, RIGHT, RIGHT, RIGHT, ENTER, CTRL_S]);
    assert_eq!(h.lines(), vec!["split", " here"]);
    assert_eq!(h.saved_text(), "split\n here\n");
    assert_eq!(h.cursor_pos(), (1, 0));
}
