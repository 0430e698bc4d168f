use super::*;

fn editor(prompt_len: usize) -> LineEditor {
    let mut editor = LineEditor::new(false);
    editor.start(prompt_len);
    editor
}

#[test]
fn test_insert_at_end_appends() {
    let mut ed = editor(2);
    let mut buf = String::new();
    assert_eq!(ed.insert_char(&mut buf, 'a'), Repaint { from: 0, blank: 0 });
    assert_eq!(ed.insert_char(&mut buf, 'b'), Repaint { from: 1, blank: 0 });
    assert_eq!(buf, "ab");
    assert_eq!(ed.cursor(), 4);
    assert_eq!(ed.position(), 2);
}

#[test]
fn test_insert_in_middle_shifts_tail() {
    let mut ed = editor(2);
    let mut buf = String::from("ac");
    ed.move_to_end(2);
    assert!(ed.move_left());
    let repaint = ed.insert_char(&mut buf, 'b');
    assert_eq!(buf, "abc");
    assert_eq!(repaint, Repaint { from: 1, blank: 0 });
    assert_eq!(ed.position(), 2);
}

#[test]
fn test_insert_past_end_appends() {
    let mut ed = editor(0);
    let mut buf = String::from("long line");
    ed.move_to_end(9);
    buf.truncate(3);
    ed.insert_char(&mut buf, '!');
    assert_eq!(buf, "lon!");
    assert_eq!(ed.position(), 4);
}

#[test]
fn test_replace_mode_overwrites() {
    let mut ed = LineEditor::new(true);
    ed.start(1);
    let mut buf = String::from("abc");
    let repaint = ed.insert_char(&mut buf, 'X');
    assert_eq!(buf, "Xbc");
    assert_eq!(repaint.from, 0);
    assert_eq!(ed.position(), 1);

    ed.move_to_end(3);
    ed.insert_char(&mut buf, 'd');
    assert_eq!(buf, "Xbcd");
}

#[test]
fn test_toggle_replace() {
    let mut ed = editor(0);
    assert!(!ed.replace_mode());
    assert!(ed.toggle_replace());
    assert!(ed.replace_mode());
    assert!(!ed.toggle_replace());
}

#[test]
fn test_motion_is_clamped() {
    let mut ed = editor(2);
    assert!(!ed.move_left());
    assert_eq!(ed.cursor(), 2);

    assert!(ed.move_right(2));
    assert!(ed.move_right(2));
    assert!(!ed.move_right(2));
    assert_eq!(ed.cursor(), 4);

    assert!(ed.move_left());
    assert_eq!(ed.cursor(), 3);
}

#[test]
fn test_delete_back() {
    let mut ed = editor(2);
    let mut buf = String::from("abc");
    ed.move_to_end(3);
    ed.move_left();

    let repaint = ed.delete_back(&mut buf);
    assert_eq!(buf, "ac");
    assert_eq!(repaint, Some(Repaint { from: 1, blank: 1 }));
    assert_eq!(ed.position(), 1);

    ed.delete_back(&mut buf);
    assert_eq!(buf, "c");
    assert_eq!(ed.delete_back(&mut buf), None);
    assert_eq!(buf, "c");
}

#[test]
fn test_delete_back_past_end_clamps_first() {
    let mut ed = editor(0);
    let mut buf = String::from("abcdef");
    ed.move_to_end(6);
    buf.truncate(2);
    assert!(ed.delete_back(&mut buf).is_some());
    assert_eq!(buf, "a");
    assert_eq!(ed.position(), 1);
}

#[test]
fn test_is_visible() {
    assert!(LineEditor::is_visible(' '));
    assert!(LineEditor::is_visible('a'));
    assert!(LineEditor::is_visible('~'));
    assert!(!LineEditor::is_visible('\t'));
    assert!(!LineEditor::is_visible('\u{7f}'));
    assert!(!LineEditor::is_visible('é'));
}
