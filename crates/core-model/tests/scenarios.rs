//! End-to-end placement scenarios on an 80x24 headless screen.

mod common;

use common::{screen, text_at};
use core_model::{Child, Footprint, Screen};
use core_render::BufferSurface;
use pretty_assertions::assert_eq;

fn assert_box_intact(s: &Screen<BufferSurface>, top: u16, left: u16, rows: u16, cols: u16) {
    let bottom = top + rows - 1;
    let right = left + cols - 1;
    for (r, c) in [(top, left), (top, right), (bottom, left), (bottom, right)] {
        assert_eq!(text_at(s, r, c, 1), "+", "corner ({r},{c})");
    }
    let mid_c = left + cols / 2;
    let mid_r = top + rows / 2;
    assert_eq!(text_at(s, top, mid_c, 1), "-");
    assert_eq!(text_at(s, bottom, mid_c, 1), "-");
    assert_eq!(text_at(s, mid_r, left, 1), "|");
    assert_eq!(text_at(s, mid_r, right, 1), "|");
}

#[test]
fn nested_bordered_windows_with_text() {
    let mut s = screen();
    assert_eq!(s.footprint(), Footprint::new(24, 80));

    let w1 = s.add_window("w1", 3, 3, 20, 20, true).unwrap();
    {
        let mut win = s.window(w1).unwrap();
        assert_eq!(win.footprint().unwrap(), Footprint::new(20, 20));
        assert_eq!(win.usable().unwrap(), Footprint::new(19, 19));
        win.add_text("t1", 0, 0, "window").unwrap();
        let w2 = win.add_window("w2", 4, 4, 10, 10, true).unwrap();
        assert_eq!(win.window("w2").unwrap(), w2);
        assert_eq!(win.names().unwrap(), vec!["t1", "w2"]);
    }
    s.update().unwrap();

    // Text lands one cell in from w1's top-left corner.
    assert_eq!(text_at(&s, 4, 4, 6), "window");
    assert_box_intact(&s, 3, 3, 20, 20);
    // w2 is anchored at content (4,4) of w1 => absolute (3+1+4, 3+1+4).
    assert_box_intact(&s, 8, 8, 10, 10);

    s.window(w1).unwrap().remove("t1").unwrap();
    assert_eq!(text_at(&s, 4, 4, 6), "      ");
    assert_box_intact(&s, 3, 3, 20, 20);
    assert_box_intact(&s, 8, 8, 10, 10);
    assert_eq!(s.window(w1).unwrap().child_count().unwrap(), 1);
}

#[test]
fn oversized_window_is_rejected_without_side_effects() {
    let mut s = screen();
    let w1 = s.add_window("w1", 3, 3, 20, 20, true).unwrap();
    s.window(w1).unwrap().add_text("t1", 0, 0, "window").unwrap();
    let created_before = s.surface().unwrap().stats().created;

    let mut win = s.window(w1).unwrap();
    let before = win.names().unwrap().into_iter().map(String::from).collect::<Vec<_>>();
    let err = win.add_window("big", 3, 3, 25, 25, false).unwrap_err();
    assert!(err.is_bounds(), "{err}");
    assert_eq!(win.child_count().unwrap(), 1);
    assert_eq!(win.names().unwrap(), before);
    assert_eq!(s.surface().unwrap().stats().created, created_before);
}

#[test]
fn screen_cannot_become_a_child() {
    let mut s = screen();
    let w1 = s.add_window("w1", 0, 0, 10, 10, false).unwrap();
    let spec = s.as_spec();

    let err = s.window(w1).unwrap().add(spec.clone()).unwrap_err();
    assert!(err.is_structural(), "{err}");
    let err = s.root_window().unwrap().add(spec).unwrap_err();
    assert!(err.is_structural(), "{err}");
    assert_eq!(s.window(w1).unwrap().child_count().unwrap(), 0);
}

#[test]
fn text_on_unbordered_screen_uses_raw_coordinates() {
    let mut s = screen();
    s.add_text("field", 10, 10, "My awesome app").unwrap();
    s.update().unwrap();
    assert_eq!(text_at(&s, 10, 10, 14), "My awesome app");
    assert_eq!(
        s.surface().unwrap().displayed_text(10, 10, 14),
        "My awesome app"
    );
    match s.root_window().unwrap().child("field").unwrap() {
        Child::Text(t) => assert_eq!(t.content(), "My awesome app"),
        Child::Window(_) => panic!("expected text"),
    }
}

#[test]
fn nested_navigation_by_name() {
    let mut s = screen();
    let w1 = s.add_window("test", 3, 3, 20, 20, true).unwrap();
    let mut win = s.window(w1).unwrap();
    win.add_window("test2", 4, 4, 10, 10, true).unwrap();
    {
        let mut sub = win.child_window("test2").unwrap();
        sub.add_text("field", 0, 0, "sub").unwrap();
        assert_eq!(sub.text("field").unwrap().content(), "sub");
        sub.remove_text("field").unwrap();
        assert!(sub.remove_text("field").unwrap_err().is_not_found());
    }
    assert!(matches!(win.child_window("missing"), Err(e) if e.is_not_found()));
}
