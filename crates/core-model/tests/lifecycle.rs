//! Surface lifecycle, update order and removal behavior.

mod common;

use common::{Event, Recording, count, screen, text_at};
use core_model::{ModelError, Screen, StructuralFault};
use core_render::{Surface, SurfaceError};
use pretty_assertions::assert_eq;

#[test]
fn update_visits_children_before_parents() {
    let (rec, log) = Recording::new();
    let mut s = Screen::new(rec).unwrap();
    let a = s.add_window("a", 0, 0, 10, 30, true).unwrap();
    let b = s.add_window("b", 0, 12, 10, 30, false).unwrap();
    let (a1, a2, a2x) = {
        let mut wa = s.window(a).unwrap();
        let a1 = wa.add_window("a1", 0, 0, 3, 5, false).unwrap();
        let a2 = wa.add_window("a2", 0, 4, 5, 10, true).unwrap();
        let a2x = wa
            .child_window("a2")
            .unwrap()
            .add_window("a2x", 1, 1, 2, 2, false)
            .unwrap();
        (a1, a2, a2x)
    };
    let root = s.root();
    let sid = |s: &mut Screen<Recording>, id| s.window(id).unwrap().surface_id().unwrap();
    let expected = vec![
        Event::Flush(sid(&mut s, a1)),
        Event::Flush(sid(&mut s, a2x)),
        Event::Flush(sid(&mut s, a2)),
        Event::Flush(sid(&mut s, a)),
        Event::Flush(sid(&mut s, b)),
        Event::Flush(sid(&mut s, root)),
    ];

    log.borrow_mut().clear();
    s.update().unwrap();
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn dropping_screen_balances_surfaces_deepest_first() {
    let (rec, log) = Recording::new();
    {
        let mut s = Screen::new(rec).unwrap();
        let outer = s.add_window("outer", 1, 1, 12, 40, true).unwrap();
        let mut w = s.window(outer).unwrap();
        w.add_window("mid", 1, 1, 8, 20, true).unwrap();
        w.child_window("mid")
            .unwrap()
            .add_window("inner", 1, 1, 3, 3, false)
            .unwrap();
        w.add_text("label", 25, 0, "hello").unwrap();
        s.update().unwrap();
    }
    let log = log.borrow();
    let creates: Vec<_> = log
        .iter()
        .filter_map(|e| match e {
            Event::Create(id) => Some(*id),
            _ => None,
        })
        .collect();
    let destroys: Vec<_> = log
        .iter()
        .filter_map(|e| match e {
            Event::Destroy(id) => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(creates.len(), 3);
    // inner, mid, outer: the reverse of creation for a single chain.
    assert_eq!(destroys, creates.iter().rev().copied().collect::<Vec<_>>());
    assert_eq!(count(&log, |e| *e == Event::Acquire), 1);
    assert_eq!(count(&log, |e| *e == Event::Release), 1);
    assert_eq!(log.last(), Some(&Event::Release));
}

#[test]
fn close_returns_surface_with_balanced_stats() {
    let mut s = screen();
    let w = s.add_window("w", 2, 2, 10, 10, true).unwrap();
    s.window(w).unwrap().add_window("x", 0, 0, 4, 4, true).unwrap();
    s.add_window("y", 15, 2, 3, 3, false).unwrap();
    s.remove("y").unwrap();
    let surface = s.close().unwrap();
    let stats = surface.stats();
    assert_eq!(stats.created, 3);
    assert_eq!(stats.destroyed, 3);
    assert_eq!(stats.live(), 0);
    assert_eq!((stats.acquired, stats.released), (1, 1));
    assert!(!surface.is_acquired());
}

#[test]
fn removing_twice_reports_not_found() {
    let mut s = screen();
    s.add_text("t", 0, 0, "abc").unwrap();
    s.remove("t").unwrap();
    let err = s.remove("t").unwrap_err();
    assert!(err.is_not_found(), "{err}");
    assert!(matches!(err, ModelError::NotFound { ref name, .. } if name == "t"));
}

#[test]
fn removing_window_blanks_footprint_and_destroys_subtree() {
    let mut s = screen();
    let w = s.add_window("w", 5, 2, 6, 12, true).unwrap();
    let inner = s.window(w).unwrap().add_window("inner", 2, 1, 3, 6, true).unwrap();
    s.window(inner).unwrap().add_text("t", 0, 0, "hey").unwrap();
    let live_before = s.window_count();

    s.remove("w").unwrap();
    for row in 2..8 {
        assert_eq!(text_at(&s, row, 5, 12), " ".repeat(12), "row {row}");
    }
    assert_eq!(s.window_count(), live_before - 2);
    assert_eq!(s.surface().unwrap().stats().live(), 0);

    // Handles of destroyed windows are structural errors, not aliases.
    for id in [w, inner] {
        let err = s.window(id).err().expect("stale handle");
        assert!(matches!(
            err,
            ModelError::Structural(StructuralFault::Destroyed(_))
        ));
    }
}

#[test]
fn edge_touching_removal_repaints_border() {
    let mut s = screen();
    let w = s.add_window("w", 0, 0, 6, 10, true).unwrap();
    let mut win = s.window(w).unwrap();
    // Content is 5x9 starting at surface (1,1); the last content column is
    // the right border column.
    win.add_text("edge", 8, 2, "x").unwrap();
    win.add_text("mid", 2, 2, "m").unwrap();
    assert_eq!(text_at(&s, 3, 9, 1), "x");

    s.window(w).unwrap().remove("edge").unwrap();
    assert_eq!(text_at(&s, 3, 9, 1), "|");
    assert_eq!(text_at(&s, 3, 3, 1), "m");
    for (r, c) in [(0, 0), (0, 9), (5, 0), (5, 9)] {
        assert_eq!(text_at(&s, r, c, 1), "+");
    }
}

#[test]
fn duplicate_names_are_refused() {
    let mut s = screen();
    s.add_text("dup", 0, 0, "one").unwrap();
    let err = s.add_window("dup", 0, 5, 2, 2, false).unwrap_err();
    assert!(matches!(
        err,
        ModelError::Structural(StructuralFault::DuplicateName { .. })
    ));
    assert_eq!(text_at(&s, 0, 0, 3), "one");
    assert_eq!(s.surface().unwrap().stats().created, 0);
}

#[test]
fn failed_border_paint_leaves_parent_untouched() {
    let (mut rec, log) = Recording::new();
    rec.fail_border = true;
    let mut s = Screen::new(rec).unwrap();
    let err = s.add_window("w", 0, 0, 4, 4, true).unwrap_err();
    assert!(err.is_surface(), "{err}");
    assert_eq!(s.root_window().unwrap().child_count().unwrap(), 0);
    assert_eq!(s.window_count(), 1);
    let log = log.borrow();
    assert_eq!(count(&log, |e| matches!(e, Event::Create(_))), 1);
    assert_eq!(count(&log, |e| matches!(e, Event::Destroy(_))), 1);
}

#[test]
fn removal_kind_checks() {
    let mut s = screen();
    s.add_text("t", 0, 0, "t").unwrap();
    s.add_window("w", 0, 2, 2, 2, false).unwrap();
    let mut root = s.root_window().unwrap();
    assert!(root.remove_window("t").unwrap_err().is_not_found());
    assert!(root.remove_text("w").unwrap_err().is_not_found());
    root.remove_window("w").unwrap();
    root.remove_text("t").unwrap();
    assert_eq!(root.child_count().unwrap(), 0);
}

#[test]
fn screen_reports_unavailable_terminal() {
    let (mut rec, log) = Recording::new();
    rec.fail_acquire = true;
    let err = Screen::new(rec).err().expect("acquire failure");
    assert!(err.is_surface(), "{err}");
    assert!(matches!(
        err,
        ModelError::Surface(SurfaceError::Unavailable(_))
    ));
    assert!(log.borrow().is_empty());
}

#[test]
fn screen_refuses_surface_that_is_already_held() {
    let mut surface = common::ascii_surface();
    surface.acquire().unwrap();
    let err = Screen::new(surface).err().expect("second acquire");
    assert!(matches!(
        err,
        ModelError::Surface(SurfaceError::AlreadyAcquired)
    ));
}

#[test]
fn failed_size_query_releases_the_surface() {
    let (mut rec, log) = Recording::new();
    rec.fail_dimensions = true;
    let err = Screen::new(rec).err().expect("dimensions failure");
    assert!(err.is_surface(), "{err}");
    assert_eq!(*log.borrow(), vec![Event::Acquire, Event::Release]);
}

#[test]
fn border_overdraws_last_column_sibling_after_edge_removal() {
    let mut s = screen();
    let w = s.add_window("w", 0, 0, 6, 10, true).unwrap();
    let mut win = s.window(w).unwrap();
    // Content column 8 is the right border column (surface column 9).
    win.add_text("a", 8, 1, "a").unwrap();
    win.add_text("b", 8, 2, "b").unwrap();
    win.remove("a").unwrap();
    assert!(win.contains("b").unwrap());
    assert_eq!(text_at(&s, 2, 9, 1), "|");
    assert_eq!(text_at(&s, 3, 9, 1), "|");
}
