// File: crates/hurricane-core/tests/axis.rs
// Purpose: Tick placement, label formatting and plot margins.

use hurricane_core::axis::{format_tick, nice_ticks, Axis};
use hurricane_core::types::Insets;

#[test]
fn ticks_land_on_nice_steps() {
    assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    assert_eq!(nice_ticks(0.0, 21.0, 6), vec![0.0, 5.0, 10.0, 15.0, 20.0]);
    let t = nice_ticks(-1.0, 1.0, 4);
    assert!(t.contains(&0.0));
    assert!(t.iter().all(|v| (-1.0..=1.0).contains(v)));
}

#[test]
fn degenerate_axis_is_widened() {
    let a = Axis::new("y", 3.0, 3.0);
    assert!(a.span() > 0.0);
    assert!(!a.ticks(5).is_empty());
}

#[test]
fn tick_labels_are_compact() {
    assert_eq!(format_tick(20.0), "20");
    assert_eq!(format_tick(-0.5), "-0.5");
    assert_eq!(format_tick(2.25), "2.25");
    assert_eq!(format_tick(1.0 / 3.0), "0.333");
}

#[test]
fn negative_margins_clamp_to_zero() {
    let m = Insets::new(-5.0, 10.0, f32::NAN, -0.5);
    assert_eq!(m, Insets::new(0.0, 10.0, 0.0, 0.0));
    let r = Insets::scaled(100.0, 50.0, -0.1, 0.1, 0.0, -0.2).inner(100.0, 50.0);
    assert_eq!((r.left, r.right, r.top, r.bottom), (0.0, 90.0, 0.0, 50.0));
}
