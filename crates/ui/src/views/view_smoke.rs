use dioxus::prelude::*;
use draw_core::wheel::ColorScheme;
use services::Roster;

use super::test_harness::{sample_roster, setup_view_harness};
use crate::views::{Wheel, WheelProps};

#[test]
fn draw_view_renders_both_wheels_and_roster() {
    let harness = setup_view_harness(sample_roster(), &["1", "2"]);
    let html = harness.render();

    assert!(html.contains("Métaphore"), "missing term label in {html}");
    assert!(html.contains("Alice"), "missing student in {html}");
    assert!(html.contains("Bruno"), "missing student in {html}");
    assert!(html.contains("2 / 2 présents"), "missing presence count in {html}");
    assert!(html.contains("Lancer la roue"), "missing spin button in {html}");
    assert!(!html.contains("Terme tiré"), "selection shown before any spin: {html}");
}

#[test]
fn absent_students_render_greyed_out() {
    let harness = setup_view_harness(sample_roster(), &["2"]);
    let html = harness.render();

    assert!(html.contains("#ccc"), "missing disabled wedge in {html}");
    assert!(html.contains("slice-label disabled"), "missing muted label in {html}");
    assert!(html.contains("1 / 2 présents"), "missing presence count in {html}");
}

#[test]
fn finished_spin_shows_selection_then_definition() {
    let mut harness = setup_view_harness(sample_roster(), &["2"]);
    assert!(harness.controller.start_spin());
    harness
        .scheduler
        .advance(harness.controller.settings().completion_delay());
    harness.controller.reveal();

    harness.remount();
    let html = harness.render();
    assert!(html.contains("Terme tiré"), "missing selection panel in {html}");
    assert!(html.contains("Bruno"), "missing drawn student in {html}");
    assert!(html.contains("Figure de style par analogie"), "missing definition in {html}");
}

#[test]
fn empty_roster_disables_spin() {
    let harness = setup_view_harness(Roster::default(), &[]);
    let html = harness.render();
    assert!(html.contains("0 / 0 présents"), "missing presence count in {html}");
    assert!(html.contains("Lancer la roue"), "missing spin button in {html}");
    assert!(!harness.controller.can_spin());
}

#[test]
fn wheel_renders_wedges_for_each_item() {
    let mut dom = VirtualDom::new_with_props(
        Wheel,
        WheelProps {
            items: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            selected_index: None,
            spinning: false,
            spin_id: 0,
            duration_ms: 10_000,
            base_turns: 8,
            disabled_indices: Vec::new(),
            scheme: ColorScheme::Terms,
        },
    );
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);

    assert_eq!(html.matches("<path").count(), 3, "{html}");
    assert!(html.contains("hsl(210 85% 55%)"), "{html}");
    assert!(html.contains("hsl(190 85% 55%)"), "{html}");
    assert!(html.contains("rotate(0deg)"), "{html}");
}
