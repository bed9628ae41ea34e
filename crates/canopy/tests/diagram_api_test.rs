//! Integration tests for the Diagram API
//!
//! These tests drive a diagram the way a host would: build from records,
//! feed pointer events, and inspect the tree, selection and rendered output.

use std::{cell::RefCell, rc::Rc};

use canopy::{
    CanopyError, Diagram, NodeKind, Record,
    config::{AppConfig, KindColors, LayoutConfig, StyleConfig, ViewportConfig},
    draw::{DrawCommand, RecordingCanvas},
    geometry::Point,
    interaction::{InteractionState, PointerButton, PointerEvent, Update},
};

#[derive(Debug, Clone, Default, PartialEq)]
struct Risk {
    rpn: u32,
}

fn detail(id: &str, label: &str) -> Record<Risk> {
    Record::new(id, label, NodeKind::Detail, Risk::default())
}

/// Pump -> RSK-001 -> {Hazard, Harm (collapsed), Control (collapsed)}
fn pump_records() -> Vec<Record<Risk>> {
    let harm = Record::new("harm-1", "Harm\nOverdose", NodeKind::Harm, Risk { rpn: 12 })
        .collapsed()
        .with_children([
            detail("harm-1-sev", "Severity: 4"),
            detail("harm-1-prob", "Probability: 3"),
            detail("harm-1-rpn", "RPN: 12"),
        ]);
    let control = Record::new("ctl-1", "Control", NodeKind::Control, Risk::default())
        .collapsed()
        .with_children([
            detail("ctl-1-inh", "Inherent safety"),
            detail("ctl-1-prot", "Protective measure"),
            detail("ctl-1-info", "Information for safety"),
        ]);
    let sequence = Record::new("seq-rsk-001", "RSK-001", NodeKind::Sequence, Risk::default())
        .with_children([
            Record::new("hs-1", "Hazardous situation", NodeKind::Hazard, Risk::default()),
            harm,
            control,
        ]);

    let pump = Record::new("comp-pump", "Pump", NodeKind::Component, Risk::default())
        .with_child(sequence);
    vec![pump]
}

fn pump_diagram() -> Diagram<Risk> {
    let mut diagram = Diagram::new(AppConfig::default()).expect("default config is valid");
    diagram.build(pump_records()).expect("records are valid");
    diagram
}

fn visible(diagram: &Diagram<Risk>, id: &str) -> bool {
    diagram.node(id).expect("node exists").is_visible()
}

fn press(diagram: &mut Diagram<Risk>, id: &str) -> Update {
    let node = diagram.node(id).expect("node exists");
    let position = diagram.viewport().to_screen(node.bounds().center());
    diagram.handle_event(PointerEvent::Down {
        position,
        button: PointerButton::Primary,
    })
}

#[test]
fn test_expanding_harm_reveals_only_harm_details() {
    let mut diagram = pump_diagram();

    for id in [
        "harm-1-sev",
        "harm-1-prob",
        "harm-1-rpn",
        "ctl-1-inh",
        "ctl-1-prot",
        "ctl-1-info",
    ] {
        assert!(!visible(&diagram, id), "{id} should start hidden");
    }

    assert!(diagram.toggle("harm-1"));

    for id in ["harm-1-sev", "harm-1-prob", "harm-1-rpn"] {
        assert!(visible(&diagram, id), "{id} should be revealed");
    }
    for id in ["ctl-1-inh", "ctl-1-prot", "ctl-1-info"] {
        assert!(!visible(&diagram, id), "{id} should stay hidden");
    }
}

#[test]
fn test_toggle_and_activate_unknown_ids() {
    let mut diagram = pump_diagram();
    assert!(!diagram.toggle("no-such-node"));
    assert!(!diagram.activate("no-such-node"));
    assert!(!diagram.toggle("hs-1"), "leaves cannot be toggled");
}

fn assert_visibility_consistent(diagram: &Diagram<Risk>) {
    let tree = diagram.tree();
    for (_, node) in tree.iter().filter(|(_, node)| node.is_visible()) {
        if let Some(parent) = node.parent() {
            let parent = &tree[parent];
            assert!(
                parent.is_visible() && parent.is_expanded(),
                "{} is visible under hidden or collapsed {}",
                node.id(),
                parent.id()
            );
        }
    }
}

#[test]
fn test_toggle_of_hidden_node_is_ignored() {
    let mut diagram = pump_diagram();
    assert!(diagram.toggle("comp-pump"));
    assert!(!visible(&diagram, "harm-1"));

    assert!(!diagram.toggle("harm-1"), "hidden nodes have no glyph");
    assert!(!diagram.node("harm-1").unwrap().is_expanded());
    for id in ["harm-1-sev", "harm-1-prob", "harm-1-rpn"] {
        assert!(!visible(&diagram, id), "{id} should stay hidden");
    }
    assert_visibility_consistent(&diagram);

    let mut canvas = RecordingCanvas::new();
    diagram.render(&mut canvas);
    let rects = canvas
        .commands()
        .iter()
        .filter(|command| matches!(command, DrawCommand::RoundedRect { .. }))
        .count();
    assert_eq!(rects, 2, "only the root and the pump are drawn");
}

#[test]
fn test_collapse_all_cancels_drag_of_hidden_node() {
    let mut diagram = pump_diagram();
    assert_eq!(press(&mut diagram, "harm-1"), Update::Redraw);
    assert!(matches!(diagram.interaction_state(), InteractionState::Dragging(_)));

    diagram.collapse_all();
    assert_eq!(diagram.interaction_state(), InteractionState::Idle);

    let harm = diagram.node("harm-1").unwrap();
    assert!(!harm.is_dragging());
    let position = harm.position();
    let update = diagram.handle_event(PointerEvent::Move {
        position: Point::new(900.0, 700.0),
    });
    assert_eq!(update, Update::Unchanged);
    assert_eq!(diagram.node("harm-1").unwrap().position(), position);
    assert_visibility_consistent(&diagram);
}

#[test]
fn test_toggle_keeps_drag_of_node_that_stays_visible() {
    let mut diagram = pump_diagram();
    assert_eq!(press(&mut diagram, "comp-pump"), Update::Redraw);

    assert!(diagram.toggle("seq-rsk-001"));
    assert!(matches!(diagram.interaction_state(), InteractionState::Dragging(_)));

    assert!(diagram.toggle("comp-pump"));
    assert!(matches!(diagram.interaction_state(), InteractionState::Dragging(_)));
}

#[test]
fn test_toggle_cancels_drag_of_hidden_descendant() {
    let mut diagram = pump_diagram();
    assert_eq!(press(&mut diagram, "hs-1"), Update::Redraw);

    assert!(diagram.toggle("seq-rsk-001"));
    assert_eq!(diagram.interaction_state(), InteractionState::Idle);
    assert!(!diagram.node("hs-1").unwrap().is_dragging());
}

#[test]
fn test_activate_emits_snapshot_with_payload() {
    let mut diagram = pump_diagram();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    diagram.on_node_selected(move |snapshot| sink.borrow_mut().push(snapshot.clone()));

    assert!(diagram.activate("harm-1"));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, "harm-1");
    assert_eq!(seen[0].label, "Harm\nOverdose");
    assert_eq!(seen[0].kind, NodeKind::Harm);
    assert_eq!(seen[0].payload, Risk { rpn: 12 });
    assert_eq!(diagram.selected().map(|node| node.label()), Some("Harm\nOverdose"));
    assert_eq!(diagram.interaction_state(), InteractionState::Idle);
}

#[test]
fn test_pointer_drag_moves_node_but_not_children() {
    let mut diagram = pump_diagram();
    diagram.zoom_in();
    diagram.zoom_in();

    let before = diagram.node("comp-pump").unwrap().position();
    let child_before = diagram.node("seq-rsk-001").unwrap().position();

    assert_eq!(press(&mut diagram, "comp-pump"), Update::Redraw);
    let start = diagram
        .viewport()
        .to_screen(diagram.node("comp-pump").unwrap().bounds().center());
    let end = start.add_point(Point::new(121.0, -33.0));
    let _ = diagram.handle_event(PointerEvent::Move { position: end });
    let _ = diagram.handle_event(PointerEvent::Up {
        position: end,
        button: PointerButton::Primary,
    });

    let zoom = diagram.viewport().zoom();
    let after = diagram.node("comp-pump").unwrap().position();
    assert!((after.x() - (before.x() + 121.0 / zoom)).abs() < 1e-3);
    assert!((after.y() - (before.y() - 33.0 / zoom)).abs() < 1e-3);
    assert_eq!(diagram.node("seq-rsk-001").unwrap().position(), child_before);
    assert_eq!(diagram.selected().unwrap().id(), "comp-pump");
}

#[test]
fn test_refresh_restores_layout_and_expansion() {
    let mut diagram = pump_diagram();
    let original = diagram.node("hs-1").unwrap().bounds();

    assert_eq!(press(&mut diagram, "hs-1"), Update::Redraw);
    let _ = diagram.handle_event(PointerEvent::Move {
        position: Point::new(5.0, 5.0),
    });
    let _ = diagram.handle_event(PointerEvent::Up {
        position: Point::new(5.0, 5.0),
        button: PointerButton::Primary,
    });
    diagram.toggle("harm-1");
    diagram.zoom_in();
    let zoom = diagram.viewport().zoom();

    diagram.refresh().unwrap();

    assert_eq!(diagram.node("hs-1").unwrap().bounds(), original);
    assert!(!visible(&diagram, "harm-1-sev"));
    assert!(diagram.selected().is_none());
    assert_eq!(diagram.viewport().zoom(), zoom, "refresh keeps the viewport");
}

#[test]
fn test_expand_all_then_collapse_all() {
    let mut diagram = pump_diagram();

    diagram.expand_all();
    assert!(diagram.tree().iter().all(|(_, node)| node.is_visible()));

    diagram.collapse_all();
    let root = diagram.tree().root();
    assert!(diagram.tree()[root].is_expanded());
    assert!(visible(&diagram, "comp-pump"));
    assert!(!visible(&diagram, "seq-rsk-001"));
    assert!(!visible(&diagram, "harm-1"));
}

#[test]
fn test_zoom_stays_in_range_and_resets() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        ViewportConfig::default().with_zoom(0.5, 2.0, 1.3),
        StyleConfig::default(),
    );
    let mut diagram = Diagram::<()>::new(config).unwrap();

    for _ in 0..20 {
        diagram.zoom_in();
    }
    assert_eq!(diagram.viewport().zoom(), 2.0);
    for _ in 0..20 {
        diagram.zoom_out();
    }
    assert_eq!(diagram.viewport().zoom(), 0.5);

    diagram.reset_view();
    assert_eq!(diagram.viewport().zoom(), 1.0);
    assert!(diagram.viewport().pan().is_zero());
}

#[test]
fn test_duplicate_ids_keep_previous_content() {
    let mut diagram = pump_diagram();
    let err = diagram
        .build(vec![
            detail("twin", "One"),
            detail("twin", "Two"),
        ])
        .unwrap_err();

    assert!(matches!(err, CanopyError::Graph(_)));
    assert!(diagram.node("comp-pump").is_some());
}

#[test]
fn test_invalid_color_rejected_at_construction() {
    let style = StyleConfig::default()
        .with_kind_colors(KindColors::default().with(NodeKind::Control, "#zzz"));
    let config = AppConfig::new(LayoutConfig::default(), ViewportConfig::default(), style);

    let err = Diagram::<()>::new(config).unwrap_err();
    assert!(matches!(err, CanopyError::Config(_)));
}

#[test]
fn test_render_draws_only_visible_nodes() {
    let mut diagram = pump_diagram();
    let count_rects = |diagram: &Diagram<Risk>| {
        let mut canvas = RecordingCanvas::new();
        diagram.render(&mut canvas);
        canvas
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::RoundedRect { .. }))
            .count()
    };

    // root, pump, sequence, hazard, harm, control
    assert_eq!(count_rects(&diagram), 6);

    diagram.expand_all();
    assert_eq!(count_rects(&diagram), 12);
}

#[test]
fn test_render_svg_contains_labels() {
    let mut diagram = pump_diagram();
    diagram.toggle("harm-1");

    let svg = diagram.render_svg();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains("Overdose"));
    assert!(svg.contains("Severity: 4"));
    assert!(!svg.contains("Inherent safety"));
}

#[test]
fn test_export_svg_to_missing_directory_fails() {
    let diagram = pump_diagram();
    let err = diagram
        .export_svg("/nonexistent-canopy-dir/out.svg")
        .unwrap_err();
    assert!(matches!(err, CanopyError::Export(_)));
}
