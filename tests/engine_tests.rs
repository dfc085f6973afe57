use flamebearer_canvas::color::SpyName;
use flamebearer_canvas::engine::{BarData, BarIndex, Flamegraph, ViewState};
use flamebearer_canvas::fit::FitMode;
use flamebearer_canvas::model::{Flamebearer, Metadata, ProfileKind};
use flamebearer_canvas::utils::config::BAR_HEIGHT;
use flamebearer_canvas::utils::error::EngineError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

const CANVAS_WIDTH: f64 = 600.0;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn single_fixture() -> Flamebearer {
    Flamebearer::new(
        names(&[
            "total",
            "runtime.main",
            "main.slowFunction",
            "main.work",
            "main.main",
            "main.fastFunction",
        ]),
        vec![
            vec![0, 988, 0, 0],
            vec![0, 988, 0, 1],
            vec![0, 214, 0, 5, 214, 3, 2, 4, 217, 771, 0, 2],
            vec![0, 214, 214, 3, 216, 1, 1, 5, 217, 771, 771, 3],
        ],
        988,
        ProfileKind::Single,
        Metadata {
            spy_name: SpyName::GoSpy,
            ..Default::default()
        },
    )
    .unwrap()
}

fn double_fixture() -> Flamebearer {
    Flamebearer::new(
        names(&[
            "total",
            "runtime/pprof.profileWriter",
            "runtime.mcall",
            "runtime.park_m",
            "runtime.schedule",
            "runtime.findrunnable",
            "runtime.netpoll",
            "runtime.epollwait",
            "runtime.main",
            "main.slowFunction",
            "main.work",
            "fmt.Printf",
            "fmt.Fprintf",
            "os.(*File).write",
            "syscall.Write",
            "syscall.write",
            "syscall.Syscall",
            "runtime.exitsyscall",
            "runtime.exitsyscallfast",
            "runtime.wirep",
            "main.fastFunction",
        ]),
        vec![
            vec![0, 246, 0, 0, 986, 0, 0],
            vec![0, 245, 0, 0, 985, 0, 8, 245, 1, 0, 985, 0, 0, 2, 246, 0, 0, 985, 1, 1, 1],
            vec![0, 49, 0, 0, 181, 0, 20, 49, 196, 0, 181, 804, 0, 9, 245, 1, 0, 985, 0, 0, 3],
            vec![
                0, 49, 49, 0, 181, 181, 10, 49, 0, 0, 181, 1, 0, 11, 49, 196, 196, 182, 803, 803, 10,
                245, 1, 0, 985, 0, 0, 4,
            ],
            vec![49, 0, 0, 181, 1, 0, 12, 245, 1, 0, 985, 0, 0, 5],
            vec![49, 0, 0, 181, 1, 0, 13, 245, 1, 0, 985, 0, 0, 6],
            vec![49, 0, 0, 181, 1, 0, 14, 245, 1, 1, 985, 0, 0, 7],
            vec![49, 0, 0, 181, 1, 0, 15],
            vec![49, 0, 0, 181, 1, 0, 16],
            vec![49, 0, 0, 181, 1, 0, 17],
            vec![49, 0, 0, 181, 1, 0, 18],
            vec![49, 0, 0, 181, 1, 1, 19],
        ],
        1232,
        ProfileKind::Double {
            left_ticks: 246,
            right_ticks: 986,
        },
        Metadata {
            spy_name: SpyName::GoSpy,
            ..Default::default()
        },
    )
    .unwrap()
}

fn engine(zoom: Option<BarIndex>, focus: Option<BarIndex>) -> Flamegraph {
    Flamegraph::new(single_fixture(), CANVAS_WIDTH, FitMode::Head, None, zoom, focus).unwrap()
}

fn data_json(engine: &Flamegraph, x: f64, y: f64) -> serde_json::Value {
    serde_json::to_value(engine.xy_to_bar_data(x, y)).unwrap()
}

#[test]
fn test_maps_total_row() {
    let flame = engine(None, None);
    assert_eq!(
        data_json(&flame, 0.0, 0.0),
        json!({"format": "single", "name": "total", "offset": 0, "self": 0, "total": 988})
    );
}

#[test]
fn test_maps_full_row() {
    let flame = engine(None, None);
    assert_eq!(
        data_json(&flame, 1.0, BAR_HEIGHT + 1.0),
        json!({"format": "single", "name": "runtime.main", "offset": 0, "self": 0, "total": 988})
    );
}

#[test]
fn test_maps_row_with_more_items() {
    let flame = engine(None, None);
    assert_eq!(
        data_json(&flame, 1.0, BAR_HEIGHT * 2.0 + 1.0),
        json!({"format": "single", "name": "main.fastFunction", "offset": 0, "self": 0, "total": 214})
    );
    assert_eq!(
        data_json(&flame, CANVAS_WIDTH - 1.0, BAR_HEIGHT * 2.0 + 1.0),
        json!({"format": "single", "name": "main.slowFunction", "offset": 217, "self": 0, "total": 771})
    );
}

#[test]
fn test_maps_zoomed_window() {
    let flame = engine(None, None);
    let slow = BarData::Single {
        name: "main.slowFunction".to_string(),
        offset: 217,
        self_ticks: 0,
        total: 771,
    };

    assert_eq!(flame.xy_to_bar_data(CANVAS_WIDTH, BAR_HEIGHT * 3.0), Some(slow.clone()));
    assert_ne!(flame.xy_to_bar_data(1.0, BAR_HEIGHT * 3.0), Some(slow.clone()));

    let zoomed = engine(Some(BarIndex::new(2, 8)), None);
    assert_eq!(zoomed.xy_to_bar_data(1.0, BAR_HEIGHT * 3.0), Some(slow));
}

#[test]
fn test_zoom_and_focus_on_root_reset() {
    let mut flame = engine(Some(BarIndex::new(2, 8)), Some(BarIndex::new(1, 0)));
    assert!(flame.is_dirty());

    flame.zoom(BarIndex::ROOT).unwrap();
    assert_eq!(*flame.state(), ViewState::identity());

    let mut flame = engine(Some(BarIndex::new(2, 8)), Some(BarIndex::new(1, 0)));
    flame.focus(BarIndex::ROOT).unwrap();
    assert_eq!(*flame.state(), ViewState::identity());
}

#[test]
fn test_focus_at_or_below_zoom_clears_it() {
    let mut flame = engine(Some(BarIndex::new(2, 8)), None);
    flame.focus(BarIndex::new(2, 8)).unwrap();

    let state = flame.state();
    assert_eq!(state.zoom, None);
    assert_eq!(state.focused_node, Some(BarIndex::new(2, 8)));
    assert_eq!(state.top_level, 2);
    assert_eq!(state.range_min, 217.0 / 988.0);
    assert_eq!(state.range_max, 1.0);
}

#[test]
fn test_focus_above_zoom_keeps_it() {
    let mut flame = engine(Some(BarIndex::new(3, 8)), None);
    flame.focus(BarIndex::new(2, 8)).unwrap();

    assert_eq!(flame.state().zoom, Some(BarIndex::new(3, 8)));
    assert_eq!(flame.state().top_level, 2);
}

#[test]
fn test_zoom_above_focus_is_rejected() {
    let mut flame = engine(None, Some(BarIndex::new(2, 8)));
    assert_eq!(
        flame.zoom(BarIndex::new(1, 0)),
        Err(EngineError::ZoomAboveFocus { zoom: 1, focus: 2 })
    );
}

#[test]
fn test_unknown_bar_is_rejected() {
    let mut flame = engine(None, None);
    assert_eq!(
        flame.zoom(BarIndex::new(2, 12)),
        Err(EngineError::UnknownBar { level: 2, slot: 12 })
    );
    assert!(!flame.is_dirty());
}

#[test]
fn test_clear_zoom_returns_to_focus() {
    let mut flame = engine(Some(BarIndex::new(3, 8)), Some(BarIndex::new(2, 8)));
    flame.clear_zoom();

    assert_eq!(flame.state().zoom, None);
    assert_eq!(flame.state().range_min, 217.0 / 988.0);
    assert!(flame.state().is_focused());
}

#[test]
fn test_hit_test_while_focused() {
    let flame = engine(None, Some(BarIndex::new(2, 8)));

    // The synthetic bar on top stands for the root
    assert_eq!(flame.xy_to_bar(10.0, 1.0).unwrap(), Some(BarIndex::ROOT));
    assert_eq!(flame.xy_to_bar(1.0, BAR_HEIGHT + 1.0).unwrap(), Some(BarIndex::new(2, 8)));
    assert_eq!(
        flame.xy_to_bar(1.0, BAR_HEIGHT + 19.0).unwrap(),
        Some(BarIndex::new(3, 8))
    );

    let position = flame.xy_to_bar_position(10.0, 1.0).unwrap();
    assert_eq!((position.x, position.y, position.width), (0.0, 0.0, CANVAS_WIDTH));
}

#[test]
fn test_collapsed_bars_are_not_clickable() {
    let flame = engine(None, None);

    // (3, 4) spans a single tick, well under the collapse threshold
    let x = flame.tick_to_x(216) + 0.2;
    assert_eq!(flame.xy_to_bar(x, BAR_HEIGHT * 3.0 + 2.0).unwrap(), None);
    assert!(!flame.is_within_bounds(x, BAR_HEIGHT * 3.0 + 2.0));
}

#[test]
fn test_out_of_canvas_points() {
    let flame = engine(None, None);

    assert_eq!(
        flame.xy_to_bar(-1.0, 0.0),
        Err(EngineError::NegativeCoordinate { x: -1.0, y: 0.0 })
    );
    assert_eq!(flame.xy_to_bar(CANVAS_WIDTH + 1.0, 0.0).unwrap(), None);
    assert_eq!(flame.xy_to_bar(10.0, 18.0 * 10.0).unwrap(), None);
    assert_eq!(flame.hit_test(-1.0, 0.0), None);

    assert_eq!(flame.xy_to_bar(f64::NAN, 1.0).unwrap(), None);
    assert_eq!(flame.xy_to_bar(10.0, f64::NAN).unwrap(), None);
    assert_eq!(flame.xy_to_bar(10.0, f64::INFINITY).unwrap(), None);

    // a row index near usize::MAX must not wrap past the focused level
    let focused = engine(None, Some(BarIndex::new(1, 0)));
    assert_eq!(focused.xy_to_bar(10.0, 1e30).unwrap(), None);
    assert_eq!(focused.xy_to_bar(10.0, f64::MAX).unwrap(), None);
    assert_eq!(focused.hit_test(10.0, f64::NAN), None);
}

#[test]
fn test_bar_position_clamps_to_canvas() {
    let flame = engine(Some(BarIndex::new(2, 8)), None);

    // runtime.main starts left of the zoomed window
    let position = flame.xy_to_bar_position(10.0, BAR_HEIGHT + 1.0).unwrap();
    assert_eq!(position.x, 0.0);
    assert_eq!(position.y, 18.0);
    assert!((position.width - CANVAS_WIDTH).abs() < 1e-9);

    let position = flame.xy_to_bar_position(10.0, BAR_HEIGHT * 2.0 + 1.0).unwrap();
    assert_eq!(position.x, 0.0);
    assert_eq!(position.y, 36.0);
}

#[test]
fn test_replacing_flamebearer_keeps_valid_state() {
    let mut flame = engine(Some(BarIndex::new(2, 8)), None);
    flame.set_flamebearer(single_fixture());
    assert_eq!(flame.state().zoom, Some(BarIndex::new(2, 8)));

    let mut flame = engine(Some(BarIndex::new(2, 8)), None);
    let smaller = Flamebearer::new(
        names(&["total", "main"]),
        vec![vec![0, 10, 0, 0], vec![0, 10, 10, 1]],
        10,
        ProfileKind::Single,
        Metadata::default(),
    )
    .unwrap();
    flame.set_flamebearer(smaller);
    assert!(!flame.is_dirty());
}

/// Two children under the root; the second one spans `10..num_ticks`
fn two_children(num_ticks: u64) -> Flamebearer {
    Flamebearer::new(
        names(&["total", "a", "b"]),
        vec![
            vec![0, num_ticks, 0, 0],
            vec![0, 10, 10, 1, 10, num_ticks - 10, num_ticks - 10, 2],
        ],
        num_ticks,
        ProfileKind::Single,
        Metadata::default(),
    )
    .unwrap()
}

#[test]
fn test_replacing_flamebearer_recomputes_zoom_window() {
    let mut flame = Flamegraph::new(
        two_children(20),
        CANVAS_WIDTH,
        FitMode::Head,
        None,
        Some(BarIndex::new(1, 4)),
        None,
    )
    .unwrap();
    assert_eq!(flame.state().range_min, 0.5);

    flame.set_flamebearer(two_children(100));

    let state = flame.state();
    assert_eq!(state.zoom, Some(BarIndex::new(1, 4)));
    assert!((state.range_min - 0.1).abs() < 1e-12);
    assert!((state.range_max - 1.0).abs() < 1e-12);
    assert!(flame.tick_to_x(10).abs() < 1e-9);
    assert!((flame.tick_to_x(100) - CANVAS_WIDTH).abs() < 1e-9);
    assert_eq!(flame.hit_test(CANVAS_WIDTH / 2.0, 19.0), Some(BarIndex::new(1, 4)));
}

#[test]
fn test_replacing_flamebearer_recomputes_focus_window() {
    let mut flame = Flamegraph::new(
        two_children(20),
        CANVAS_WIDTH,
        FitMode::Head,
        None,
        None,
        Some(BarIndex::new(1, 4)),
    )
    .unwrap();

    flame.set_flamebearer(two_children(100));

    let state = flame.state();
    assert_eq!(state.focused_node, Some(BarIndex::new(1, 4)));
    assert_eq!(state.top_level, 1);
    assert!((state.range_min - 0.1).abs() < 1e-12);
    assert!((state.range_max - 1.0).abs() < 1e-12);
}

#[test]
fn test_invalid_width() {
    let result = Flamegraph::new(single_fixture(), 0.0, FitMode::Head, None, None, None);
    assert!(matches!(result, Err(EngineError::InvalidWidth(_))));

    let mut flame = engine(None, None);
    assert!(flame.resize(f64::NAN).is_err());
    flame.resize(300.0).unwrap();
    assert_eq!(flame.width(), 300.0);
}

#[test]
fn test_double_maps_totals() {
    let flame =
        Flamegraph::new(double_fixture(), CANVAS_WIDTH, FitMode::Head, None, None, None).unwrap();

    assert_eq!(
        serde_json::to_value(flame.xy_to_bar_data(0.0, 0.0)).unwrap(),
        json!({
            "format": "double",
            "name": "total",
            "totalLeft": 246,
            "totalRight": 986,
            "barTotal": 1232,
            "totalDiff": 740
        })
    );
    assert_eq!(
        serde_json::to_value(flame.xy_to_bar_data(1.0, BAR_HEIGHT + 1.0)).unwrap(),
        json!({
            "format": "double",
            "name": "runtime.main",
            "totalLeft": 245,
            "totalRight": 985,
            "barTotal": 1230,
            "totalDiff": 740
        })
    );
}

#[test]
fn test_double_maps_row_with_more_items() {
    let flame =
        Flamegraph::new(double_fixture(), CANVAS_WIDTH, FitMode::Head, None, None, None).unwrap();

    assert_eq!(
        flame.xy_to_bar_data(1.0, BAR_HEIGHT * 2.0 + 1.0),
        Some(BarData::Double {
            name: "main.fastFunction".to_string(),
            bar_total: 230,
            total_left: 49,
            total_right: 181,
            total_diff: 132,
        })
    );
    assert_eq!(
        flame.xy_to_bar_data(CANVAS_WIDTH - 1.0, BAR_HEIGHT * 2.0 + 1.0),
        Some(BarData::Double {
            name: "main.slowFunction".to_string(),
            bar_total: 1000,
            total_left: 196,
            total_right: 804,
            total_diff: 608,
        })
    );
}

const ZOOMS: [Option<BarIndex>; 5] = [
    None,
    Some(BarIndex::new(1, 0)),
    Some(BarIndex::new(2, 0)),
    Some(BarIndex::new(2, 8)),
    Some(BarIndex::new(3, 8)),
];

proptest! {
    #[test]
    fn prop_tick_to_x_hits_the_same_bar(
        slot in prop::sample::select(vec![0usize, 4, 8]),
        frac in 0.0f64..1.0,
        zoom in prop::sample::select(ZOOMS.to_vec()),
    ) {
        let flame = engine(zoom, None);
        let (offset, total) = flame.flamebearer().bar_span(2, slot).unwrap();
        let tick = offset + 1 + (frac * (total - 2) as f64) as u64;
        let x = flame.tick_to_x(tick);
        let visible = (0.0..=CANVAS_WIDTH).contains(&x);
        let wide = total as f64 * flame.px_per_tick() > flame.config().collapse_threshold;

        let hit = flame.hit_test(x, BAR_HEIGHT * 2.0 + 1.0);
        if visible && wide {
            prop_assert_eq!(hit, Some(BarIndex::new(2, slot)));
        } else if !wide {
            prop_assert_eq!(hit, None);
        }
    }

    #[test]
    fn prop_window_edges_map_to_canvas_edges(zoom in prop::sample::select(ZOOMS.to_vec())) {
        let flame = engine(zoom, None);
        let state = flame.state();
        let viewport = flame.viewport();

        let left = (988.0 * state.range_min).round() as u64;
        let right = (988.0 * state.range_max).round() as u64;
        prop_assert!(viewport.tick_to_x(left).abs() < 1e-6);
        prop_assert!((viewport.tick_to_x(right) - CANVAS_WIDTH).abs() < 1e-6);
    }
}
