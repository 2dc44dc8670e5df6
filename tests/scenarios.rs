//! Worked scenarios over small fixed trees

use sapling::*;
use test_case::test_case;
use test_helpers::*;

#[test]
fn test_seven_key_shape() {
    let tree = sequential_tree(7);
    let root = tree.root().expect("non-empty tree");

    assert_eq!(root.key, 4);
    let left = root.left.as_deref().unwrap();
    let right = root.right.as_deref().unwrap();
    assert_eq!(left.key, 2);
    assert_eq!(right.key, 6);
    assert_eq!(left.left.as_ref().unwrap().key, 1);
    assert_eq!(left.right.as_ref().unwrap().key, 3);
    assert_eq!(right.left.as_ref().unwrap().key, 5);
    assert_eq!(right.right.as_ref().unwrap().key, 7);
}

#[test_case(5, SearchMode::Binary, &[4, 6, 5], true ; "binary hit")]
#[test_case(8, SearchMode::Binary, &[4, 6, 7], false ; "binary miss above")]
#[test_case(0, SearchMode::Binary, &[4, 2, 1], false ; "binary miss below")]
#[test_case(4, SearchMode::Binary, &[4], true ; "binary root")]
#[test_case(3, SearchMode::Linear, &[4, 2, 1, 3], true ; "linear hit")]
#[test_case(7, SearchMode::Linear, &[4, 2, 1, 3, 6, 5, 7], true ; "linear last")]
#[test_case(8, SearchMode::Linear, &[4, 2, 1, 3, 6, 5, 7], false ; "linear miss")]
fn test_seven_key_searches(target: Key, mode: SearchMode, path: &[Key], found: bool) {
    let mut tree = sequential_tree(7);
    let events = run_to_end(&mut tree, target, mode);

    assert_eq!(visited(&events), path);
    let result = outcome(&events);
    assert_eq!(result.found, found);
    assert_eq!(result.target, target);
    assert_eq!(result.steps, path.len());
    // Exactly one terminal event, at the end
    assert_eq!(events.iter().filter(|e| e.outcome().is_some()).count(), 1);
}

#[test_case(SearchMode::Linear ; "linear")]
#[test_case(SearchMode::Binary ; "binary")]
fn test_empty_tree_search(mode: SearchMode) {
    let mut tree = BalancedTree::from_sorted(&[]);
    assert!(tree.is_empty());

    let events = run_to_end(&mut tree, 42, mode);
    assert!(visited(&events).is_empty());
    assert!(!outcome(&events).found);
}

#[test]
fn test_visual_states_after_binary_hit() {
    let mut tree = sequential_tree(7);
    run_to_end(&mut tree, 5, SearchMode::Binary);

    assert_eq!(tree.visual_state_of(4), Some(VisualState::Visited));
    assert_eq!(tree.visual_state_of(6), Some(VisualState::Visited));
    assert_eq!(tree.visual_state_of(5), Some(VisualState::Found));
    for untouched in [1, 2, 3, 7] {
        assert_eq!(tree.visual_state_of(untouched), Some(VisualState::Default));
    }
}

#[test]
fn test_layout_of_seven_keys_on_default_canvas() {
    let tree = sequential_tree(7);
    let config = VisualizerConfig::default();
    let layout = compute_layout(&tree, config.canvas_width, config.canvas_height).unwrap();

    // 650 / 4 = 162.5 spacing, radius capped at 20
    assert_eq!(layout.vertical_spacing, 162.5);
    assert_eq!(layout.radius, 20.0);
    assert_eq!(layout.label_font_size(), 10);

    let root = layout.placement(4).unwrap();
    assert_eq!((root.x, root.y), (600.0, 162.5));
    let leaf = layout.placement(7).unwrap();
    assert_eq!((leaf.x, leaf.y), (1500.0, 487.5));
}

#[test]
fn test_render_adapter_follows_search() {
    use sapling::render::{DrawCommand, Palette, RenderAdapter, TextSurface};

    let mut tree = sequential_tree(7);
    let layout = compute_layout(&tree, 800.0, 400.0).unwrap();
    let mut adapter = RenderAdapter::new(TextSurface::new());
    adapter.paint(&layout, &tree);
    adapter.surface_mut().drain();

    for event in run_to_end(&mut tree, 8, SearchMode::Binary) {
        adapter.apply(&event);
    }

    let visited_fill = Palette::default().visited_fill;
    let fills: Vec<usize> = adapter
        .surface()
        .commands()
        .iter()
        .map(|command| match command {
            DrawCommand::Fill { handle, fill } if *fill == visited_fill => *handle,
            other => panic!("unexpected command {:?}", other),
        })
        .collect();
    let expected: Vec<usize> = [4, 6, 7]
        .iter()
        .map(|key| adapter.handle_of(*key).unwrap())
        .collect();
    assert_eq!(fills, expected);
}
