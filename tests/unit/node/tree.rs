use super::*;
use crate::{
    assets::decode::ImageAsset,
    foundation::core::{Point, Rgba8},
    node::panels::{FillPanel, ImagePanel},
    test_support::{BlockTextRenderer, block_font},
};

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::from_origin_size(Point::new(x, y), Size::new(w, h))
}

fn fill(pos: [f64; 2], size: [f64; 2], fix: bool) -> Node {
    Node::new(
        NormalizedLayout::new(pos, size, fix),
        FillPanel::new(Rgba8::opaque(10, 10, 10)),
    )
    .unwrap()
}

fn text_node(text: &str) -> Node {
    Node::new(NormalizedLayout::fill(), TextPanel::new(text)).unwrap()
}

fn white() -> Rgba8 {
    Rgba8::opaque(255, 255, 255)
}

#[test]
fn second_update_with_same_parent_does_not_regenerate() {
    let mut text = BlockTextRenderer::default();
    let mut node = fill([0.0, 0.0], [0.5, 0.5], false);
    let parent = rect(0.0, 0.0, 100.0, 80.0);

    let first = node.update(parent, 0.016, &mut text).unwrap();
    assert_eq!(first.regenerated, 1);
    let rect_after_first = node.computed_rect();
    let content_after_first = node.content().cloned();

    let second = node.update(parent, 0.016, &mut text).unwrap();
    assert_eq!(second.regenerated, 0);
    assert_eq!(node.computed_rect(), rect_after_first);
    assert_eq!(node.content().cloned(), content_after_first);
}

#[test]
fn parent_change_triggers_relayout() {
    let mut text = BlockTextRenderer::default();
    let mut node = fill([0.1, 0.1], [0.5, 0.5], false);
    node.update(rect(0.0, 0.0, 100.0, 100.0), 0.0, &mut text)
        .unwrap();
    let stats = node
        .update(rect(0.0, 0.0, 200.0, 100.0), 0.0, &mut text)
        .unwrap();
    assert_eq!(stats.regenerated, 1);
    assert_eq!(node.computed_rect(), Some(rect(20.0, 10.0, 100.0, 50.0)));
    assert_eq!(node.last_parent_rect(), Some(rect(0.0, 0.0, 200.0, 100.0)));
    let content = node.content().unwrap();
    assert_eq!((content.width(), content.height()), (100, 50));
}

#[test]
fn image_panel_locks_to_source_ratio() {
    let mut text = BlockTextRenderer::default();
    let image = ImageAsset::from_surface(Surface::solid(50, 50, white()));
    let mut node = Node::new(
        NormalizedLayout::new([0.0, 0.0], [1.0, 1.0], true),
        ImagePanel::new(image),
    )
    .unwrap();
    assert_eq!(node.aspect_ratio(), Some(1.0));

    node.update(rect(0.0, 0.0, 200.0, 100.0), 0.0, &mut text)
        .unwrap();
    assert_eq!(node.computed_rect().unwrap().size(), Size::new(100.0, 100.0));
}

#[test]
fn aspect_lock_holds_across_parent_changes() {
    let mut text = BlockTextRenderer::default();
    let mut node = fill([0.0, 0.0], [1.0, 1.0], true);

    node.update(rect(0.0, 0.0, 300.0, 100.0), 0.0, &mut text)
        .unwrap();
    assert_eq!(node.aspect_ratio(), Some(3.0));
    let r1 = node.computed_rect().unwrap();

    node.update(rect(0.0, 0.0, 150.0, 400.0), 0.0, &mut text)
        .unwrap();
    assert_eq!(node.aspect_ratio(), Some(3.0));
    let r2 = node.computed_rect().unwrap();

    assert_eq!(r1.width() / r1.height(), 3.0);
    assert_eq!(r2.size(), Size::new(150.0, 50.0));
}

#[test]
fn children_receive_the_fresh_parent_rect() {
    let mut text = BlockTextRenderer::default();
    let mut root = fill([0.0, 0.0], [0.5, 1.0], false).with_child(fill(
        [0.5, 0.5],
        [0.5, 0.5],
        false,
    ));

    root.update(rect(0.0, 0.0, 200.0, 100.0), 0.0, &mut text)
        .unwrap();
    assert_eq!(
        root.children()[0].computed_rect(),
        Some(rect(50.0, 50.0, 50.0, 50.0))
    );

    let stats = root
        .update(rect(0.0, 0.0, 400.0, 100.0), 0.0, &mut text)
        .unwrap();
    assert_eq!(
        stats,
        UpdateStats {
            visited: 2,
            regenerated: 2
        }
    );
    assert_eq!(root.children()[0].last_parent_rect(), Some(rect(0.0, 0.0, 200.0, 100.0)));
    assert_eq!(
        root.children()[0].computed_rect(),
        Some(rect(100.0, 50.0, 100.0, 50.0))
    );
}

#[test]
fn dirty_child_regenerates_without_touching_parent() {
    let mut text = BlockTextRenderer::default();
    let mut root = fill([0.0, 0.0], [1.0, 1.0], false).with_child(
        text_node("abc").with_style(InheritedStyle::new(Some(block_font(10.0)), Some(white()))),
    );
    let parent = rect(0.0, 0.0, 300.0, 100.0);
    root.update(parent, 0.0, &mut text).unwrap();

    root.children_mut()[0]
        .text_panel_mut()
        .unwrap()
        .set_text("abcdef");
    assert!(root.children()[0].is_dirty());

    let stats = root.update(parent, 0.0, &mut text).unwrap();
    assert_eq!(stats.regenerated, 1);
    assert_eq!(
        root.children()[0].computed_rect(),
        Some(rect(0.0, 0.0, 30.0, 10.0))
    );
    assert!(!root.children()[0].is_dirty());
}

#[test]
fn setting_identical_text_does_not_regenerate() {
    let mut text = BlockTextRenderer::default();
    let mut node = text_node("hi").with_style(InheritedStyle::new(Some(block_font(10.0)), Some(white())));
    let parent = rect(0.0, 0.0, 100.0, 100.0);
    node.update(parent, 0.0, &mut text).unwrap();
    assert_eq!(text.renders, 1);

    node.text_panel_mut().unwrap().set_text("hi");
    assert!(!node.is_dirty());
    let stats = node.update(parent, 0.0, &mut text).unwrap();
    assert_eq!(stats.regenerated, 0);
    assert_eq!(text.renders, 1);
}

#[test]
fn text_node_self_sizes_and_ignores_layout_size() {
    let mut text = BlockTextRenderer::default();
    let mut node = Node::new(
        NormalizedLayout::new([0.5, 0.25], [0.1, 0.1], false),
        TextPanel::new("0123456789"),
    )
    .unwrap()
    .with_style(InheritedStyle::new(Some(block_font(40.0)), Some(white())));

    node.update(rect(10.0, 10.0, 500.0, 400.0), 0.0, &mut text)
        .unwrap();
    assert_eq!(node.computed_rect(), Some(rect(260.0, 110.0, 200.0, 40.0)));

    node.update(rect(0.0, 0.0, 50.0, 20.0), 0.0, &mut text)
        .unwrap();
    assert_eq!(node.computed_rect(), Some(rect(25.0, 5.0, 50.0, 10.0)));
}

#[test]
fn missing_font_surfaces_at_render_time() {
    let mut text = BlockTextRenderer::default();
    let mut node = text_node("x");
    let err = node
        .update(rect(0.0, 0.0, 10.0, 10.0), 0.0, &mut text)
        .unwrap_err();
    assert!(matches!(err, PanelkitError::MissingStyle(_)));
    assert_eq!(node.computed_rect(), None);
    assert_eq!(node.last_parent_rect(), None);
}

#[test]
fn degenerate_parent_for_aspect_capture_is_reported() {
    let mut text = BlockTextRenderer::default();
    let mut root = fill([0.0, 0.0], [1.0, 1.0], false).with_child(fill(
        [0.0, 0.0],
        [1.0, 1.0],
        true,
    ));
    let err = root
        .update(rect(0.0, 0.0, 100.0, 0.0), 0.0, &mut text)
        .unwrap_err();
    assert!(matches!(err, PanelkitError::Config(_)));
    assert_eq!(root.children()[0].aspect_ratio(), None);
}

#[test]
fn propagation_fills_gaps_and_keeps_overrides() {
    let inherited = block_font(12.0);
    let explicit = block_font(30.0);
    let red = Rgba8::opaque(255, 0, 0);

    let mut root = fill([0.0, 0.0], [1.0, 1.0], false)
        .with_style(InheritedStyle::new(Some(inherited.clone()), Some(red)))
        .with_child(
            fill([0.0, 0.0], [1.0, 1.0], false)
                .with_child(text_node("deep"))
                .with_child(
                    text_node("own font")
                        .with_style(InheritedStyle::new(Some(explicit.clone()), None)),
                ),
        );
    root.propagate_font();

    let mid = &root.children()[0];
    assert_eq!(mid.style().font.as_ref(), Some(&inherited));
    assert_eq!(mid.style().text_color, Some(red));

    let deep = &mid.children()[0];
    assert_eq!(deep.style().font.as_ref(), Some(&inherited));
    assert_eq!(deep.style().text_color, Some(red));

    let own = &mid.children()[1];
    assert_eq!(own.style().font.as_ref(), Some(&explicit));
    assert_eq!(own.style().text_color, Some(red));
}

#[test]
fn set_layout_forces_relayout_on_same_parent() {
    let mut text = BlockTextRenderer::default();
    let mut node = fill([0.0, 0.0], [1.0, 1.0], false);
    let parent = rect(0.0, 0.0, 100.0, 100.0);
    node.update(parent, 0.0, &mut text).unwrap();

    node.set_layout(NormalizedLayout::new([0.0, 0.0], [0.5, 0.5], false))
        .unwrap();
    let stats = node.update(parent, 0.0, &mut text).unwrap();
    assert_eq!(stats.regenerated, 1);
    assert_eq!(node.computed_rect(), Some(rect(0.0, 0.0, 50.0, 50.0)));
    assert!(
        node.set_layout(NormalizedLayout::new([2.0, 0.0], [0.5, 0.5], false))
            .is_err()
    );
}

#[test]
fn removed_children_are_no_longer_visited() {
    let mut text = BlockTextRenderer::default();
    let mut root = fill([0.0, 0.0], [1.0, 1.0], false)
        .with_children([fill([0.0, 0.0], [0.5, 0.5], false), fill([0.5, 0.5], [0.5, 0.5], false)]);
    assert!(root.remove_child(5).is_none());
    let removed = root.remove_child(0).unwrap();
    assert_eq!(removed.layout().size, [0.5, 0.5]);

    let stats = root
        .update(rect(0.0, 0.0, 10.0, 10.0), 0.0, &mut text)
        .unwrap();
    assert_eq!(stats.visited, 2);

    let mut order = Vec::new();
    root.visit(&mut |n: &Node| order.push(n.layout().pos));
    assert_eq!(order, vec![[0.0, 0.0], [0.5, 0.5]]);
}

#[test]
fn pushed_child_is_laid_out_on_the_next_update() {
    let mut text = BlockTextRenderer::default();
    let mut root = fill([0.0, 0.0], [1.0, 1.0], false);
    let parent = rect(0.0, 0.0, 100.0, 50.0);
    root.update(parent, 0.0, &mut text).unwrap();

    let mut label = text_node("ok");
    label.style_mut().font = Some(block_font(10.0));
    label.style_mut().text_color = Some(white());
    root.push_child(label);
    assert_eq!(root.children()[0].computed_rect(), None);

    let stats = root.update(parent, 0.0, &mut text).unwrap();
    assert_eq!(
        stats,
        UpdateStats {
            visited: 2,
            regenerated: 1
        }
    );
    assert_eq!(
        root.children()[0].computed_rect(),
        Some(rect(0.0, 0.0, 10.0, 10.0))
    );
    assert_eq!(text.renders, 1);
}

#[test]
fn style_mut_overrides_survive_propagation() {
    let red = Rgba8::opaque(255, 0, 0);
    let blue = Rgba8::opaque(0, 0, 255);
    let font = block_font(12.0);
    let mut root = fill([0.0, 0.0], [1.0, 1.0], false)
        .with_style(InheritedStyle::new(Some(font.clone()), Some(red)))
        .with_child(text_node("a"));

    root.children_mut()[0].style_mut().text_color = Some(blue);
    root.propagate_font();

    let child = root.children()[0].style();
    assert_eq!(child.text_color, Some(blue));
    assert_eq!(child.font.as_ref(), Some(&font));
}
