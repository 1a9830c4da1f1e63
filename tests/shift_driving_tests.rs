use approx::assert_abs_diff_eq;
use scrolly::api::{
    CapabilitySlot, CaptionDescriptor, EmptyVisual, LayoutHints, PreferredSide, SceneData,
    SceneDescriptor, SceneRegistry, StoryEngine, StoryEngineConfig, VisualCatalog, VisualNode,
};
use scrolly::core::{CaptionSide, ShiftDirection, Viewport};
use scrolly::render::NullRenderer;

fn empty(_: &SceneData, _: CapabilitySlot) -> Box<dyn VisualNode> {
    Box::new(EmptyVisual)
}

/// Scene top 2000: side-slide point 1900, left beat 1200, right beat 2200.
fn engine_with(layout: LayoutHints) -> StoryEngine<NullRenderer> {
    let scene = SceneDescriptor::new("s", "chart")
        .with_caption(
            CaptionDescriptor::new("left")
                .on_side(CaptionSide::Left)
                .fading(0.1, None),
        )
        .with_caption(
            CaptionDescriptor::new("right")
                .on_side(CaptionSide::Right)
                .fading(0.6, None),
        )
        .with_layout(layout);
    StoryEngine::new(
        NullRenderer::default(),
        StoryEngineConfig::new(Viewport::new(1_280, 1_000)).with_story_top(2_000.0),
        SceneRegistry::from_descriptors([scene]).expect("valid registry"),
        VisualCatalog::new().with("chart", Box::new(empty)),
        SceneData::Null,
    )
    .expect("engine init")
}

#[test]
fn visualization_stays_centered_before_the_side_slide_point() {
    let engine = engine_with(LayoutHints::default());
    assert_eq!(engine.shift_direction("s").expect("s"), ShiftDirection::Center);
    assert_eq!(engine.visual_offset("s").expect("s"), 0.0);
}

#[test]
fn visualization_yields_to_the_latest_passed_caption() {
    let mut engine = engine_with(LayoutHints::default());

    engine.scroll_to(1_950.0).expect("scroll");
    engine.settle();
    assert_eq!(engine.shift_direction("s").expect("s"), ShiftDirection::Right);
    assert!(engine.visual_offset("s").expect("s") > 0.0);

    engine.scroll_to(2_500.0).expect("scroll");
    engine.settle();
    assert_eq!(engine.shift_direction("s").expect("s"), ShiftDirection::Left);
    assert!(engine.visual_offset("s").expect("s") < 0.0);

    engine.scroll_to(0.0).expect("scroll back");
    engine.settle();
    assert_eq!(engine.shift_direction("s").expect("s"), ShiftDirection::Center);
    assert_eq!(engine.visual_offset("s").expect("s"), 0.0);
}

#[test]
fn shift_animates_toward_its_target_over_frames() {
    let mut engine = engine_with(LayoutHints::default());
    engine.scroll_to(2_500.0).expect("scroll");
    assert_eq!(engine.visual_offset("s").expect("s"), 0.0);

    engine.advance_frame(0.1).expect("frame");
    let mid = engine.visual_offset("s").expect("s");
    engine.settle();
    let target = engine.visual_offset("s").expect("s");
    assert!(target < mid && mid < 0.0);
}

#[test]
fn preferred_side_overrides_caption_sides() {
    let engine = engine_with(LayoutHints {
        preferred_side: Some(PreferredSide::Left),
        ..LayoutHints::default()
    });
    assert_eq!(engine.shift_direction("s").expect("s"), ShiftDirection::Left);
}

#[test]
fn preferred_side_yields_to_a_caption_in_its_path() {
    let mut engine = engine_with(LayoutHints {
        preferred_side: Some(PreferredSide::Right),
        ..LayoutHints::default()
    });

    // Left caption drives: nothing ahead, the box travels to the right edge limit.
    engine.scroll_to(1_950.0).expect("scroll");
    engine.settle();
    let unobstructed = engine.visual_offset("s").expect("s");
    assert_abs_diff_eq!(unobstructed, 96.0, epsilon = 1e-9);

    // Right caption at [760, 1080] covers the whole travel, so the box stays centered.
    engine.scroll_to(2_500.0).expect("scroll");
    engine.settle();
    assert_eq!(engine.shift_direction("s").expect("s"), ShiftDirection::Right);
    let yielded = engine.visual_offset("s").expect("s");
    assert!(yielded < unobstructed);
    assert_abs_diff_eq!(yielded, 0.0, epsilon = 1e-9);

    // A narrower measured caption leaves part of the travel.
    engine.set_caption_width("s", 1, 100.0).expect("measure");
    engine.settle();
    let partial = engine.visual_offset("s").expect("s");
    assert!(partial > 0.0 && partial < unobstructed);
}

#[test]
fn fullscreen_scenes_never_shift() {
    let mut engine = engine_with(LayoutHints {
        fullscreen: true,
        preferred_side: Some(PreferredSide::Right),
        ..LayoutHints::default()
    });
    engine.scroll_to(2_500.0).expect("scroll");
    engine.settle();
    assert_eq!(engine.shift_direction("s").expect("s"), ShiftDirection::Center);
    assert_eq!(engine.visual_offset("s").expect("s"), 0.0);
}
