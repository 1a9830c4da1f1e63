use proptest::prelude::*;
use scrolly::api::{
    CapabilitySlot, CaptionDescriptor, EmptyVisual, LayoutHints, SceneData, SceneDescriptor,
    SceneLayout, SceneRegistry, StoryEngine, StoryEngineConfig, TimelineConfig, VisualCatalog,
    VisualNode, caption_exit_point, caption_windows,
};
use scrolly::core::{CaptionSide, Viewport};
use scrolly::render::NullRenderer;

fn catalog() -> VisualCatalog {
    VisualCatalog::new().with(
        "chart",
        Box::new(|_: &SceneData, _: CapabilitySlot| -> Box<dyn VisualNode> {
            Box::new(EmptyVisual)
        }),
    )
}

fn three_caption_scene() -> SceneDescriptor {
    SceneDescriptor::new("intro", "chart")
        .with_caption(CaptionDescriptor::new("first").on_side(CaptionSide::Left))
        .with_caption(CaptionDescriptor::new("second").on_side(CaptionSide::Right))
        .with_caption(CaptionDescriptor::new("third"))
        .with_layout(LayoutHints {
            scroll_screens: Some(1.0),
            ..LayoutHints::default()
        })
}

fn engine_for(scene: SceneDescriptor) -> StoryEngine<NullRenderer> {
    let config = StoryEngineConfig::new(Viewport::new(1_280, 1_000))
        .with_story_top(2_000.0)
        .without_scrub_lag();
    let registry = SceneRegistry::from_descriptors([scene]).expect("valid registry");
    StoryEngine::new(
        NullRenderer::default(),
        config,
        registry,
        catalog(),
        SceneData::Null,
    )
    .expect("engine init")
}

#[test]
fn captions_reveal_in_index_order_at_increasing_thresholds() {
    let mut engine = engine_for(three_caption_scene());
    let mut first_full = [None::<f64>; 3];

    let mut scroll = 0.0;
    while scroll <= 3_000.0 {
        engine.scroll_to(scroll).expect("scroll");
        engine.settle();
        let visuals = engine.caption_visuals("intro").expect("visuals");
        for (index, visual) in visuals.iter().enumerate() {
            if visual.opacity >= 1.0 - 1e-9 && first_full[index].is_none() {
                first_full[index] = Some(scroll);
            }
        }
        scroll += 5.0;
    }

    let thresholds: Vec<f64> = first_full
        .iter()
        .map(|threshold| threshold.expect("every caption becomes fully visible"))
        .collect();
    // Narrative starts at 1000; beats every 50px; entry lasts 80px.
    assert_eq!(thresholds, vec![1_080.0, 1_130.0, 1_180.0]);
}

#[test]
fn caption_slides_in_from_its_side() {
    let mut engine = engine_for(three_caption_scene());
    engine.scroll_to(1_040.0).expect("scroll");
    engine.settle();

    let visuals = engine.caption_visuals("intro").expect("visuals");
    assert!(visuals[0].opacity > 0.0 && visuals[0].opacity < 1.0);
    assert!(visuals[0].translate_x < 0.0);
    assert!(visuals[0].translate_y > 0.0);
    // Second caption has not started yet.
    assert_eq!(visuals[1].opacity, 0.0);
    assert!(visuals[1].translate_x > 0.0);
    assert_eq!(visuals[2].translate_x, 0.0);
}

#[test]
fn explicit_fade_out_hides_caption_again() {
    let scene = SceneDescriptor::new("fade", "chart")
        .with_caption(CaptionDescriptor::new("a").fading(0.0, Some(0.5)))
        .with_caption(CaptionDescriptor::new("b").fading(0.6, None));
    let mut engine = engine_for(scene);

    // Span is two screens: fade-out of caption 0 starts at 1000 + 1000.
    engine.scroll_to(1_500.0).expect("scroll");
    engine.settle();
    assert_eq!(engine.caption_visuals("fade").expect("visuals")[0].opacity, 1.0);

    engine.scroll_to(2_200.0).expect("scroll");
    engine.settle();
    assert_eq!(engine.caption_visuals("fade").expect("visuals")[0].opacity, 0.0);

    engine.scroll_to(1_500.0).expect("scroll back");
    engine.settle();
    assert_eq!(engine.caption_visuals("fade").expect("visuals")[0].opacity, 1.0);
}

#[test]
fn scrub_lag_trails_scroll_until_frames_advance() {
    let config = StoryEngineConfig::new(Viewport::new(1_280, 1_000)).with_story_top(2_000.0);
    let registry =
        SceneRegistry::from_descriptors([three_caption_scene()]).expect("valid registry");
    let mut engine = StoryEngine::new(
        NullRenderer::default(),
        config,
        registry,
        catalog(),
        SceneData::Null,
    )
    .expect("engine init");

    engine.scroll_to(1_500.0).expect("scroll");
    assert_eq!(engine.caption_visuals("intro").expect("visuals")[0].opacity, 0.0);

    engine.advance_frame(0.1).expect("frame");
    let partial = engine.caption_visuals("intro").expect("visuals")[0].opacity;
    assert!(partial > 0.0 && partial < 1.0);

    for _ in 0..120 {
        engine.advance_frame(1.0 / 60.0).expect("frame");
    }
    assert_eq!(engine.caption_visuals("intro").expect("visuals")[0].opacity, 1.0);
}

#[test]
fn exit_point_falls_back_to_next_beat_then_narrative_end() {
    let layout = SceneLayout::new(2_000.0, 2.0, 1_000.0);
    let captions = vec![
        CaptionDescriptor::new("a"),
        CaptionDescriptor {
            index: 1,
            ..CaptionDescriptor::new("b")
        },
    ];
    let windows = caption_windows(&captions, layout, TimelineConfig::default());

    assert_eq!(caption_exit_point(&windows, 0, layout), windows[1].beat());
    assert_eq!(caption_exit_point(&windows, 1, layout), layout.narrative_end());
}

proptest! {
    #[test]
    fn fully_visible_caption_implies_earlier_beats_passed(
        count in 1usize..6,
        screens in 1.0f64..4.0,
        scroll_fraction in 0.0f64..1.2
    ) {
        let scene = (0..count).fold(
            SceneDescriptor::new("p", "chart").with_layout(LayoutHints {
                scroll_screens: Some(screens),
                ..LayoutHints::default()
            }),
            |scene, i| scene.with_caption(CaptionDescriptor::new(format!("c{i}"))),
        );
        let mut engine = engine_for(scene);
        let layout = engine.scene_layout("p").expect("layout");
        let scroll = layout.narrative_start() + scroll_fraction * layout.span;
        engine.scroll_to(scroll).expect("scroll");
        engine.settle();

        let visuals = engine.caption_visuals("p").expect("visuals");
        let step = TimelineConfig::default().caption_step_fraction;
        for (k, visual) in visuals.iter().enumerate() {
            if visual.opacity >= 1.0 {
                for j in 0..k {
                    prop_assert!(layout.at_fraction(j as f64 * step) < scroll);
                }
            }
        }
    }
}
