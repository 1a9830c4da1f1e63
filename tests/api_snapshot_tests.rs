use std::cell::Cell;
use std::rc::Rc;

use scrolly::api::{
    CallOutcome, Capability, CapabilityCall, CapabilitySlot, CaptionDescriptor, EmptyVisual,
    SceneData, SceneDescriptor, SceneRegistry, StoryEngine, StoryEngineConfig, StorySnapshot,
    VisualCatalog, VisualNode,
};
use scrolly::core::{CaptionSide, ScenePhase, Viewport};
use scrolly::render::NullRenderer;

struct Stages {
    current: Rc<Cell<u32>>,
}

impl Capability for Stages {
    fn show_stage(&mut self, stage: u32) -> CallOutcome {
        self.current.set(stage);
        CallOutcome::Applied
    }
}

/// Scene `staged` spans three screens from the page top: beats at 200, 500
/// and 1100, with stage changes on the second and third captions.
fn staged_engine() -> (StoryEngine<NullRenderer>, Rc<Cell<u32>>) {
    let stage = Rc::new(Cell::new(u32::MAX));
    let shared = Rc::clone(&stage);
    let catalog = VisualCatalog::new()
        .with(
            "stages",
            Box::new(move |_: &SceneData, slot: CapabilitySlot| -> Box<dyn VisualNode> {
                slot.install(Box::new(Stages {
                    current: Rc::clone(&shared),
                }));
                Box::new(EmptyVisual)
            }),
        )
        .with(
            "chart",
            Box::new(|_: &SceneData, _: CapabilitySlot| -> Box<dyn VisualNode> {
                Box::new(EmptyVisual)
            }),
        );
    let staged = SceneDescriptor::new("staged", "stages")
        .with_caption(
            CaptionDescriptor::new("one")
                .on_side(CaptionSide::Left)
                .fading(0.4, Some(0.6)),
        )
        .with_caption(
            CaptionDescriptor::new("two")
                .on_side(CaptionSide::Right)
                .fading(0.5, None),
        )
        .with_caption(CaptionDescriptor::new("three").fading(0.7, None))
        .with_action(1, CapabilityCall::ShowStage { stage: 1 })
        .with_action(2, CapabilityCall::ShowStage { stage: 2 });
    let trailing = SceneDescriptor::new("trailing", "chart")
        .with_caption(CaptionDescriptor::new("end"));
    let registry = SceneRegistry::from_descriptors([staged, trailing]).expect("valid registry");
    let engine = StoryEngine::new(
        NullRenderer::default(),
        StoryEngineConfig::new(Viewport::new(1_280, 1_000)),
        registry,
        catalog,
        SceneData::Null,
    )
    .expect("engine init");
    (engine, stage)
}

fn sweep(engine: &mut StoryEngine<NullRenderer>, from: f64, to: f64, step: f64) {
    let steps = ((to - from).abs() / step).round() as usize;
    let sign = if to >= from { 1.0 } else { -1.0 };
    for i in 1..=steps {
        engine
            .scroll_to(from + sign * step * i as f64)
            .expect("scroll");
        engine.settle();
    }
}

#[test]
fn entering_resets_the_visual_to_its_first_stage() {
    let (engine, stage) = staged_engine();
    assert_eq!(engine.active_scene(), Some("staged"));
    assert_eq!(stage.get(), 0);
}

#[test]
fn reversing_and_replaying_reaches_the_same_state() {
    let (mut engine, stage) = staged_engine();

    sweep(&mut engine, 0.0, 1_500.0, 50.0);
    let first = engine.snapshot();
    assert_eq!(stage.get(), 2);

    sweep(&mut engine, 1_500.0, 0.0, 50.0);
    // Scrolling back through the third beat re-fires the second caption's action.
    assert_eq!(stage.get(), 1);

    sweep(&mut engine, 0.0, 1_500.0, 50.0);
    let second = engine.snapshot();

    assert_eq!(stage.get(), 2);
    assert_eq!(first, second);
}

#[test]
fn snapshot_reflects_caption_windows() {
    let (mut engine, _stage) = staged_engine();
    engine.scroll_to(1_500.0).expect("scroll");
    engine.settle();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.active_scene.as_deref(), Some("staged"));
    let staged = &snapshot.scenes["staged"];
    assert_eq!(staged.phase, ScenePhase::Active);
    assert!(staged.layer_visible);
    assert_eq!(staged.mount_count, 1);

    // Caption one fades out from 800 over 240px.
    let opacities: Vec<f64> = staged.captions.iter().map(|c| c.opacity).collect();
    assert_eq!(opacities, vec![0.0, 1.0, 1.0]);

    let trailing = &snapshot.scenes["trailing"];
    assert_eq!(trailing.phase, ScenePhase::Dormant);
    assert_eq!(trailing.mount_count, 0);
    assert_eq!(trailing.top, 4_000.0);
}

#[test]
fn snapshot_json_contract_parses_back() {
    let (mut engine, _stage) = staged_engine();
    engine.scroll_to(600.0).expect("scroll");
    engine.settle();
    let snapshot = engine.snapshot();

    let contract = engine
        .snapshot_json_contract_v1_pretty()
        .expect("serialize contract");
    assert!(contract.contains("\"schema_version\": 1"));
    let parsed = StorySnapshot::from_json_compat_str(&contract).expect("parse contract");

    assert_eq!(parsed.active_scene, snapshot.active_scene);
    assert_eq!(parsed.scroll_position, snapshot.scroll_position);
    assert_eq!(
        parsed.scenes.keys().collect::<Vec<_>>(),
        vec!["staged", "trailing"]
    );
    for (key, scene) in &snapshot.scenes {
        let restored = &parsed.scenes[key];
        assert_eq!(restored.phase, scene.phase);
        assert_eq!(restored.captions.len(), scene.captions.len());
        for (a, b) in restored.captions.iter().zip(&scene.captions) {
            approx::assert_abs_diff_eq!(a.opacity, b.opacity, epsilon = 1e-12);
        }
    }

    let bare = engine.snapshot_json_pretty().expect("serialize bare");
    let parsed_bare = StorySnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed_bare.scenes.len(), 2);

    let future = contract.replacen("\"schema_version\": 1", "\"schema_version\": 9", 1);
    assert!(StorySnapshot::from_json_compat_str(&future).is_err());
}

#[test]
fn reentering_from_below_restores_the_latest_passed_stage() {
    let (mut engine, stage) = staged_engine();
    sweep(&mut engine, 0.0, 2_500.0, 50.0);
    assert_eq!(stage.get(), 2);
    let forward = engine.snapshot().scenes["staged"].clone();

    // Past the region end the trailing scene owns the layer.
    sweep(&mut engine, 2_500.0, 3_500.0, 50.0);
    assert_eq!(engine.active_scene(), Some("trailing"));

    sweep(&mut engine, 3_500.0, 2_500.0, 50.0);
    assert_eq!(engine.active_scene(), Some("staged"));
    assert_eq!(stage.get(), 2);
    assert_eq!(engine.snapshot().scenes["staged"], forward);
}

#[test]
fn jumping_back_into_a_scene_lands_on_the_stage_of_the_target_beat() {
    let (mut engine, stage) = staged_engine();
    engine.scroll_to(3_500.0).expect("scroll");

    engine.scroll_to(1_500.0).expect("jump back past the last beat");
    assert_eq!(stage.get(), 2);

    engine.scroll_to(3_500.0).expect("scroll");
    engine.scroll_to(800.0).expect("jump back between beats");
    assert_eq!(stage.get(), 1);

    let (mut stepped, stepped_stage) = staged_engine();
    sweep(&mut stepped, 0.0, 3_500.0, 50.0);
    sweep(&mut stepped, 3_500.0, 300.0, 50.0);
    engine.scroll_to(3_500.0).expect("scroll");
    engine.scroll_to(300.0).expect("jump back before every beat");
    assert_eq!(stage.get(), stepped_stage.get());
}

#[test]
fn resize_moving_a_beat_across_the_scroll_offset_updates_the_stage() {
    let (mut engine, stage) = staged_engine();
    sweep(&mut engine, 0.0, 1_000.0, 50.0);
    assert_eq!(stage.get(), 1);

    // Shorter viewport: the third beat moves from 1100 to 660.
    engine.resize(Viewport::new(1_280, 600)).expect("resize");
    engine.advance_frame(1.0 / 60.0).expect("frame");
    engine.settle();
    assert_eq!(stage.get(), 2);
    assert_eq!(engine.caption_visuals("staged").expect("staged")[2].opacity, 1.0);

    // And back: the beat returns ahead of the offset.
    engine.resize(Viewport::new(1_280, 1_000)).expect("resize");
    engine.advance_frame(1.0 / 60.0).expect("frame");
    engine.settle();
    assert_eq!(stage.get(), 1);
    assert_eq!(engine.caption_visuals("staged").expect("staged")[2].opacity, 0.0);
}
