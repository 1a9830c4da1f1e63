use criterion::{Criterion, criterion_group, criterion_main};
use scrolly::api::{
    CapabilityCall, CapabilitySlot, CaptionDescriptor, EmptyVisual, SceneData, SceneDescriptor,
    SceneRegistry, SecondaryGroup, StoryEngine, StoryEngineConfig, VisualCatalog, VisualNode,
};
use scrolly::core::{
    CaptionSide, GeometryConfig, ShiftDirection, ShiftRequest, Span, Viewport, resolve_geometry,
};
use scrolly::render::NullRenderer;
use std::hint::black_box;

fn empty(_: &SceneData, _: CapabilitySlot) -> Box<dyn VisualNode> {
    Box::new(EmptyVisual)
}

fn story_engine(scene_count: usize) -> StoryEngine<NullRenderer> {
    let scenes = (0..scene_count).map(|s| {
        let side = if s % 2 == 0 {
            CaptionSide::Left
        } else {
            CaptionSide::Right
        };
        (0..4)
            .fold(
                SceneDescriptor::new(format!("scene-{s}"), "chart"),
                |scene, i| {
                    scene.with_caption(CaptionDescriptor::new(format!("{s}-{i}")).on_side(side))
                },
            )
            .with_action(1, CapabilityCall::NextYear)
            .with_action(3, CapabilityCall::ShowStage { stage: 2 })
            .with_axes(SecondaryGroup::new(".axis"))
    });
    let registry = SceneRegistry::from_descriptors(scenes).expect("valid generated registry");
    StoryEngine::new(
        NullRenderer::default(),
        StoryEngineConfig::new(Viewport::new(1_600, 900)),
        registry,
        VisualCatalog::new().with("chart", Box::new(empty)),
        SceneData::Null,
    )
    .expect("engine init")
}

fn bench_resolve_geometry(c: &mut Criterion) {
    let captions = [320.0, 340.0, 410.0, 280.0];
    let config = GeometryConfig::default();

    c.bench_function("resolve_geometry_and_shift", |b| {
        b.iter(|| {
            let geometry = resolve_geometry(black_box(1_440.0), black_box(&captions), config);
            let request = ShiftRequest::new(ShiftDirection::Right, 410.0)
                .with_caption_box(Span::new(40.0, 450.0));
            let _ = geometry.shift(black_box(request));
        })
    });
}

fn bench_scroll_sweep_50_scenes(c: &mut Criterion) {
    let mut engine = story_engine(50);
    let end = engine
        .scene_layout("scene-49")
        .expect("last scene")
        .bottom();

    c.bench_function("scroll_sweep_50_scenes", |b| {
        b.iter(|| {
            let mut scroll = 0.0;
            while scroll <= end {
                engine.scroll_to(black_box(scroll)).expect("scroll");
                scroll += 240.0;
            }
            engine.scroll_to(0.0).expect("scroll back");
        })
    });
}

fn bench_snapshot_json_50_scenes(c: &mut Criterion) {
    let mut engine = story_engine(50);
    engine.scroll_to(12_345.0).expect("scroll");
    engine.settle();

    c.bench_function("snapshot_json_50_scenes", |b| {
        b.iter(|| {
            let _ = engine
                .snapshot_json_pretty()
                .expect("snapshot json should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_geometry,
    bench_scroll_sweep_50_scenes,
    bench_snapshot_json_50_scenes
);
criterion_main!(benches);
