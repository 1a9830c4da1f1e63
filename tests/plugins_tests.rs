use std::cell::RefCell;
use std::rc::Rc;

use scrolly::api::{
    CapabilityCall, CapabilitySlot, CaptionDescriptor, EmptyVisual, LayoutHints, SceneData,
    SceneDescriptor, SceneRegistry, StoryEngine, StoryEngineConfig, VisualCatalog, VisualNode,
};
use scrolly::core::Viewport;
use scrolly::extensions::{ActionOutcome, StoryContext, StoryEvent, StoryPlugin};
use scrolly::interaction::ScrollDirection;
use scrolly::render::NullRenderer;

type Log = Rc<RefCell<Vec<(StoryEvent, Option<String>)>>>;

struct Recorder {
    id: &'static str,
    log: Log,
}

impl StoryPlugin for Recorder {
    fn id(&self) -> &str {
        self.id
    }

    fn on_event(&mut self, event: &StoryEvent, context: &StoryContext) {
        self.log
            .borrow_mut()
            .push((event.clone(), context.active_scene.clone()));
    }
}

fn recorder(id: &'static str) -> (Box<Recorder>, Log) {
    let log = Log::default();
    (
        Box::new(Recorder {
            id,
            log: Rc::clone(&log),
        }),
        log,
    )
}

fn events(log: &Log) -> Vec<StoryEvent> {
    log.borrow().iter().map(|(event, _)| event.clone()).collect()
}

/// `a` spans [0, 4000) with three captions; `b` follows with snow enabled.
fn engine() -> StoryEngine<NullRenderer> {
    let catalog = VisualCatalog::new().with(
        "chart",
        Box::new(|_: &SceneData, _: CapabilitySlot| -> Box<dyn VisualNode> {
            Box::new(EmptyVisual)
        }),
    );
    let a = (0..3).fold(SceneDescriptor::new("a", "chart"), |scene, i| {
        scene.with_caption(CaptionDescriptor::new(format!("a-{i}")))
    });
    let b = SceneDescriptor::new("b", "chart")
        .with_caption(CaptionDescriptor::new("b-0"))
        .with_caption(CaptionDescriptor::new("b-1"))
        .with_action(0, CapabilityCall::NextYear)
        .with_layout(LayoutHints {
            snow_visible: true,
            ..LayoutHints::default()
        });
    let registry = SceneRegistry::from_descriptors([a, b]).expect("valid registry");
    StoryEngine::new(
        NullRenderer::default(),
        StoryEngineConfig::new(Viewport::new(1_280, 1_000)),
        registry,
        catalog,
        SceneData::Null,
    )
    .expect("engine init")
}

#[test]
fn plugins_observe_lifecycle_events_in_order() {
    let mut engine = engine();
    let (plugin, log) = recorder("recorder");
    engine.register_plugin(plugin).expect("register");

    engine.scroll_to(3_000.0).expect("scroll");
    assert_eq!(
        events(&log),
        vec![
            StoryEvent::VisualMounted {
                key: "b".to_owned(),
                mount_count: 1,
            },
            StoryEvent::SceneEntered {
                key: "b".to_owned(),
                direction: ScrollDirection::Forward,
            },
            StoryEvent::ActionDispatched {
                key: "b".to_owned(),
                caption_index: 0,
                method: "next_year".to_owned(),
                outcome: ActionOutcome::Unmounted,
            },
        ]
    );
    assert!(
        log.borrow()
            .iter()
            .all(|(_, active)| active.as_deref() == Some("b"))
    );

    log.borrow_mut().clear();
    engine.render().expect("render");
    assert_eq!(events(&log), vec![StoryEvent::Rendered]);

    log.borrow_mut().clear();
    engine.scroll_to(3_200.0).expect("scroll");
    assert_eq!(
        events(&log),
        vec![StoryEvent::SceneLeft {
            key: "a".to_owned(),
            direction: ScrollDirection::Forward,
        }]
    );
}

#[test]
fn snow_follows_the_active_scene() {
    let mut engine = engine();
    engine.scroll_to(3_500.0).expect("scroll");
    engine.settle();
    assert_eq!(engine.ambient_opacity(), 1.0);

    engine.scroll_to(1_000.0).expect("scroll back");
    for _ in 0..120 {
        engine.advance_frame(1.0 / 60.0).expect("frame");
    }
    assert_eq!(engine.ambient_opacity(), 0.0);
}

#[test]
fn plugin_ids_must_be_unique_and_non_empty() {
    let mut engine = engine();
    let (first, _) = recorder("recorder");
    let (duplicate, _) = recorder("recorder");
    let (empty, _) = recorder("");

    engine.register_plugin(first).expect("first registration");
    assert!(engine.register_plugin(duplicate).is_err());
    assert!(engine.register_plugin(empty).is_err());
    assert_eq!(engine.plugin_count(), 1);
    assert!(engine.has_plugin("recorder"));

    let (second, _) = recorder("second");
    engine.register_plugin(second).expect("second registration");
    assert_eq!(engine.plugin_ids(), vec!["recorder", "second"]);
}

#[test]
fn unregistered_plugins_stop_receiving_events() {
    let mut engine = engine();
    let (plugin, log) = recorder("recorder");
    engine.register_plugin(plugin).expect("register");

    assert!(engine.unregister_plugin("recorder"));
    assert!(!engine.unregister_plugin("recorder"));
    engine.scroll_to(3_000.0).expect("scroll");
    engine.render().expect("render");
    assert!(log.borrow().is_empty());
}
