use tracing::debug;

use crate::error::{SceneError, SceneResult};
use crate::interaction::ScrollStep;
use crate::render::Renderer;

use super::scene_layout::stack_sections;
use super::scene_runtime::SceneRuntime;
use super::validation::validate_caption_order;
use super::{
    SceneData, SceneDescriptor, SceneRegistry, StoryEngine, StoryEngineConfig, VisualCatalog,
    engine_core::EngineCore, story_model::StoryModel, story_runtime::StoryRuntimeState,
};

impl<R: Renderer> StoryEngine<R> {
    /// Creates an engine with every registered scene laid out and bound.
    ///
    /// Scenes whose trigger regions already lie behind scroll offset 0 are
    /// entered immediately, the way a freshly loaded page would.
    pub fn new(
        renderer: R,
        config: StoryEngineConfig,
        registry: SceneRegistry,
        catalog: VisualCatalog,
        data: SceneData,
    ) -> SceneResult<Self> {
        let config = config.validate()?;
        for descriptor in registry.iter() {
            validate_caption_order(descriptor, config.timeline.caption_step_fraction)?;
            if !catalog.contains(&descriptor.visual) {
                return Err(SceneError::UnknownVisual {
                    key: descriptor.key.clone(),
                    visual: descriptor.visual.clone(),
                });
            }
        }

        let mut model = StoryModel::new(catalog, data, config.motion.ambient_fade_seconds);
        let descriptors: Vec<SceneDescriptor> = registry.into_descriptors().collect();
        let layouts = stack_sections(
            config.story_top_px,
            config.viewport.height_px(),
            descriptors.iter().map(SceneDescriptor::scroll_screens),
        );
        let scroll = model.scroll.position();
        for (descriptor, layout) in descriptors.into_iter().zip(layouts) {
            let id = model.allocate_scene_id();
            let runtime = SceneRuntime::new(
                id,
                descriptor,
                layout,
                &config,
                &mut model.bindings,
                scroll,
            );
            model.scenes.insert(id, runtime);
        }
        debug!(
            scenes = model.scenes.len(),
            bindings = model.bindings.len(),
            "story engine initialized"
        );

        let mut engine = Self {
            renderer,
            core: EngineCore {
                config,
                model,
                runtime: StoryRuntimeState::new(),
            },
        };
        engine.apply_scroll_step(ScrollStep {
            from: f64::NEG_INFINITY,
            to: scroll,
        });
        Ok(engine)
    }
}
