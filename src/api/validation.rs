use crate::error::{SceneError, SceneResult};

use super::{SceneDescriptor, SecondaryGroup};

fn invalid(descriptor: &SceneDescriptor, reason: impl Into<String>) -> SceneError {
    SceneError::InvalidDescriptor {
        key: descriptor.key.clone(),
        reason: reason.into(),
    }
}

/// Structural checks that do not depend on engine configuration.
pub(super) fn validate_scene_descriptor(descriptor: &SceneDescriptor) -> SceneResult<()> {
    if descriptor.key.trim().is_empty() {
        return Err(invalid(descriptor, "scene key must not be empty"));
    }
    if descriptor.visual.trim().is_empty() {
        return Err(invalid(descriptor, "visual id must not be empty"));
    }
    let caption_count = descriptor.captions.len();
    if caption_count == 0 {
        return Err(invalid(descriptor, "scene needs at least one caption"));
    }

    for (position, caption) in descriptor.captions.iter().enumerate() {
        if caption.index != position {
            return Err(invalid(
                descriptor,
                format!(
                    "caption indices must be contiguous from 0; found {} at position {position}",
                    caption.index
                ),
            ));
        }
        for (name, value) in [
            ("fade_in_fraction", caption.fade_in_fraction),
            ("fade_out_fraction", caption.fade_out_fraction),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(invalid(
                        descriptor,
                        format!("caption {position} `{name}` must be finite and >= 0"),
                    ));
                }
            }
        }
        if let (Some(fade_in), Some(fade_out)) =
            (caption.fade_in_fraction, caption.fade_out_fraction)
        {
            if fade_out <= fade_in {
                return Err(invalid(
                    descriptor,
                    format!("caption {position} fades out before it fades in"),
                ));
            }
        }
        for (name, value) in [
            ("reveal_from_idx", caption.reveal_from_idx),
            ("reveal_to_idx", caption.reveal_to_idx),
        ] {
            if value.is_some_and(|idx| idx >= caption_count) {
                return Err(invalid(
                    descriptor,
                    format!("caption {position} `{name}` is out of range"),
                ));
            }
        }
    }

    for action in &descriptor.actions {
        if action.trigger_caption_index >= caption_count {
            return Err(invalid(
                descriptor,
                format!(
                    "action `{}` targets caption {} but the scene has {caption_count}",
                    action.call.method_name(),
                    action.trigger_caption_index
                ),
            ));
        }
    }

    for (name, group) in [
        ("axes", descriptor.secondary.axes.as_ref()),
        ("helper", descriptor.secondary.helper.as_ref()),
    ] {
        if let Some(group) = group {
            validate_secondary_group(descriptor, name, group, caption_count)?;
        }
    }

    if let Some(screens) = descriptor.layout.scroll_screens {
        if !screens.is_finite() || screens <= 0.0 {
            return Err(invalid(descriptor, "scroll_screens must be finite and > 0"));
        }
    }
    if let Some(margin) = descriptor.layout.prefetch_margin_px {
        if !margin.is_finite() || margin < 0.0 {
            return Err(invalid(
                descriptor,
                "prefetch_margin_px must be finite and >= 0",
            ));
        }
    }

    Ok(())
}

fn validate_secondary_group(
    descriptor: &SceneDescriptor,
    name: &str,
    group: &SecondaryGroup,
    caption_count: usize,
) -> SceneResult<()> {
    if group.selector.trim().is_empty() {
        return Err(invalid(
            descriptor,
            format!("`{name}` selector must not be empty"),
        ));
    }
    for (field, value) in [("reveal_at", group.reveal_at), ("hide_at", group.hide_at)] {
        if value.is_some_and(|idx| idx >= caption_count) {
            return Err(invalid(
                descriptor,
                format!("`{name}.{field}` is out of range"),
            ));
        }
    }
    if let (Some(reveal_at), Some(hide_at)) = (group.reveal_at, group.hide_at) {
        if hide_at < reveal_at {
            return Err(invalid(
                descriptor,
                format!("`{name}` hides before it is revealed"),
            ));
        }
    }
    Ok(())
}

/// Checks that caption beats never go backward for the configured step.
pub(super) fn validate_caption_order(
    descriptor: &SceneDescriptor,
    caption_step_fraction: f64,
) -> SceneResult<()> {
    let mut previous = f64::NEG_INFINITY;
    for caption in &descriptor.captions {
        let start = caption
            .fade_in_fraction
            .unwrap_or(caption.index as f64 * caption_step_fraction);
        if start < previous {
            return Err(invalid(
                descriptor,
                format!(
                    "caption {} starts at {start} before caption {} ({previous})",
                    caption.index,
                    caption.index.saturating_sub(1)
                ),
            ));
        }
        if caption.fade_out_fraction.is_some_and(|fade_out| fade_out <= start) {
            return Err(invalid(
                descriptor,
                format!("caption {} fades out before it fades in", caption.index),
            ));
        }
        previous = start;
    }
    Ok(())
}
