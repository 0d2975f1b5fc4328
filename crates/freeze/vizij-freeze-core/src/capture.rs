//! State capturer: builds an [`ElementSnapshot`] from host queries.
//!
//! Capturing never changes playback; pausing is the registry's job and
//! happens before this is called.

use crate::host::{AnimationControl, Host};
use crate::registry::AnimationRegistry;
use crate::report::kebab_case;
use crate::snapshot::{
    AnimationSample, ComputedStyles, ElementSnapshot, SvgPayload, STYLE_KEYS, UNNAMED_ANIMATION,
};

/// Options affecting what a capture keeps.
#[derive(Clone, Copy, Debug)]
pub struct CaptureOptions {
    pub svg_markup_limit: usize,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            svg_markup_limit: 4000,
        }
    }
}

/// Snapshot `node`. Returns `None` when there is no node.
pub fn capture<H: Host>(
    host: &H,
    node: Option<&H::Node>,
    opts: CaptureOptions,
) -> Option<ElementSnapshot> {
    let node = node?;

    let tag_name = host.tag_name(node);
    let computed_styles = capture_styles(host, node);
    let animations = AnimationRegistry::<H::Animation>::query(host, Some(node))
        .iter()
        .map(sample_animation)
        .collect();
    let svg = capture_svg(host, node, &tag_name, opts.svg_markup_limit);

    Some(ElementSnapshot {
        element_id: host.element_id(node).filter(|s| !s.is_empty()),
        class_name: host.class_name(node).filter(|s| !s.trim().is_empty()),
        source_location: host.source_location(node),
        bounding_rect: host.bounding_rect(node),
        computed_styles,
        animations,
        svg,
        pick_point: None,
        captured_at_epoch_millis: host.now_millis(),
        tag_name,
    })
}

fn capture_styles<H: Host>(host: &H, node: &H::Node) -> ComputedStyles {
    STYLE_KEYS
        .iter()
        .map(|key| {
            let value = host
                .style_property(node, &kebab_case(key))
                .unwrap_or_default();
            (key.to_string(), value)
        })
        .collect()
}

/// Sample one animation's timing. Name falls back to id, then "unnamed".
pub fn sample_animation<A: AnimationControl>(anim: &A) -> AnimationSample {
    let timing = anim.timing();
    let name = anim
        .name()
        .filter(|s| !s.is_empty())
        .or_else(|| anim.id().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| UNNAMED_ANIMATION.to_string());

    AnimationSample {
        name,
        current_time: anim.current_time().filter(|t| t.is_finite()),
        duration: timing.duration.filter(|d| d.is_finite()),
        progress: timing
            .progress
            .filter(|p| p.is_finite())
            .map(|p| p.clamp(0.0, 1.0)),
        phase: timing.phase,
        play_state: anim.play_state(),
        easing: timing.easing,
    }
}

fn capture_svg<H: Host>(host: &H, node: &H::Node, tag: &str, limit: usize) -> Option<SvgPayload> {
    match tag {
        "path" => host.attribute(node, "d").map(SvgPayload::PathData),
        "svg" => host
            .inner_markup(node)
            .map(|markup| SvgPayload::Markup(truncate_chars(markup, limit))),
        _ => None,
    }
}

fn truncate_chars(mut s: String, limit: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(limit) {
        s.truncate(idx);
        s.push('…');
    }
    s
}
