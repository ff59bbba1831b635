use crate::app::AtomResult;
use crate::atom::shapes::OrbitShape;
use crate::renderer::surface::{ShapeNode, Surface};
use crate::simulation::timeline::Timeline;
use log::{debug, warn};
use std::collections::HashMap;

/// Drives electron motion once the shapes are attached.
pub trait AnimationEngine {
    /// Schedules `timeline`, whose tweens follow `path`.
    fn play<S: Surface>(
        &mut self,
        surface: &mut S,
        path: &OrbitShape,
        timeline: Timeline<S::Node>,
    ) -> AtomResult<()>;

    /// Stops everything previously scheduled in `surface`, leaving other containers
    /// alone. Called before a re-render clears the container.
    fn teardown<S: Surface>(&mut self, surface: &mut S) -> AtomResult<()>;
}

/// Realizes timelines as declarative SVG animation (`<animateMotion>`).
///
/// The animation lives inside the electron nodes, so the browser's own clock
/// drives it and clearing the container stops it.
#[derive(Debug, Default)]
pub struct SmilEngine {
    /// Timelines scheduled per container key.
    active: HashMap<String, usize>,
}

impl SmilEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timelines currently scheduled in the container identified by `key`.
    pub fn active_timelines(&self, key: &str) -> usize {
        self.active.get(key).copied().unwrap_or(0)
    }
}

impl AnimationEngine for SmilEngine {
    fn play<S: Surface>(
        &mut self,
        surface: &mut S,
        path: &OrbitShape,
        timeline: Timeline<S::Node>,
    ) -> AtomResult<()> {
        if timeline.repeat_delay() > 0.0 {
            warn!("repeat delay is not supported by SMIL playback; ignoring it");
        }

        let position = timeline.position();
        for tween in timeline.tweens() {
            for (index, target) in tween.targets.iter().enumerate() {
                if timeline.is_paused() {
                    let point = path.point_at(tween.path_fraction(index, position));
                    surface.set_attribute(target, "cx", &point.x.to_string())?;
                    surface.set_attribute(target, "cy", &point.y.to_string())?;
                    continue;
                }

                // A negative begin starts the clock part-way through, which is
                // how the initial seek is expressed declaratively.
                let motion = ShapeNode::new("animateMotion")
                    .attr("dur", seconds(tween.duration))
                    .attr("begin", seconds(-tween.elapsed_for(index, position)))
                    .attr("repeatCount", "indefinite")
                    .attr("fill", "freeze")
                    .attr("calcMode", "linear")
                    .attr("keyPoints", format!("{};{}", tween.start, tween.end))
                    .attr("keyTimes", "0;1");
                let motion = surface.append(Some(target), &motion)?;
                surface.append(Some(&motion), &ShapeNode::new("mpath").attr("href", path.href()))?;
            }
        }

        *self.active.entry(surface.key()).or_default() += 1;
        debug!(
            "scheduled timeline on {} in {} at {}s (paused={})",
            path.id,
            surface.key(),
            position,
            timeline.is_paused()
        );
        Ok(())
    }

    fn teardown<S: Surface>(&mut self, surface: &mut S) -> AtomResult<()> {
        let key = surface.key();
        if let Some(count) = self.active.remove(&key) {
            debug!("tearing down {count} timeline(s) in {key}");
        }
        Ok(())
    }
}

fn seconds(value: f32) -> String {
    // `+ 0.0` folds negative zero so we never emit "-0s".
    format!("{}s", value + 0.0)
}
