use crate::app::{AtomError, AtomOptions, AtomResult};
use crate::atom::layout::LayoutGeometry;
use crate::atom::shapes::{ShapeFactory, canvas_node, stylesheet_node};
use crate::physics::elements::ElementSource;
use crate::renderer::engine::AnimationEngine;
use crate::renderer::surface::{ContainerProvider, Surface};
use crate::simulation::atom::AtomScene;
use crate::simulation::planner::{AnimationPlan, AnimationPlanner, RandomSource};
use crate::simulation::timeline::Timeline;
use log::info;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrbitReport {
    pub orbit_number: u32,
    pub orbit_id: String,
    pub electrons: u32,
    pub plan: AnimationPlan,
}

/// What a render call attached and handed to the animation engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedAtom {
    pub periodic_number: u32,
    pub symbol: &'static str,
    pub name: &'static str,
    pub layout: LayoutGeometry,
    pub orbits: Vec<OrbitReport>,
}

impl RenderedAtom {
    fn from_scene(scene: &AtomScene) -> Self {
        let element = scene.element();
        Self {
            periodic_number: u32::from(element.atomic_number),
            symbol: element.symbol(),
            name: element.name(),
            layout: *scene.layout(),
            orbits: scene
                .orbits()
                .iter()
                .map(|orbit| OrbitReport {
                    orbit_number: orbit.shape.orbit_number,
                    orbit_id: orbit.shape.id.clone(),
                    electrons: orbit.electrons,
                    plan: orbit.plan,
                })
                .collect(),
        }
    }
}

/// Resolves an element, lays it out and attaches the animated atom to a container.
pub struct AtomRenderer<E, R> {
    elements: E,
    random: R,
}

impl<E: ElementSource, R: RandomSource> AtomRenderer<E, R> {
    pub fn new(elements: E, random: R) -> Self {
        Self { elements, random }
    }

    /// Renders one atom into the container matched by `options.container_selector`.
    ///
    /// Every validation (options, element, container, electron configuration)
    /// happens before the container is touched. On success the previous content
    /// and its animations are replaced, never appended to.
    pub fn render<P, A>(
        &mut self,
        containers: &mut P,
        engine: &mut A,
        options: &AtomOptions,
    ) -> AtomResult<RenderedAtom>
    where
        P: ContainerProvider,
        A: AnimationEngine,
    {
        options.validate()?;
        let planner = AnimationPlanner::new(options.animation_duration)?;

        let periodic_number = options.periodic_number()?;
        let element = self
            .elements
            .lookup(periodic_number)
            .ok_or_else(|| AtomError::InvalidElement(periodic_number.to_string()))?;

        let mut container = containers
            .query(&options.container_selector)
            .ok_or_else(|| AtomError::ContainerNotFound(options.container_selector.clone()))?;

        let scene = AtomScene::build(
            element,
            options.fixed_view_box,
            options.animated,
            &planner,
            &mut self.random,
        )?;

        engine.teardown(&mut container)?;
        container.clear()?;
        draw(&mut container, engine, &scene, options.embed_style)?;

        info!(
            "rendered {} ({} orbit(s)) into {}",
            element.name(),
            scene.orbits().len(),
            options.container_selector
        );
        Ok(RenderedAtom::from_scene(&scene))
    }
}

fn draw<S: Surface, A: AnimationEngine>(
    surface: &mut S,
    engine: &mut A,
    scene: &AtomScene,
    embed_style: bool,
) -> AtomResult<()> {
    let svg = surface.append(None, &canvas_node(scene.layout()))?;
    if embed_style {
        surface.append(Some(&svg), &stylesheet_node())?;
    }
    surface.append(Some(&svg), &scene.nucleus().to_node())?;

    let electron = ShapeFactory::electron().to_node();
    for orbit in scene.orbits() {
        surface.append(Some(&svg), &orbit.shape.to_node())?;
        let targets = (0..orbit.electrons)
            .map(|_| surface.append(Some(&svg), &electron))
            .collect::<AtomResult<Vec<_>>>()?;
        let timeline = Timeline::from_plan(&orbit.plan, targets, orbit.shape.id.clone());
        engine.play(surface, &orbit.shape, timeline)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DurationRange;
    use crate::atom::shapes::OrbitShape;
    use crate::physics::elements::{Element, PeriodicTable};
    use crate::renderer::engine::SmilEngine;
    use crate::renderer::headless::HeadlessDocument;
    use crate::simulation::timeline::TimelineSummary;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Records what would have been scheduled instead of animating anything.
    #[derive(Default)]
    struct RecordingEngine {
        played: Vec<TimelineSummary>,
        teardowns: usize,
    }

    impl AnimationEngine for RecordingEngine {
        fn play<S: Surface>(
            &mut self,
            _surface: &mut S,
            path: &OrbitShape,
            timeline: Timeline<S::Node>,
        ) -> AtomResult<()> {
            assert_eq!(timeline.tweens()[0].path_id, path.id);
            self.played.push(timeline.summary());
            Ok(())
        }

        fn teardown<S: Surface>(&mut self, _surface: &mut S) -> AtomResult<()> {
            self.teardowns += 1;
            self.played.clear();
            Ok(())
        }
    }

    fn renderer() -> AtomRenderer<PeriodicTable, ChaCha8Rng> {
        AtomRenderer::new(PeriodicTable, ChaCha8Rng::seed_from_u64(5))
    }

    fn document() -> HeadlessDocument {
        let mut doc = HeadlessDocument::new();
        doc.add_container("atom");
        doc.add_container("other");
        doc
    }

    fn container_markup(doc: &HeadlessDocument, selector: &str) -> String {
        doc.inner_markup(doc.query_selector(selector).unwrap())
    }

    fn container_key(doc: &mut HeadlessDocument, selector: &str) -> String {
        doc.query(selector).unwrap().key()
    }

    #[test]
    fn hydrogen_renders_one_orbit_and_one_electron() {
        let mut doc = document();
        let mut engine = RecordingEngine::default();
        let report = renderer()
            .render(&mut doc, &mut engine, &AtomOptions::new("#atom", 1))
            .unwrap();

        assert_eq!(report.symbol, "H");
        assert_eq!((report.layout.width, report.layout.height), (110.0, 110.0));
        assert_eq!(report.orbits.len(), 1);
        assert_eq!(report.orbits[0].electrons, 1);
        assert_eq!(engine.played.len(), 1);
        assert_eq!(engine.played[0].targets, 1);

        let svg = doc.query_selector(".atom_svg").unwrap();
        assert_eq!(doc.attribute(svg, "viewBox"), Some("0 0 110 110"));
        let orbit = doc.query_selector("#orbit_1").unwrap();
        assert_eq!(
            doc.attribute(orbit, "d"),
            Some("M 25,55 A 30,30 0 1 1 85,55 A 30,30 0 1 1 25,55")
        );
    }

    #[test]
    fn carbon_renders_two_orbits() {
        let mut doc = document();
        let mut engine = RecordingEngine::default();
        let report = renderer()
            .render(&mut doc, &mut engine, &AtomOptions::new("#atom", 6))
            .unwrap();

        assert_eq!(report.layout.width, 170.0);
        let radii: Vec<f32> = ["#orbit_1", "#orbit_2"]
            .iter()
            .map(|selector| {
                let orbit = doc.query_selector(selector).unwrap();
                let d = doc.attribute(orbit, "d").unwrap();
                d.split_whitespace().nth(3).unwrap().split(',').next().unwrap().parse().unwrap()
            })
            .collect();
        assert_eq!(radii, vec![30.0, 60.0]);

        let electrons = doc.select_all(doc.root(), ".atom_electron");
        assert_eq!(electrons.len(), 6);
        let targets: Vec<usize> = engine.played.iter().map(|t| t.targets).collect();
        assert_eq!(targets, vec![2, 4]);
    }

    #[test]
    fn nucleus_comes_before_orbits_and_electrons_follow_their_orbit() {
        let mut doc = document();
        renderer()
            .render(&mut doc, &mut SmilEngine::new(), &AtomOptions::new("#atom", 3))
            .unwrap();
        let svg = doc.query_selector("svg").unwrap();
        let classes: Vec<&str> = doc
            .children(svg)
            .iter()
            .map(|&node| doc.attribute(node, "class").unwrap())
            .collect();
        assert_eq!(
            classes,
            vec![
                "atom_nucleus",
                "atom_orbit",
                "atom_electron",
                "atom_electron",
                "atom_orbit",
                "atom_electron",
            ]
        );
    }

    #[test]
    fn fixed_view_box_uses_constant_canvas() {
        let mut doc = document();
        let mut options = AtomOptions::new("#atom", 118);
        options.fixed_view_box = true;
        let report = renderer()
            .render(&mut doc, &mut RecordingEngine::default(), &options)
            .unwrap();
        assert_eq!(report.layout.width, 500.0);
        assert_eq!(report.orbits.len(), 7);
    }

    #[test]
    fn rerender_replaces_previous_atom() {
        let mut doc = document();
        let mut engine = SmilEngine::new();
        let mut renderer = renderer();
        renderer
            .render(&mut doc, &mut engine, &AtomOptions::new("#atom", 10))
            .unwrap();
        renderer
            .render(&mut doc, &mut engine, &AtomOptions::new("#atom", 10))
            .unwrap();

        let container = doc.query_selector("#atom").unwrap();
        assert_eq!(doc.select_all(container, "svg").len(), 1);
        assert_eq!(doc.select_all(container, ".atom_nucleus").len(), 1);
        assert_eq!(doc.select_all(container, ".atom_electron").len(), 10);
        assert_eq!(engine.active_timelines(&container_key(&mut doc, "#atom")), 2);
    }

    #[test]
    fn rerender_tears_down_prior_animations() {
        let mut doc = document();
        let mut engine = RecordingEngine::default();
        let mut renderer = renderer();
        renderer
            .render(&mut doc, &mut engine, &AtomOptions::new("#atom", 8))
            .unwrap();
        renderer
            .render(&mut doc, &mut engine, &AtomOptions::new("#atom", 1))
            .unwrap();
        assert_eq!(engine.teardowns, 2);
        assert_eq!(engine.played.len(), 1);
    }

    #[test]
    fn distinct_containers_are_independent() {
        let mut doc = document();
        let mut engine = SmilEngine::new();
        let mut renderer = renderer();
        renderer
            .render(&mut doc, &mut engine, &AtomOptions::new("#atom", 2))
            .unwrap();
        renderer
            .render(&mut doc, &mut engine, &AtomOptions::new("#other", 3))
            .unwrap();
        let atom = doc.query_selector("#atom").unwrap();
        let other = doc.query_selector("#other").unwrap();
        assert_eq!(doc.select_all(atom, ".atom_electron").len(), 2);
        assert_eq!(doc.select_all(other, ".atom_electron").len(), 3);
    }

    #[test]
    fn rerender_in_one_container_keeps_the_other_animating() {
        let mut doc = document();
        let mut engine = SmilEngine::new();
        let mut renderer = renderer();
        renderer
            .render(&mut doc, &mut engine, &AtomOptions::new("#atom", 2))
            .unwrap();
        renderer
            .render(&mut doc, &mut engine, &AtomOptions::new("#other", 3))
            .unwrap();
        renderer
            .render(&mut doc, &mut engine, &AtomOptions::new("#atom", 1))
            .unwrap();

        assert_eq!(engine.active_timelines(&container_key(&mut doc, "#atom")), 1);
        assert_eq!(engine.active_timelines(&container_key(&mut doc, "#other")), 2);
        let other = doc.query_selector("#other").unwrap();
        assert_eq!(doc.select_all(other, "animateMotion").len(), 3);
    }

    #[test]
    fn invalid_element_leaves_container_untouched() {
        let mut doc = document();
        let mut engine = SmilEngine::new();
        let mut renderer = renderer();
        renderer
            .render(&mut doc, &mut engine, &AtomOptions::new("#atom", 2))
            .unwrap();
        let before = container_markup(&doc, "#atom");

        for number in [0, 119] {
            let err = renderer
                .render(&mut doc, &mut engine, &AtomOptions::new("#atom", number))
                .unwrap_err();
            assert_eq!(err, AtomError::InvalidElement(number.to_string()));
            assert_eq!(container_markup(&doc, "#atom"), before);
        }
    }

    #[test]
    fn negative_and_fractional_numbers_are_invalid_elements() {
        let mut doc = document();
        let mut engine = RecordingEngine::default();
        for (number, shown) in [(-1.0, "-1"), (1.5, "1.5"), (f64::INFINITY, "inf")] {
            let mut options = AtomOptions::new("#atom", 1);
            options.element_periodic_number = number;
            let err = renderer().render(&mut doc, &mut engine, &options).unwrap_err();
            assert_eq!(err, AtomError::InvalidElement(shown.to_owned()));
        }
        assert_eq!(engine.teardowns, 0);
        assert_eq!(container_markup(&doc, "#atom"), "");
    }

    #[test]
    fn missing_container_is_reported() {
        let mut doc = document();
        let err = renderer()
            .render(
                &mut doc,
                &mut SmilEngine::new(),
                &AtomOptions::new("#nowhere", 1),
            )
            .unwrap_err();
        assert_eq!(err, AtomError::ContainerNotFound("#nowhere".to_owned()));
        assert_eq!(container_markup(&doc, "#atom"), "");
    }

    #[test]
    fn invalid_configuration_fails_before_mutation() {
        struct BrokenTable;
        impl ElementSource for BrokenTable {
            fn lookup(&self, _periodic_number: u32) -> Option<Element> {
                Some(Element::new(3, "Xx", "Broken", &[2, 0, 1]))
            }
        }

        let mut doc = document();
        let mut engine = RecordingEngine::default();
        let mut options = AtomOptions::new("#atom", 3);

        let mut broken = AtomRenderer::new(BrokenTable, ChaCha8Rng::seed_from_u64(1));
        let err = broken.render(&mut doc, &mut engine, &options).unwrap_err();
        assert!(matches!(err, AtomError::InvalidConfiguration(_)));

        options.animation_duration = DurationRange::new(9, 2);
        let err = renderer().render(&mut doc, &mut engine, &options).unwrap_err();
        assert!(matches!(err, AtomError::InvalidConfiguration(_)));

        assert_eq!(engine.teardowns, 0);
        assert_eq!(container_markup(&doc, "#atom"), "");
    }

    #[test]
    fn disabled_animation_pauses_every_plan_at_its_duration() {
        let mut doc = document();
        let mut engine = RecordingEngine::default();
        let mut options = AtomOptions::new("#atom", 26);
        options.animated = false;
        let report = renderer().render(&mut doc, &mut engine, &options).unwrap();

        for (orbit, played) in report.orbits.iter().zip(&engine.played) {
            assert!(orbit.plan.paused);
            assert!(played.paused);
            assert_eq!(played.position, orbit.plan.duration());
            assert_ne!(played.position, 0.0);
        }
    }

    #[test]
    fn custom_duration_range_bounds_every_orbit() {
        let mut doc = document();
        let mut options = AtomOptions::new("#atom", 54);
        options.animation_duration = DurationRange::new(2, 3);
        let report = renderer()
            .render(&mut doc, &mut SmilEngine::new(), &options)
            .unwrap();
        assert!(
            report
                .orbits
                .iter()
                .all(|orbit| (2..=3).contains(&orbit.plan.duration_secs))
        );
    }

    #[test]
    fn embedded_style_is_first_child_of_svg() {
        let mut doc = document();
        let mut options = AtomOptions::new("#atom", 1);
        options.embed_style = true;
        renderer()
            .render(&mut doc, &mut SmilEngine::new(), &options)
            .unwrap();
        let svg = doc.query_selector("svg").unwrap();
        assert_eq!(doc.tag(doc.children(svg)[0]), Some("style"));
    }
}
