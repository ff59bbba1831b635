use crate::app::AtomResult;
use crate::atom::layout::LayoutGeometry;
use crate::atom::shapes::{NucleusShape, OrbitShape, ShapeFactory};
use crate::physics::elements::Element;
use crate::simulation::planner::{AnimationPlan, AnimationPlanner, RandomSource};

/// One orbit with everything needed to draw and animate it.
#[derive(Clone, Debug)]
pub struct OrbitScene {
    pub shape: OrbitShape,
    pub electrons: u32,
    pub plan: AnimationPlan,
}

/// Fully resolved geometry and timing of one atom, computed before anything
/// is attached to a container.
#[derive(Clone, Debug)]
pub struct AtomScene {
    element: Element,
    layout: LayoutGeometry,
    nucleus: NucleusShape,
    orbits: Vec<OrbitScene>,
}

impl AtomScene {
    pub fn build<R: RandomSource + ?Sized>(
        element: Element,
        fixed_view_box: bool,
        animated: bool,
        planner: &AnimationPlanner,
        random: &mut R,
    ) -> AtomResult<Self> {
        let config = element.electron_configuration()?;
        let layout = LayoutGeometry::for_configuration(&config, fixed_view_box);
        let nucleus = ShapeFactory::nucleus(&layout);

        let orbits = config
            .orbits()
            .map(|(orbit_number, electrons)| {
                Ok(OrbitScene {
                    shape: ShapeFactory::orbit(&layout, orbit_number),
                    electrons,
                    plan: planner.plan(electrons, animated, random)?,
                })
            })
            .collect::<AtomResult<Vec<_>>>()?;

        Ok(Self {
            element,
            layout,
            nucleus,
            orbits,
        })
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn layout(&self) -> &LayoutGeometry {
        &self.layout
    }

    pub fn nucleus(&self) -> &NucleusShape {
        &self.nucleus
    }

    pub fn orbits(&self) -> &[OrbitScene] {
        &self.orbits
    }
}
