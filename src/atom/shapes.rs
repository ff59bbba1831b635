use crate::atom::layout::LayoutGeometry;
use crate::constants::{ELECTRON_RADIUS, NUCLEUS_RADIUS, SVG_NAMESPACE};
use crate::renderer::surface::ShapeNode;
use glam::Vec2;
use std::f32::consts::{PI, TAU};

pub const DEFAULT_STYLESHEET: &str = "\
.atom_nucleus { fill: #e74c3c; }
.atom_orbit { fill: none; stroke: #95a5a6; stroke-width: 1; }
.atom_electron { fill: #3498db; }";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NucleusShape {
    pub center: Vec2,
    pub radius: f32,
}

/// An electron carries no position: the animation engine places it on its orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElectronShape {
    pub radius: f32,
}

/// One elliptical-arc command (`A rx,ry rotation large-arc sweep x,y`), circular here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
    pub radius: f32,
    pub large_arc: bool,
    pub sweep: bool,
    pub end: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitShape {
    pub id: String,
    pub orbit_number: u32,
    pub center: Vec2,
    pub radius: f32,
    pub start: Vec2,
    pub arcs: [ArcSegment; 2],
}

impl OrbitShape {
    /// SVG path data for the closed circle.
    pub fn path_data(&self) -> String {
        let mut data = format!("M {},{}", self.start.x, self.start.y);
        for arc in &self.arcs {
            data.push_str(&format!(
                " A {},{} 0 {} {} {},{}",
                arc.radius,
                arc.radius,
                u8::from(arc.large_arc),
                u8::from(arc.sweep),
                arc.end.x,
                arc.end.y
            ));
        }
        data
    }

    /// Point reached after travelling `fraction` of the path.
    ///
    /// The path starts at the left-most point and runs clockwise on screen
    /// (y grows downwards), passing the top of the circle at a quarter.
    pub fn point_at(&self, fraction: f32) -> Vec2 {
        let angle = PI + TAU * fraction;
        self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius
    }

    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

pub fn orbit_id(orbit_number: u32) -> String {
    format!("orbit_{orbit_number}")
}

/// Builds the geometric descriptors of an atom; no rendering side effects.
pub struct ShapeFactory;

impl ShapeFactory {
    pub fn nucleus(geometry: &LayoutGeometry) -> NucleusShape {
        NucleusShape {
            center: geometry.center(),
            radius: NUCLEUS_RADIUS,
        }
    }

    pub fn electron() -> ElectronShape {
        ElectronShape {
            radius: ELECTRON_RADIUS,
        }
    }

    pub fn orbit(geometry: &LayoutGeometry, orbit_number: u32) -> OrbitShape {
        let center = geometry.center();
        let radius = geometry.orbit_radius(orbit_number);
        let start = center - Vec2::new(radius, 0.0);
        let opposite = center + Vec2::new(radius, 0.0);

        // A single arc cannot close a circle (start == end), so go halfway twice.
        let half = |end| ArcSegment {
            radius,
            large_arc: true,
            sweep: true,
            end,
        };

        OrbitShape {
            id: orbit_id(orbit_number),
            orbit_number,
            center,
            radius,
            start,
            arcs: [half(opposite), half(start)],
        }
    }
}

impl NucleusShape {
    pub fn to_node(&self) -> ShapeNode {
        ShapeNode::new("circle")
            .attr("class", "atom_nucleus")
            .attr("r", self.radius)
            .attr("cx", self.center.x)
            .attr("cy", self.center.y)
    }
}

impl ElectronShape {
    pub fn to_node(&self) -> ShapeNode {
        ShapeNode::new("circle")
            .attr("class", "atom_electron")
            .attr("r", self.radius)
    }
}

impl OrbitShape {
    pub fn to_node(&self) -> ShapeNode {
        ShapeNode::new("path")
            .attr("class", "atom_orbit")
            .attr("id", &self.id)
            .attr("d", self.path_data())
    }
}

/// Root `<svg>` node sized to the layout.
pub fn canvas_node(geometry: &LayoutGeometry) -> ShapeNode {
    ShapeNode::new("svg")
        .attr("xmlns", SVG_NAMESPACE)
        .attr("class", "atom_svg")
        .attr("viewBox", geometry.view_box())
        .attr("width", geometry.width)
}

pub fn stylesheet_node() -> ShapeNode {
    ShapeNode::new("style").text(DEFAULT_STYLESHEET)
}
