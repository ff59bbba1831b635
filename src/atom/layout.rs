use crate::constants::{ELECTRON_RADIUS, FIXED_VIEW_BOX_SIZE, ORBIT_SPACING, VIEW_BOX_PADDING};
use crate::physics::elements::ElectronConfiguration;
use glam::Vec2;
use serde::Serialize;

/// Square drawing frame shared by every shape of one rendered atom.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LayoutGeometry {
    pub width: f32,
    pub height: f32,
    pub horizontal_center: f32,
    pub vertical_center: f32,
    pub spacing: f32,
}

impl LayoutGeometry {
    /// Sizes the viewBox for `orbit_count` orbits.
    ///
    /// The dynamic size leaves room for the outermost orbit, an electron sitting on
    /// it, and padding on every side. Zero orbits degrades to a padding-only box.
    pub fn compute(orbit_count: usize, fixed_view_box: bool) -> Self {
        let dimension = if fixed_view_box {
            FIXED_VIEW_BOX_SIZE
        } else {
            orbit_count as f32 * ORBIT_SPACING * 2.0
                + ELECTRON_RADIUS * 2.0
                + VIEW_BOX_PADDING * 2.0
        };

        Self {
            width: dimension,
            height: dimension,
            horizontal_center: dimension / 2.0,
            vertical_center: dimension / 2.0,
            spacing: ORBIT_SPACING,
        }
    }

    pub fn for_configuration(config: &ElectronConfiguration<'_>, fixed_view_box: bool) -> Self {
        Self::compute(config.orbit_count(), fixed_view_box)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.horizontal_center, self.vertical_center)
    }

    pub fn orbit_radius(&self, orbit_number: u32) -> f32 {
        self.spacing * orbit_number as f32
    }

    /// Value of the svg `viewBox` attribute.
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}
