use glam::{Mat4, Quat, Vec3};

use crate::renderer_engine::Resolution;

/// Source de la matrice view-projection consommée par le batch à chaque flush.
pub trait Camera {
    fn view_projection(&self) -> Mat4;
}

/// Caméra orthographique 2D : origine en haut à gauche, y vers le bas,
/// une unité = un pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicCamera {
    pub position: Vec3,
    pub orientation: Quat,
    projection: Mat4,
}

impl OrthographicCamera {
    pub const NEAR_PLANE: f32 = 0.0;
    pub const FAR_PLANE: f32 = 16.0;

    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            // bottom = height, top = 0 : l'axe y descend
            projection: Mat4::orthographic_rh_gl(
                0.0,
                width,
                height,
                0.0,
                Self::NEAR_PLANE,
                Self::FAR_PLANE,
            ),
        }
    }

    pub fn from_resolution(resolution: Resolution) -> Self {
        Self::new(resolution.width as f32, resolution.height as f32)
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_quat(self.orientation) * Mat4::from_translation(-self.position)
    }

    pub fn set_position(&mut self, position: Vec3, relative: bool) {
        self.position = if relative {
            self.position + position
        } else {
            position
        };
    }
}

impl Camera for OrthographicCamera {
    fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }
}

impl Camera for Mat4 {
    fn view_projection(&self) -> Mat4 {
        *self
    }
}
