use crate::error::GtaoError;
use glam::{UVec2, Vec2};
use gtao_shared::gtao::GtaoConstants;

/// Camera and render extent the viewport-dependent constants are derived from.
///
/// These are optional: when the pipeline leaves them zeroed, the shader reconstructs them itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GtaoViewport {
    pub size: UVec2,
    pub near: f32,
    pub far: f32,
    pub vertical_fov_degrees: f32,
}

impl GtaoViewport {
    pub fn new(size: UVec2, near: f32, far: f32, vertical_fov_degrees: f32) -> Self {
        Self {
            size,
            near,
            far,
            vertical_fov_degrees,
        }
    }

    pub fn validate(&self) -> Result<(), GtaoError> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(GtaoError::InvalidViewport {
                reason: format!("empty extent {}x{}", self.size.x, self.size.y),
            });
        }

        if !(self.near > 0.0 && self.far > self.near) {
            return Err(GtaoError::InvalidViewport {
                reason: format!("bad depth range {}..{}", self.near, self.far),
            });
        }

        if !(self.vertical_fov_degrees > 0.0 && self.vertical_fov_degrees < 180.0) {
            return Err(GtaoError::InvalidViewport {
                reason: format!("bad vertical fov {}", self.vertical_fov_degrees),
            });
        }

        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.size.x as f32 / self.size.y as f32
    }

    pub fn pixel_size(&self) -> Vec2 {
        Vec2::ONE / self.size.as_vec2()
    }

    pub fn depth_unpack_consts(&self) -> Vec2 {
        let depth_linearize_mul = (self.far * self.near) / (self.far - self.near);
        let mut depth_linearize_add = self.far / (self.far - self.near);

        // correct the handedness issue
        if depth_linearize_mul * depth_linearize_add < 0.0 {
            depth_linearize_add = -depth_linearize_add;
        }

        Vec2::new(depth_linearize_mul, depth_linearize_add)
    }

    pub fn tan_half_fov(&self) -> Vec2 {
        let tan_half_fov_y = (0.5 * self.vertical_fov_degrees.to_radians()).tan();
        Vec2::new(tan_half_fov_y * self.aspect_ratio(), tan_half_fov_y)
    }

    /// Fills the viewport and camera dependent part of `consts`, leaving the rest alone.
    pub fn apply(&self, consts: &mut GtaoConstants) {
        let tan_half_fov = self.tan_half_fov();

        consts.viewport_size = self.size.as_ivec2();
        consts.viewport_pixel_size = self.pixel_size();
        consts.depth_unpack_consts = self.depth_unpack_consts();
        consts.camera_tan_half_fov = tan_half_fov;
        consts.ndc_to_view_mul = tan_half_fov * Vec2::new(2.0, -2.0);
        consts.ndc_to_view_add = tan_half_fov * Vec2::new(-1.0, 1.0);
        consts.ndc_to_view_mul_x_pixel_size = consts.ndc_to_view_mul * consts.viewport_pixel_size;
    }
}

#[cfg(test)]
fn approx_eq(a: Vec2, b: Vec2) -> bool {
    (a - b).abs().max_element() < 1e-5
}

#[test]
fn test_apply() {
    let viewport = GtaoViewport::new(UVec2::new(1920, 1080), 0.1, 1000.0, 60.0);
    assert!(viewport.validate().is_ok());

    let mut consts = GtaoConstants {
        effect_radius: 42.0,
        ..Default::default()
    };
    viewport.apply(&mut consts);

    assert_eq!(consts.viewport_size, glam::IVec2::new(1920, 1080));
    assert!(approx_eq(
        consts.viewport_pixel_size,
        Vec2::new(1.0 / 1920.0, 1.0 / 1080.0)
    ));
    assert!(approx_eq(
        consts.camera_tan_half_fov,
        Vec2::new(1.026_400_8, 0.577_350_3)
    ));
    assert!(approx_eq(
        consts.ndc_to_view_mul,
        Vec2::new(2.052_801_6, -1.154_700_6)
    ));
    assert!(approx_eq(
        consts.ndc_to_view_add,
        Vec2::new(-1.026_400_8, 0.577_350_3)
    ));
    assert!(approx_eq(
        consts.depth_unpack_consts,
        Vec2::new(0.100_01, 1.000_1)
    ));
    assert!(approx_eq(
        consts.ndc_to_view_mul_x_pixel_size * Vec2::new(1920.0, 1080.0),
        consts.ndc_to_view_mul
    ));

    assert_eq!(consts.effect_radius, 42.0);
}

#[test]
fn test_invalid() {
    let good = GtaoViewport::new(UVec2::new(64, 64), 0.1, 100.0, 90.0);

    for bad in [
        GtaoViewport {
            size: UVec2::new(0, 64),
            ..good
        },
        GtaoViewport { near: 0.0, ..good },
        GtaoViewport { far: 0.05, ..good },
        GtaoViewport {
            vertical_fov_degrees: 180.0,
            ..good
        },
        GtaoViewport {
            vertical_fov_degrees: f32::NAN,
            ..good
        },
    ] {
        assert!(
            matches!(bad.validate(), Err(GtaoError::InvalidViewport { .. })),
            "{:?}",
            bad
        );
    }
}
