use crate::constants::*;
use bytemuck::{Pod, Zeroable};
use glam::{IVec2, Vec2};

/// Constant buffer of the GTAO compute passes.
///
/// Field order and widths mirror the shader-side declaration. Everything is four-byte
/// aligned and the total is a multiple of 16, so no implicit padding can sneak in.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GtaoConstants {
    pub viewport_size: IVec2,
    pub viewport_pixel_size: Vec2, // 1.0 / viewport_size

    pub depth_unpack_consts: Vec2,
    pub camera_tan_half_fov: Vec2,

    pub ndc_to_view_mul: Vec2,
    pub ndc_to_view_add: Vec2,

    pub ndc_to_view_mul_x_pixel_size: Vec2,
    pub effect_radius: f32, // world (viewspace) maximum size of the shadow
    pub effect_falloff_range: f32,

    pub radius_multiplier: f32,
    pub taa_blend_amount: f32,
    pub final_value_power: f32,
    pub denoise_blur_beta: f32,

    pub sample_distribution_power: f32,
    pub thin_occluder_compensation: f32,
    pub depth_mip_sampling_offset: f32,
    pub noise_index: i32, // frame_index % 64 if using TAA or 0 otherwise
}

const _: () = assert!(core::mem::size_of::<GtaoConstants>() == 96);
const _: () = assert!(core::mem::align_of::<GtaoConstants>() == 4);

impl Default for GtaoConstants {
    fn default() -> Self {
        Self {
            viewport_size: IVec2::ZERO,
            viewport_pixel_size: Vec2::ZERO,
            depth_unpack_consts: Vec2::ZERO,
            camera_tan_half_fov: Vec2::ZERO,
            ndc_to_view_mul: Vec2::ZERO,
            ndc_to_view_add: Vec2::ZERO,
            ndc_to_view_mul_x_pixel_size: Vec2::ZERO,
            effect_radius: 0.0,
            effect_falloff_range: DEFAULT_FALLOFF_RANGE,
            radius_multiplier: DEFAULT_RADIUS_MULTIPLIER,
            taa_blend_amount: 0.0,
            final_value_power: DEFAULT_FINAL_VALUE_POWER,
            denoise_blur_beta: DEFAULT_DENOISE_BLUR_BETA,
            sample_distribution_power: DEFAULT_SAMPLE_DISTRIBUTION_POWER,
            thin_occluder_compensation: DEFAULT_THIN_OCCLUDER_COMPENSATION,
            depth_mip_sampling_offset: DEFAULT_DEPTH_MIP_SAMPLING_OFFSET,
            noise_index: 0,
        }
    }
}

impl GtaoConstants {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Reads a record back from its raw layout. `bytes` needs no particular alignment.
    pub fn read_from(bytes: &[u8]) -> Result<Self, bytemuck::PodCastError> {
        bytemuck::try_pod_read_unaligned(bytes)
    }

    /// Tunables as the main pass sees them.
    ///
    /// With the `default-constants` feature the record's values are ignored in favor of
    /// the baked-in defaults.
    pub fn tunables(&self) -> GtaoTunables {
        if USE_DEFAULT_CONSTANTS {
            GtaoTunables::DEFAULT
        } else {
            GtaoTunables {
                radius_multiplier: self.radius_multiplier,
                falloff_range: self.effect_falloff_range,
                sample_distribution_power: self.sample_distribution_power,
                thin_occluder_compensation: self.thin_occluder_compensation,
                final_value_power: self.final_value_power,
                depth_mip_sampling_offset: self.depth_mip_sampling_offset,
            }
        }
    }

    pub fn set_tunables(&mut self, tunables: GtaoTunables) {
        self.radius_multiplier = tunables.radius_multiplier;
        self.effect_falloff_range = tunables.falloff_range;
        self.sample_distribution_power = tunables.sample_distribution_power;
        self.thin_occluder_compensation = tunables.thin_occluder_compensation;
        self.final_value_power = tunables.final_value_power;
        self.depth_mip_sampling_offset = tunables.depth_mip_sampling_offset;
    }

    pub fn kernel_terms(&self) -> GtaoKernelTerms {
        self.tunables().kernel_terms(self.effect_radius)
    }
}

/// The six values which can be baked in with `default-constants`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GtaoTunables {
    pub radius_multiplier: f32,
    pub falloff_range: f32,
    pub sample_distribution_power: f32,
    pub thin_occluder_compensation: f32,
    pub final_value_power: f32,
    pub depth_mip_sampling_offset: f32,
}

impl GtaoTunables {
    pub const DEFAULT: Self = Self {
        radius_multiplier: DEFAULT_RADIUS_MULTIPLIER,
        falloff_range: DEFAULT_FALLOFF_RANGE,
        sample_distribution_power: DEFAULT_SAMPLE_DISTRIBUTION_POWER,
        thin_occluder_compensation: DEFAULT_THIN_OCCLUDER_COMPENSATION,
        final_value_power: DEFAULT_FINAL_VALUE_POWER,
        depth_mip_sampling_offset: DEFAULT_DEPTH_MIP_SAMPLING_OFFSET,
    };

    pub fn kernel_terms(&self, effect_radius: f32) -> GtaoKernelTerms {
        let effect_radius = effect_radius * self.radius_multiplier;
        let falloff_range = self.falloff_range * effect_radius;
        let falloff_from = effect_radius * (1.0 - self.falloff_range);

        GtaoKernelTerms {
            effect_radius,
            falloff_range,
            falloff_from,
            // fadeout precompute optimisation
            falloff_mul: -1.0 / falloff_range,
            falloff_add: falloff_from / falloff_range + 1.0,
            sample_distribution_power: self.sample_distribution_power,
            thin_occluder_compensation: self.thin_occluder_compensation,
            final_value_power: self.final_value_power,
            depth_mip_sampling_offset: self.depth_mip_sampling_offset,
        }
    }
}

impl Default for GtaoTunables {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-dispatch values derived once from the constants before the horizon search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GtaoKernelTerms {
    pub effect_radius: f32,
    pub falloff_range: f32,
    pub falloff_from: f32,
    pub falloff_mul: f32,
    pub falloff_add: f32,
    pub sample_distribution_power: f32,
    pub thin_occluder_compensation: f32,
    pub final_value_power: f32,
    pub depth_mip_sampling_offset: f32,
}

impl GtaoKernelTerms {
    /// 1 inside `falloff_from`, fading linearly to 0 at `effect_radius`.
    pub fn falloff_weight(&self, dist: f32) -> f32 {
        (dist * self.falloff_mul + self.falloff_add).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
fn populated() -> GtaoConstants {
    GtaoConstants {
        viewport_size: IVec2::new(1920, 1080),
        viewport_pixel_size: Vec2::new(1.0 / 1920.0, 1.0 / 1080.0),
        depth_unpack_consts: Vec2::new(0.1, 1.0001),
        camera_tan_half_fov: Vec2::new(1.02, 0.577),
        ndc_to_view_mul: Vec2::new(2.04, -1.154),
        ndc_to_view_add: Vec2::new(-1.02, 0.577),
        ndc_to_view_mul_x_pixel_size: Vec2::new(2.04 / 1920.0, -1.154 / 1080.0),
        effect_radius: 128.0,
        effect_falloff_range: 0.75,
        radius_multiplier: 1.25,
        taa_blend_amount: 0.9,
        final_value_power: 5.0,
        denoise_blur_beta: 1.2,
        sample_distribution_power: 1.5,
        thin_occluder_compensation: 2.5,
        depth_mip_sampling_offset: 2.0,
        noise_index: 37,
    }
}

#[test]
fn test_field_offsets() {
    assert_eq!(bytemuck::offset_of!(GtaoConstants, viewport_size), 0);
    assert_eq!(bytemuck::offset_of!(GtaoConstants, viewport_pixel_size), 8);
    assert_eq!(bytemuck::offset_of!(GtaoConstants, ndc_to_view_mul_x_pixel_size), 48);
    assert_eq!(bytemuck::offset_of!(GtaoConstants, effect_radius), 56);
    assert_eq!(bytemuck::offset_of!(GtaoConstants, radius_multiplier), 64);
    assert_eq!(bytemuck::offset_of!(GtaoConstants, sample_distribution_power), 80);
    assert_eq!(bytemuck::offset_of!(GtaoConstants, noise_index), 92);
}

#[test]
fn test_byte_round_trip() {
    let consts = populated();
    let bytes = consts.as_bytes().to_vec();
    assert_eq!(bytes.len(), 96);
    assert_eq!(&bytes[92..96], &37i32.to_ne_bytes());
    assert_eq!(GtaoConstants::read_from(&bytes), Ok(consts));

    // Unaligned source
    let mut shifted = vec![0u8; 1];
    shifted.extend_from_slice(&bytes);
    assert_eq!(GtaoConstants::read_from(&shifted[1..]), Ok(consts));

    assert!(GtaoConstants::read_from(&bytes[..95]).is_err());
}

#[test]
fn test_default_tunables() {
    let consts = GtaoConstants::default();
    assert_eq!(consts.tunables(), GtaoTunables::DEFAULT);
    assert_eq!(consts.denoise_blur_beta, 1.5);
}

// Default literals supplied at runtime must match the baked-in path, whichever one is compiled.
#[test]
fn test_default_constants_equivalence() {
    let mut consts = populated();
    consts.set_tunables(GtaoTunables::DEFAULT);

    let baked = GtaoTunables::DEFAULT.kernel_terms(consts.effect_radius);
    assert_eq!(consts.kernel_terms(), baked);
    assert_eq!(
        consts.kernel_terms().falloff_weight(100.0),
        baked.falloff_weight(100.0)
    );
}

#[test]
fn test_runtime_tunables() {
    let consts = populated();
    let tunables = consts.tunables();

    if USE_DEFAULT_CONSTANTS {
        assert_eq!(tunables, GtaoTunables::DEFAULT);
    } else {
        assert_eq!(tunables.radius_multiplier, 1.25);
        assert_eq!(tunables.falloff_range, 0.75);
        assert_eq!(tunables.thin_occluder_compensation, 2.5);
    }
}

#[test]
fn test_falloff_weight() {
    let terms = GtaoTunables {
        radius_multiplier: 1.0,
        falloff_range: 0.5,
        ..GtaoTunables::DEFAULT
    }
    .kernel_terms(10.0);

    assert_eq!(terms.falloff_from, 5.0);
    assert_eq!(terms.falloff_weight(0.0), 1.0);
    assert_eq!(terms.falloff_weight(5.0), 1.0);
    assert!((terms.falloff_weight(7.5) - 0.5).abs() < 1e-6);
    assert_eq!(terms.falloff_weight(10.0), 0.0);
    assert_eq!(terms.falloff_weight(20.0), 0.0);
}
