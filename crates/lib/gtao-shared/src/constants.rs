// Consts visible from both the shader and the host side.

/// Mip count of the view-space depth chain; the main pass samples exactly this many.
pub const DEPTH_MIP_LEVELS: u32 = 5;
pub const NUMTHREADS_X: u32 = 8;
pub const NUMTHREADS_Y: u32 = 8;

/// For packing in UNORM. The raw, pre-denoised occlusion term can overshoot 1, but averages out to 1 later.
pub const OCCLUSION_TERM_SCALE: f32 = 1.5;

/// Set by the `default-constants` feature. When on, the tunables below are baked in
/// and the matching `GtaoConstants` fields are ignored.
pub const USE_DEFAULT_CONSTANTS: bool = cfg!(feature = "default-constants");

// Compensates for screen space biases vs the ground truth radius
pub const DEFAULT_RADIUS_MULTIPLIER: f32 = 1.457;
// Distant samples contribute less
pub const DEFAULT_FALLOFF_RANGE: f32 = 0.615;
// Small crevices more important than big surfaces
pub const DEFAULT_SAMPLE_DISTRIBUTION_POWER: f32 = 2.0;
pub const DEFAULT_THIN_OCCLUDER_COMPENSATION: f32 = 0.0;
pub const DEFAULT_FINAL_VALUE_POWER: f32 = 2.2;
// Memory bandwidth vs quality; temporal stability suffers first, thin objects next
pub const DEFAULT_DEPTH_MIP_SAMPLING_OFFSET: f32 = 3.30;

pub const DEFAULT_DENOISE_BLUR_BETA: f32 = 1.5;
