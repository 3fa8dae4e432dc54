use crate::{
    error::GtaoError,
    settings::{DenoiseMode, GtaoSettings, SampleQuality},
    viewport::GtaoViewport,
};
use glam::UVec2;
use gtao_shared::{constants::*, gtao::GtaoConstants};

// Used only by the spatial denoiser.
const SPATIAL_DENOISE_BLUR_BETA: f32 = 1.2;
// Intensity is normalized to the [0, 1] settings range.
const INTENSITY_TO_FINAL_VALUE_POWER: f32 = 5.0;
const NOISE_INDEX_PERIOD: u32 = 64;

/// Compute passes of the effect, in the order they are dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GtaoPass {
    // Averaged depth, similar to a regular depth chain
    ViewDepthChain,
    MainPass,
    DenoiseSpatial,
    DenoiseTemporal,
}

impl GtaoPass {
    pub fn denoise(mode: DenoiseMode) -> Self {
        match mode {
            DenoiseMode::Spatial => GtaoPass::DenoiseSpatial,
            DenoiseMode::Temporal => GtaoPass::DenoiseTemporal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GtaoTargetFormat {
    R32Float,
    R16Float,
    A8Unorm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GtaoTargetDesc {
    pub name: &'static str,
    pub format: GtaoTargetFormat,
    pub mip_levels: u32,
}

impl GtaoTargetDesc {
    const fn new(name: &'static str, format: GtaoTargetFormat) -> Self {
        Self {
            name,
            format,
            mip_levels: 1,
        }
    }
}

pub const VIEW_DEPTH_CHAIN_TARGET: GtaoTargetDesc = GtaoTargetDesc {
    name: "ViewDepthChainTexture",
    format: GtaoTargetFormat::R32Float,
    mip_levels: DEPTH_MIP_LEVELS,
};
pub const WORKING_EDGES_TARGET: GtaoTargetDesc =
    GtaoTargetDesc::new("WorkingEdgesTexture", GtaoTargetFormat::R16Float);
pub const WORKING_AO_TARGET: GtaoTargetDesc =
    GtaoTargetDesc::new("WorkingAOTexture", GtaoTargetFormat::A8Unorm);
pub const AO_TARGETS: [GtaoTargetDesc; 2] = [
    GtaoTargetDesc::new("AOTexture0", GtaoTargetFormat::A8Unorm),
    GtaoTargetDesc::new("AOTexture1", GtaoTargetFormat::A8Unorm),
];

pub fn render_targets() -> [GtaoTargetDesc; 5] {
    [
        VIEW_DEPTH_CHAIN_TARGET,
        WORKING_EDGES_TARGET,
        WORKING_AO_TARGET,
        AO_TARGETS[0],
        AO_TARGETS[1],
    ]
}

/// Thread groups needed to cover `extent` with one thread per pixel.
pub fn dispatch_size(extent: UVec2) -> UVec2 {
    UVec2::new(
        (extent.x + NUMTHREADS_X - 1) / NUMTHREADS_X,
        (extent.y + NUMTHREADS_Y - 1) / NUMTHREADS_Y,
    )
}

/// Everything needed to record one frame of the effect.
#[derive(Clone, Debug, PartialEq)]
pub struct GtaoFrame {
    pub frame_index: u32,
    pub constants: GtaoConstants,
    pub passes: [GtaoPass; 3],
    /// Shader variant all three passes are dispatched with.
    pub quality: SampleQuality,
    /// Written this frame; exposed to the rest of the pipeline afterwards.
    pub ao_output: GtaoTargetDesc,
    /// Last frame's output, read by the temporal denoiser.
    pub ao_history: GtaoTargetDesc,
}

#[derive(Default)]
pub struct GtaoRenderer {
    frame_index: u32,
}

impl GtaoRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Restarts the noise sequence and the ping-pong parity.
    pub fn reset(&mut self) {
        self.frame_index = 0;
    }

    pub fn constants(
        &self,
        settings: &GtaoSettings,
        viewport: Option<&GtaoViewport>,
    ) -> GtaoConstants {
        let mut consts = GtaoConstants::default();

        if let Some(viewport) = viewport {
            viewport.apply(&mut consts);
        }

        consts.effect_radius = settings.radius;
        consts.effect_falloff_range = settings.falloff_range;
        consts.denoise_blur_beta = SPATIAL_DENOISE_BLUR_BETA;
        consts.noise_index = match settings.denoise_mode {
            DenoiseMode::Temporal => (self.frame_index % NOISE_INDEX_PERIOD) as i32,
            DenoiseMode::Spatial => 0,
        };
        consts.thin_occluder_compensation = settings.thin_compensation;
        consts.final_value_power = settings.intensity * INTENSITY_TO_FINAL_VALUE_POWER;
        consts.taa_blend_amount = settings.quality.taa_blend_amount();

        consts
    }

    pub fn prepare_frame(
        &mut self,
        settings: &GtaoSettings,
        viewport: Option<&GtaoViewport>,
    ) -> Result<GtaoFrame, GtaoError> {
        settings.validate()?;
        if let Some(viewport) = viewport {
            viewport.validate()?;
        }

        // Parity is taken before the counter advances, the noise index after.
        let frame_index = self.frame_index;
        let ping_pong = (frame_index % 2) as usize;
        self.frame_index = self.frame_index.wrapping_add(1);

        let frame = GtaoFrame {
            frame_index,
            constants: self.constants(settings, viewport),
            passes: [
                GtaoPass::ViewDepthChain,
                GtaoPass::MainPass,
                GtaoPass::denoise(settings.denoise_mode),
            ],
            quality: settings.quality,
            ao_output: AO_TARGETS[ping_pong],
            ao_history: AO_TARGETS[1 - ping_pong],
        };

        log::trace!(
            "GTAO frame {}: {:?} at {} samples, noise index {}, writing {}",
            frame.frame_index,
            frame.passes,
            frame.quality.sample_count(),
            frame.constants.noise_index,
            frame.ao_output.name
        );

        Ok(frame)
    }
}

#[test]
fn test_frame_constants() {
    let mut renderer = GtaoRenderer::new();
    let settings = GtaoSettings {
        intensity: 0.5,
        radius: 200.0,
        falloff_range: 0.25,
        quality: SampleQuality::Medium,
        denoise_mode: DenoiseMode::Temporal,
        thin_compensation: 1.5,
    };

    let frame = renderer.prepare_frame(&settings, None).unwrap();
    let consts = frame.constants;

    assert_eq!(consts.effect_radius, 200.0);
    assert_eq!(consts.effect_falloff_range, 0.25);
    assert_eq!(consts.final_value_power, 2.5);
    assert_eq!(consts.thin_occluder_compensation, 1.5);
    assert_eq!(consts.taa_blend_amount, 0.9);
    assert_eq!(consts.denoise_blur_beta, 1.2);
    assert_eq!(consts.radius_multiplier, DEFAULT_RADIUS_MULTIPLIER);
    assert_eq!(consts.viewport_size, glam::IVec2::ZERO);
    assert_eq!(frame.quality, SampleQuality::Medium);
    assert_eq!(frame.quality.sample_count(), 16);
    assert_eq!(
        frame.passes,
        [
            GtaoPass::ViewDepthChain,
            GtaoPass::MainPass,
            GtaoPass::DenoiseTemporal
        ]
    );
}

#[test]
fn test_noise_index_and_ping_pong() {
    let mut renderer = GtaoRenderer::new();
    let temporal = GtaoSettings::default();
    let spatial = GtaoSettings {
        denoise_mode: DenoiseMode::Spatial,
        ..Default::default()
    };

    for i in 0..130u32 {
        let frame = renderer.prepare_frame(&temporal, None).unwrap();
        assert_eq!(frame.frame_index, i);
        assert_eq!(frame.constants.noise_index, ((i + 1) % 64) as i32);
        assert_eq!(frame.ao_output, AO_TARGETS[(i % 2) as usize]);
        assert_ne!(frame.ao_output, frame.ao_history);
    }

    let frame = renderer.prepare_frame(&spatial, None).unwrap();
    assert_eq!(frame.constants.noise_index, 0);
    assert_eq!(frame.passes[2], GtaoPass::DenoiseSpatial);

    renderer.reset();
    assert_eq!(renderer.frame_index(), 0);
    let frame = renderer.prepare_frame(&temporal, None).unwrap();
    assert_eq!(frame.ao_output.name, "AOTexture0");
    assert_eq!(frame.constants.noise_index, 1);
}

#[test]
fn test_rejects_invalid_input() {
    let mut renderer = GtaoRenderer::new();
    let bad_settings = GtaoSettings {
        falloff_range: 0.0,
        ..Default::default()
    };
    assert!(renderer.prepare_frame(&bad_settings, None).is_err());

    let bad_viewport = GtaoViewport::new(UVec2::ZERO, 0.1, 100.0, 60.0);
    assert!(renderer
        .prepare_frame(&GtaoSettings::default(), Some(&bad_viewport))
        .is_err());

    // Failed frames don't advance the sequence.
    assert_eq!(renderer.frame_index(), 0);
}

#[test]
fn test_viewport_constants() {
    let mut renderer = GtaoRenderer::new();
    let viewport = GtaoViewport::new(UVec2::new(1280, 720), 0.1, 500.0, 70.0);
    let frame = renderer
        .prepare_frame(&GtaoSettings::default(), Some(&viewport))
        .unwrap();

    assert_eq!(frame.constants.viewport_size, glam::IVec2::new(1280, 720));
    assert_eq!(frame.constants.effect_radius, 128.0);
}

#[test]
fn test_targets_and_dispatch() {
    let targets = render_targets();
    assert_eq!(targets[0].mip_levels, DEPTH_MIP_LEVELS);
    assert_eq!(targets[0].format, GtaoTargetFormat::R32Float);
    assert!(targets[1..].iter().all(|t| t.mip_levels == 1));

    assert_eq!(dispatch_size(UVec2::new(1920, 1080)), UVec2::new(240, 135));
    assert_eq!(dispatch_size(UVec2::new(1, 9)), UVec2::new(1, 2));
}
