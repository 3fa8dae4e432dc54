use crate::error::GtaoError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleQuality {
    Low,
    Medium,
    High,
}

impl SampleQuality {
    /// Pixel samples taken to determine occlusion.
    pub fn sample_count(self) -> u32 {
        match self {
            SampleQuality::Low => 9,
            SampleQuality::Medium => 16,
            SampleQuality::High => 25,
        }
    }

    // Noisier qualities lean harder on history.
    pub fn taa_blend_amount(self) -> f32 {
        match self {
            SampleQuality::Low => 0.95,
            SampleQuality::Medium => 0.9,
            SampleQuality::High => 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenoiseMode {
    /// Averages within a local neighborhood of a single frame.
    Spatial,
    /// Accumulates over frames; enables the temporal noise index.
    Temporal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GtaoSettings {
    /// Strength of the darkening. Has no impact on performance.
    pub intensity: f32,
    /// Maximum distance of samples from the pixel, in world units.
    pub radius: f32,
    /// Gently reduces sample impact towards the edge of the radius.
    pub falloff_range: f32,
    pub quality: SampleQuality,
    pub denoise_mode: DenoiseMode,
    /// Slightly reduces the impact of samples further back, countering the bias of
    /// depth-only (incomplete) scene data.
    pub thin_compensation: f32,
}

impl Default for GtaoSettings {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            radius: 128.0,
            falloff_range: 1.0,
            quality: SampleQuality::High,
            denoise_mode: DenoiseMode::Temporal,
            thin_compensation: 5.0,
        }
    }
}

impl GtaoSettings {
    pub const INTENSITY_RANGE: (f32, f32) = (0.0, 1.0);
    pub const RADIUS_RANGE: (f32, f32) = (1.0, 512.0);
    pub const FALLOFF_RANGE_RANGE: (f32, f32) = (0.01, 1.0);
    pub const THIN_COMPENSATION_RANGE: (f32, f32) = (0.0, 5.0);

    pub fn validate(&self) -> Result<(), GtaoError> {
        check_range("intensity", self.intensity, Self::INTENSITY_RANGE)?;
        check_range("radius", self.radius, Self::RADIUS_RANGE)?;
        check_range(
            "falloff_range",
            self.falloff_range,
            Self::FALLOFF_RANGE_RANGE,
        )?;
        check_range(
            "thin_compensation",
            self.thin_compensation,
            Self::THIN_COMPENSATION_RANGE,
        )
    }

    pub fn from_ron_str(s: &str) -> Result<Self, GtaoError> {
        let settings: Self = ron::de::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GtaoError> {
        let path = path.as_ref();
        log::debug!("Loading GTAO settings from {:?}", path);
        Self::from_ron_str(&std::fs::read_to_string(path)?)
    }
}

fn check_range(name: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), GtaoError> {
    // NaN fails both comparisons
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(GtaoError::InvalidSetting {
            name,
            value,
            min,
            max,
        })
    }
}

#[test]
fn test_defaults_are_valid() {
    assert!(GtaoSettings::default().validate().is_ok());
}

#[test]
fn test_out_of_range() {
    let settings = GtaoSettings {
        radius: 0.5,
        ..Default::default()
    };
    assert!(matches!(
        settings.validate(),
        Err(GtaoError::InvalidSetting { name: "radius", .. })
    ));

    let settings = GtaoSettings {
        intensity: f32::NAN,
        ..Default::default()
    };
    assert!(matches!(
        settings.validate(),
        Err(GtaoError::InvalidSetting {
            name: "intensity",
            ..
        })
    ));
}

#[test]
fn test_from_ron() {
    let settings = GtaoSettings::from_ron_str(
        "(radius: 64.0, quality: Low, denoise_mode: Spatial, thin_compensation: 0.5)",
    )
    .unwrap();

    assert_eq!(settings.radius, 64.0);
    assert_eq!(settings.quality, SampleQuality::Low);
    assert_eq!(settings.denoise_mode, DenoiseMode::Spatial);
    assert_eq!(settings.intensity, 1.0);

    assert!(matches!(
        GtaoSettings::from_ron_str("(radius: 1000.0)"),
        Err(GtaoError::InvalidSetting { .. })
    ));
    assert!(matches!(
        GtaoSettings::from_ron_str("(radius: "),
        Err(GtaoError::Config(_))
    ));
}

#[test]
fn test_quality_tables() {
    assert_eq!(SampleQuality::Low.sample_count(), 9);
    assert_eq!(SampleQuality::High.sample_count(), 25);
    assert_eq!(SampleQuality::Medium.taa_blend_amount(), 0.9);
}
