pub mod error;
pub mod lut;
pub mod renderer;
pub mod settings;
pub mod viewport;

pub use error::GtaoError;
pub use gtao_shared as shared;
pub use gtao_shared::{gtao::GtaoConstants, reference_rtao::ReferenceRtaoConstants};
pub use renderer::{GtaoFrame, GtaoPass, GtaoRenderer};
pub use settings::{DenoiseMode, GtaoSettings, SampleQuality};
pub use viewport::GtaoViewport;
