#[derive(Debug, thiserror::Error)]
pub enum GtaoError {
    #[error("Invalid setting {name}: {value} not in [{min}, {max}]")]
    InvalidSetting {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("Invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Config(#[from] ron::de::Error),
}
