//! Errors for loading levels and solver configuration
//!
//! The solver itself never fails; only data coming in from outside does.

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Gear '{0}' must have at least one tooth")]
    ZeroTeeth(String),

    #[error("Toolbox must offer at least one gear size")]
    EmptyToolbox,

    #[error("Toolbox gear sizes must have at least one tooth")]
    ZeroToolboxTeeth,

    #[error("Target must require a rotation direction, not 'stopped'")]
    TargetDirection,

    #[error("Belt {from} -> {to} references an unknown gear")]
    UnknownBeltEndpoint { from: String, to: String },

    #[error("Water zone {0} has a negative size")]
    WaterZoneSize(usize),

    #[error("max_belt_length must be positive, got {0}")]
    BeltLength(f32),

    #[error("Invalid solver config: {0}")]
    InvalidConfig(String),
}
