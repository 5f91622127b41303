pub mod fixed_point;
pub mod telemetry;
pub mod types;

pub use fixed_point::FixedPointDirector;
pub use telemetry::{
    DirectorEvent, DirectorTelemetryPort, NoopDirectorTelemetry, TracingDirectorTelemetry,
};
pub use types::{DirectorConfig, TickReport};
