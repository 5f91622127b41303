pub mod causality;
pub mod contract;
pub mod error;
pub mod frame;
pub mod interface;

pub use causality::FunctionDependency;
pub use contract::{Actor, TickBoundary, TickState};
pub use error::{ActorError, ActorErrorKind};
pub use frame::PortFrame;
pub use interface::{ActorInterface, PortSpec};
