pub mod error;
pub mod graph;
pub mod schedule;
pub(crate) mod wiring;

pub use error::{NetworkError, NetworkErrorKind};
pub use graph::{ActorId, Connection, Endpoint, Network, Sink, Source};
pub use schedule::Schedule;
