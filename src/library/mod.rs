pub mod adder;
pub mod combine;
pub mod current;
pub mod default;
pub mod delay;
pub mod distributor;
pub mod enabled;
pub mod logic;
pub mod pre;
pub mod when;

pub use adder::NonStrictThreeBitAdder;
pub use combine::{Combine, CombineFunction};
pub use current::Current;
pub use default::DefaultMerge;
pub use delay::{NonStrictDelay, NonStrictDelayInitialized};
pub use distributor::SingleTokenDistributor;
pub use enabled::{EnableState, EnabledComposite};
pub use logic::{NonStrictLogicGate, Operator};
pub use pre::Pre;
pub use when::When;
