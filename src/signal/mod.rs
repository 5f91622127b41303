pub mod token;
pub mod value;

pub use token::Token;
pub use value::Signal;
