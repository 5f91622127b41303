mod frame;
mod token;
mod value;
