pub mod base;
pub mod configs;
pub mod fork;
pub mod openai;
pub mod utils;
