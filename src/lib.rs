#[macro_use]
extern crate log;

pub mod api;
pub mod bounds;
pub mod color;
pub mod config;
pub mod drawing;
pub mod error;
pub mod input;
pub mod logs;
pub mod projection;
pub mod track;
