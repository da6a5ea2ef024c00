#![allow(
    clippy::len_zero,
    clippy::needless_lifetimes,
    clippy::enum_variant_names,
    clippy::new_without_default,
    clippy::too_many_arguments
)]

#[macro_use]
mod macros;

pub mod backend;
pub mod client;
pub mod config;
pub mod fixed;
pub mod ifs;
#[cfg(test)]
mod it;
pub mod kbvm;
pub mod keyboard;
pub mod logger;
pub mod object;
pub mod rect;
pub mod state;
pub mod tree;
pub mod utils;
pub mod wire;
