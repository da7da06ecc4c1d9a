pub mod commands;
pub mod models;
pub mod services;
pub mod shell;
pub mod utils;

#[cfg(test)]
mod testing;
