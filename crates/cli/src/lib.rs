pub mod commands;
pub mod util;
