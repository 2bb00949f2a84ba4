pub mod config_cmd;
pub mod menu_cmd;
pub mod output;
pub mod renderer;
