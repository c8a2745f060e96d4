pub mod command_palette;
pub mod debug_console;
pub mod home;
