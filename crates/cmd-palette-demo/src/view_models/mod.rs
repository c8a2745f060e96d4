pub mod command_palette;
