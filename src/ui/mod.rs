pub mod command_bar;
pub mod orbit_panel;
