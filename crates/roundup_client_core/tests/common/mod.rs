pub mod allocation_screen;
pub mod assert_runner;
pub mod command_runner;
