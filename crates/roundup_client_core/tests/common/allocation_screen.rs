//! One simulated allocation screen: open a set, run commands, assert on it.
//! Mirrors what the Flutter screen does through the bridge.

use std::cell::RefCell;

use super::command_runner::CommandRunner;

/// Holds a single CommandRunner so the open set id persists across run_commands calls.
pub struct AllocationScreen {
    runner: RefCell<CommandRunner>,
}

impl AllocationScreen {
    pub fn new() -> Self {
        Self {
            runner: RefCell::new(CommandRunner::new()),
        }
    }

    /// Shortcut for `new()` followed by `open <preset>`.
    pub fn open(preset: &str) -> Result<Self, String> {
        let screen = Self::new();
        screen.run_commands(&[&format!("open {}", preset)])?;
        Ok(screen)
    }

    pub fn set_id(&self) -> Result<String, String> {
        self.runner.borrow().set_id()
    }

    pub fn run_commands(&self, commands: &[&str]) -> Result<(), String> {
        self.runner.borrow_mut().execute_commands(commands)
    }

    pub fn assert_commands(&self, commands: &[&str]) -> Result<(), String> {
        super::assert_runner::assert_commands(&self.runner.borrow(), commands)
    }
}
