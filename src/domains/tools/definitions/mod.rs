//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod calculator;
pub mod clock;

pub use calculator::CalculatorTool;
pub use clock::GetTimeTool;
