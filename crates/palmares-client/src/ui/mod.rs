//! UI widget modules for the login client.
//!
//! Each sub-module renders a single UI component using ratatui.

pub mod login_panel;
pub mod statusbar;
