//! Reusable rendering components shared by the dashboard screens.

pub mod header;
pub mod share_bar;
