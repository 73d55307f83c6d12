//! Command line presentation of exposure results

pub mod exposure;
pub mod funds;
pub mod setup;
pub mod shares;
pub mod ui;
