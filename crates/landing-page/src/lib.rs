//! Tenant-customizable landing page composition.
//!
//! A page is a stored, partial configuration document reconciled against a
//! template, composed into an ordered render plan and themed through a
//! system, account and domain branding cascade.

pub mod branding;
pub mod config;
pub mod error;
pub mod merge;
pub mod page;
pub mod render;
pub mod sections;
pub mod site;
pub mod telemetry;
pub mod tenant;
pub mod theme;
