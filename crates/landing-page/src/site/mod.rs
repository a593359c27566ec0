//! Tenant-facing service and HTTP routes over the composition engine.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::page_router;
pub use service::{LandingPageService, PageView, SiteError};
