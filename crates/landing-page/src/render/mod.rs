//! Composition of a page configuration into a render plan, and the
//! dispatch table mapping section types to presentation components.

mod compose;
mod dispatch;

pub use compose::{compose, DataProviders, RenderEntry, RenderPlan};
pub use dispatch::{DataSource, DispatchError, DispatchTable, RendererHandle};
