//! Page configuration: the persisted document, its templates, the
//! load/save reconciliation and the pure edit operations.

mod blueprint;
mod domain;
mod editor;
mod loader;
mod store;

pub use blueprint::{Template, TemplateCatalog, TemplateSummary, DEFAULT_TEMPLATE_ID};
pub use domain::{
    FooterSettings, PageConfiguration, PartialFooter, PartialPageConfiguration, PartialSeo,
    SeoConfig, SocialLink,
};
pub use editor::{
    add_section, apply_template, move_section, normalize_order, remove_section, reorder,
    set_enabled, set_variant, update_footer, update_seo, update_settings, update_settings_raw,
    update_styles, Edit, EditError, PageBuilder, Placement,
};
pub use loader::{load, load_document, prepare_for_save, LoadOutcome, PageWarning};
pub use store::{PageStore, StoreError};
