//! Section catalog: types, variants, typed settings bundles.

pub mod domain;
mod registry;
pub mod settings;

pub use domain::{Section, SectionBody, SectionId, SectionType, UnknownType, DEFAULT_VARIANT};
pub use registry::{
    FieldKind, RegistryError, SectionRegistry, SectionTypeDescriptor, SettingsField,
    SettingsSchema, VariantDescriptor,
};
pub use settings::{
    CtaSettings, GallerySettings, HeroSettings, ImageRef, LocationSettings, ReviewsSettings,
    SectionSettings, ServicesSettings, TeamSettings,
};
