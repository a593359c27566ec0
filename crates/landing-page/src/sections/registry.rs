use super::domain::{Section, SectionType, DEFAULT_VARIANT};
use super::settings::SectionSettings;
use serde::Serialize;
use tracing::debug;

/// Raised when a section type name is outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("section type '{0}' is not registered")]
    NotFound(String),
}

/// A presentation alternative for a section type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantDescriptor {
    pub name: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Link,
    Toggle,
    Number { min: u32, max: u32 },
    Image,
    ImageList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Field list of a type's settings record, shared by all of its variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsSchema {
    pub fields: Vec<SettingsField>,
}

impl SettingsSchema {
    pub fn field(&self, key: &str) -> Option<&SettingsField> {
        self.fields.iter().find(|field| field.key == key)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionTypeDescriptor {
    pub section_type: SectionType,
    pub label: &'static str,
    pub variants: Vec<VariantDescriptor>,
    pub settings_schema: SettingsSchema,
    pub default_settings: SectionSettings,
}

/// Catalog of every section type with its variants and settings schema.
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    descriptors: Vec<SectionTypeDescriptor>,
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl SectionRegistry {
    pub fn standard() -> Self {
        let descriptors = SectionType::ordered()
            .into_iter()
            .map(|section_type| SectionTypeDescriptor {
                section_type,
                label: section_type.label(),
                variants: variants_for(section_type),
                settings_schema: SettingsSchema {
                    fields: schema_fields_for(section_type),
                },
                default_settings: SectionSettings::default_for(section_type),
            })
            .collect();

        Self { descriptors }
    }

    pub fn descriptors(&self) -> &[SectionTypeDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, type_name: &str) -> Result<&SectionTypeDescriptor, RegistryError> {
        let section_type = type_name
            .parse::<SectionType>()
            .map_err(|err| RegistryError::NotFound(err.0))?;
        Ok(self.descriptor_for(section_type))
    }

    pub fn descriptor_for(&self, section_type: SectionType) -> &SectionTypeDescriptor {
        &self.descriptors[catalog_index(section_type)]
    }

    /// Return `variant` when the type knows it, `"default"` otherwise.
    pub fn variant_for(&self, section_type: SectionType, variant: &str) -> &'static str {
        let descriptor = self.descriptor_for(section_type);
        match descriptor
            .variants
            .iter()
            .find(|candidate| candidate.name == variant)
        {
            Some(known) => known.name,
            None => {
                debug!(%section_type, variant, "unrecognized variant coerced to default");
                DEFAULT_VARIANT
            }
        }
    }

    /// Variant check by type name. Unknown variants never fail; unknown types do.
    pub fn validate_variant(
        &self,
        type_name: &str,
        variant: &str,
    ) -> Result<&'static str, RegistryError> {
        let descriptor = self.descriptor(type_name)?;
        Ok(self.variant_for(descriptor.section_type, variant))
    }

    /// Confirm a section's type is registered, returning its typed settings.
    pub fn validate_section<'s>(
        &self,
        section: &'s Section,
    ) -> Result<&'s SectionSettings, RegistryError> {
        section
            .settings()
            .ok_or_else(|| RegistryError::NotFound(section.type_name().to_string()))
    }
}

const fn catalog_index(section_type: SectionType) -> usize {
    match section_type {
        SectionType::Hero => 0,
        SectionType::Services => 1,
        SectionType::Team => 2,
        SectionType::Gallery => 3,
        SectionType::Reviews => 4,
        SectionType::Location => 5,
        SectionType::Cta => 6,
    }
}

fn variants_for(section_type: SectionType) -> Vec<VariantDescriptor> {
    let alternates: &[(&'static str, &'static str)] = match section_type {
        SectionType::Hero => &[
            ("split", "Split image"),
            ("centered", "Centered"),
            ("video", "Video background"),
            ("minimal", "Minimal"),
        ],
        SectionType::Services => &[
            ("grid", "Grid"),
            ("list", "List"),
            ("cards", "Cards"),
            ("carousel", "Carousel"),
        ],
        SectionType::Team => &[
            ("grid", "Grid"),
            ("carousel", "Carousel"),
            ("compact", "Compact"),
        ],
        SectionType::Gallery => &[
            ("masonry", "Masonry"),
            ("carousel", "Carousel"),
            ("grid", "Grid"),
            ("fullwidth", "Full width"),
        ],
        SectionType::Reviews => &[
            ("carousel", "Carousel"),
            ("grid", "Grid"),
            ("featured", "Featured quote"),
        ],
        SectionType::Location => &[
            ("split", "Split map"),
            ("fullwidth-map", "Full width map"),
            ("compact", "Compact"),
        ],
        SectionType::Cta => &[
            ("banner", "Banner"),
            ("split", "Split"),
            ("minimal", "Minimal"),
        ],
    };

    std::iter::once((DEFAULT_VARIANT, "Default"))
        .chain(alternates.iter().copied())
        .map(|(name, label)| VariantDescriptor { name, label })
        .collect()
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind, required: bool) -> SettingsField {
    SettingsField {
        key,
        label,
        kind,
        required,
    }
}

fn schema_fields_for(section_type: SectionType) -> Vec<SettingsField> {
    use FieldKind::*;

    match section_type {
        SectionType::Hero => vec![
            field("headline", "Headline", Text, true),
            field("subheadline", "Subheadline", LongText, false),
            field("background_image", "Background image", Image, false),
            field("cta_label", "Button label", Text, true),
            field("cta_link", "Button link", Link, true),
            field("show_booking_button", "Show booking button", Toggle, false),
            field("overlay_opacity", "Overlay opacity", Number { min: 0, max: 100 }, false),
        ],
        SectionType::Services => vec![
            field("heading", "Heading", Text, true),
            field("description", "Description", LongText, false),
            field("show_prices", "Show prices", Toggle, false),
            field("show_duration", "Show duration", Toggle, false),
            field("max_items", "Maximum items", Number { min: 1, max: 50 }, false),
            field("columns", "Columns", Number { min: 1, max: 4 }, false),
        ],
        SectionType::Team => vec![
            field("heading", "Heading", Text, true),
            field("description", "Description", LongText, false),
            field("show_bio", "Show bio", Toggle, false),
            field("show_specialties", "Show specialties", Toggle, false),
            field("max_members", "Maximum members", Number { min: 1, max: 50 }, false),
        ],
        SectionType::Gallery => vec![
            field("heading", "Heading", Text, true),
            field("images", "Images", ImageList, false),
            field("columns", "Columns", Number { min: 1, max: 6 }, false),
            field("enable_lightbox", "Enable lightbox", Toggle, false),
        ],
        SectionType::Reviews => vec![
            field("heading", "Heading", Text, true),
            field("min_rating", "Minimum rating", Number { min: 1, max: 5 }, false),
            field("max_reviews", "Maximum reviews", Number { min: 1, max: 50 }, false),
            field("show_average", "Show average rating", Toggle, false),
            field("autoplay", "Autoplay", Toggle, false),
        ],
        SectionType::Location => vec![
            field("heading", "Heading", Text, true),
            field("address", "Address", LongText, false),
            field("show_map", "Show map", Toggle, false),
            field("show_hours", "Show opening hours", Toggle, false),
            field("show_contact", "Show contact details", Toggle, false),
            field("map_zoom", "Map zoom", Number { min: 1, max: 20 }, false),
        ],
        SectionType::Cta => vec![
            field("headline", "Headline", Text, true),
            field("description", "Description", LongText, false),
            field("button_label", "Button label", Text, true),
            field("button_link", "Button link", Link, true),
            field("background_image", "Background image", Image, false),
        ],
    }
}
