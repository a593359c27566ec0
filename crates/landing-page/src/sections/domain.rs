use super::settings::SectionSettings;
use crate::merge::lenient;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_VARIANT: &str = "default";

/// The closed catalog of content blocks a landing page can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Hero,
    Services,
    Team,
    Gallery,
    Reviews,
    Location,
    Cta,
}

impl SectionType {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Hero,
            Self::Services,
            Self::Team,
            Self::Gallery,
            Self::Reviews,
            Self::Location,
            Self::Cta,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Services => "services",
            Self::Team => "team",
            Self::Gallery => "gallery",
            Self::Reviews => "reviews",
            Self::Location => "location",
            Self::Cta => "cta",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hero => "Hero",
            Self::Services => "Services",
            Self::Team => "Team",
            Self::Gallery => "Gallery",
            Self::Reviews => "Reviews",
            Self::Location => "Location & Hours",
            Self::Cta => "Call to Action",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type name is outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownType(pub String);

impl FromStr for SectionType {
    type Err = UnknownType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|candidate| candidate.as_str() == raw)
            .ok_or_else(|| UnknownType(raw.to_string()))
    }
}

/// Stable identifier of a section; the reorder and save diffing key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Payload of a section: typed for catalog members, raw for anything else.
///
/// Unknown types survive decoding so that composition can report them
/// instead of the whole document failing to load.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Typed(SectionSettings),
    Unknown { type_name: String, settings: Value },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSection", into = "RawSection")]
pub struct Section {
    id: SectionId,
    pub variant: String,
    pub order: i32,
    pub enabled: bool,
    pub title: Option<String>,
    pub body: SectionBody,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, settings: SectionSettings, order: i32) -> Self {
        Self {
            id: id.into(),
            variant: DEFAULT_VARIANT.to_string(),
            order,
            enabled: true,
            title: None,
            body: SectionBody::Typed(settings),
        }
    }

    /// A section whose type is not in the catalog, e.g. from a newer schema.
    pub fn unknown(
        id: impl Into<SectionId>,
        type_name: impl Into<String>,
        settings: Value,
        order: i32,
    ) -> Self {
        Self {
            id: id.into(),
            variant: DEFAULT_VARIANT.to_string(),
            order,
            enabled: true,
            title: None,
            body: SectionBody::Unknown {
                type_name: type_name.into(),
                settings,
            },
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn type_name(&self) -> &str {
        match &self.body {
            SectionBody::Typed(settings) => settings.section_type().as_str(),
            SectionBody::Unknown { type_name, .. } => type_name,
        }
    }

    pub fn section_type(&self) -> Option<SectionType> {
        match &self.body {
            SectionBody::Typed(settings) => Some(settings.section_type()),
            SectionBody::Unknown { .. } => None,
        }
    }

    pub fn settings(&self) -> Option<&SectionSettings> {
        match &self.body {
            SectionBody::Typed(settings) => Some(settings),
            SectionBody::Unknown { .. } => None,
        }
    }
}

fn default_variant() -> String {
    DEFAULT_VARIANT.to_string()
}

fn default_enabled() -> bool {
    true
}

fn variant_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient(deserializer)?.unwrap_or_else(default_variant))
}

fn enabled_or_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(lenient(deserializer)?.unwrap_or_else(default_enabled))
}

/// Integral numbers, floats (rounded) and numeric strings; anything else is 0.
fn order_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let order = match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.round() as i64)),
        Value::String(raw) => raw.trim().parse::<f64>().ok().map(|float| float.round() as i64),
        _ => None,
    };

    Ok(match order {
        Some(order) => order.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
        None => {
            warn!("unreadable stored section order, using 0");
            0
        }
    })
}

/// Persisted shape of a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSection {
    id: SectionId,
    #[serde(rename = "type")]
    section_type: String,
    #[serde(default = "default_variant", deserialize_with = "variant_or_default")]
    variant: String,
    #[serde(default, deserialize_with = "order_or_zero")]
    order: i32,
    #[serde(default = "default_enabled", deserialize_with = "enabled_or_true")]
    enabled: bool,
    #[serde(default)]
    settings: Value,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl From<RawSection> for Section {
    fn from(raw: RawSection) -> Self {
        let body = match raw.section_type.parse::<SectionType>() {
            Ok(section_type) => match SectionSettings::decode(section_type, raw.settings) {
                Ok(settings) => SectionBody::Typed(settings),
                Err(defaults) => {
                    warn!(
                        section_id = %raw.id,
                        %section_type,
                        "stored settings bundle unreadable, using defaults"
                    );
                    SectionBody::Typed(defaults)
                }
            },
            Err(UnknownType(type_name)) => SectionBody::Unknown {
                type_name,
                settings: raw.settings,
            },
        };

        Self {
            id: raw.id,
            variant: raw.variant,
            order: raw.order,
            enabled: raw.enabled,
            title: raw.title,
            body,
        }
    }
}

impl From<Section> for RawSection {
    fn from(section: Section) -> Self {
        let (section_type, settings) = match section.body {
            SectionBody::Typed(settings) => {
                (settings.section_type().as_str().to_string(), settings.to_value())
            }
            SectionBody::Unknown {
                type_name,
                settings,
            } => (type_name, settings),
        };

        Self {
            id: section.id,
            section_type,
            variant: section.variant,
            order: section.order,
            enabled: section.enabled,
            settings,
            title: section.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_type_names_round_trip() {
        for section_type in SectionType::ordered() {
            assert_eq!(section_type.as_str().parse::<SectionType>(), Ok(section_type));
        }
        assert_eq!(
            "pricing".parse::<SectionType>(),
            Err(UnknownType("pricing".to_string()))
        );
    }

    #[test]
    fn stored_section_fills_optional_fields() {
        let section: Section =
            serde_json::from_value(json!({ "id": "hero-1", "type": "hero" })).expect("decodes");
        assert_eq!(section.id().as_str(), "hero-1");
        assert_eq!(section.variant, DEFAULT_VARIANT);
        assert_eq!(section.order, 0);
        assert!(section.enabled);
        assert_eq!(section.section_type(), Some(SectionType::Hero));
    }

    #[test]
    fn unknown_type_is_preserved_verbatim() {
        let stored = json!({
            "id": "pricing-1",
            "type": "pricing",
            "variant": "table",
            "order": 4,
            "enabled": true,
            "settings": { "tiers": 3 }
        });
        let section: Section = serde_json::from_value(stored.clone()).expect("decodes");
        assert_eq!(section.section_type(), None);
        assert_eq!(section.type_name(), "pricing");

        let written = serde_json::to_value(&section).expect("encodes");
        assert_eq!(written, stored);
    }

    #[test]
    fn malformed_scalar_fields_fall_back_per_field() {
        let section: Section = serde_json::from_value(json!({
            "id": "hero",
            "type": "hero",
            "variant": null,
            "enabled": null,
            "order": "3",
            "title": 12
        }))
        .expect("decodes");
        assert_eq!(section.variant, DEFAULT_VARIANT);
        assert!(section.enabled);
        assert_eq!(section.order, 3);
        assert_eq!(section.title, None);

        let section: Section = serde_json::from_value(json!({
            "id": "cta",
            "type": "cta",
            "variant": { "name": "banner" },
            "enabled": "yes",
            "order": 2.6
        }))
        .expect("decodes");
        assert_eq!(section.variant, DEFAULT_VARIANT);
        assert!(section.enabled);
        assert_eq!(section.order, 3);

        let section: Section =
            serde_json::from_value(json!({ "id": "team", "type": "team", "order": [1] }))
                .expect("decodes");
        assert_eq!(section.order, 0);
    }

    #[test]
    fn section_requires_id_and_type() {
        assert!(serde_json::from_value::<Section>(json!({ "type": "hero" })).is_err());
        assert!(serde_json::from_value::<Section>(json!({ "id": "x" })).is_err());
    }

    #[test]
    fn written_section_uses_type_tag_and_flat_settings() {
        let section = Section::new("cta-1", SectionSettings::default_for(SectionType::Cta), 6)
            .with_variant("banner")
            .with_title("Book today");
        let value = serde_json::to_value(&section).expect("encodes");
        assert_eq!(value["type"], "cta");
        assert_eq!(value["variant"], "banner");
        assert_eq!(value["title"], "Book today");
        assert_eq!(value["settings"]["button_label"], "Book an appointment");
    }
}
