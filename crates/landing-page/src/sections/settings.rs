use super::domain::SectionType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Image reference produced by the asset uploader and consumed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSettings {
    pub headline: String,
    pub subheadline: Option<String>,
    pub background_image: Option<ImageRef>,
    pub cta_label: String,
    pub cta_link: String,
    pub show_booking_button: bool,
    pub overlay_opacity: u8,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            headline: "Welcome".to_string(),
            subheadline: Some("Book your next appointment in seconds.".to_string()),
            background_image: None,
            cta_label: "Book now".to_string(),
            cta_link: "#booking".to_string(),
            show_booking_button: true,
            overlay_opacity: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesSettings {
    pub heading: String,
    pub description: Option<String>,
    pub show_prices: bool,
    pub show_duration: bool,
    pub max_items: Option<u32>,
    pub columns: u8,
}

impl Default for ServicesSettings {
    fn default() -> Self {
        Self {
            heading: "Our services".to_string(),
            description: None,
            show_prices: true,
            show_duration: true,
            max_items: None,
            columns: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSettings {
    pub heading: String,
    pub description: Option<String>,
    pub show_bio: bool,
    pub show_specialties: bool,
    pub max_members: Option<u32>,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            heading: "Meet the team".to_string(),
            description: None,
            show_bio: true,
            show_specialties: true,
            max_members: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    pub heading: String,
    pub images: Vec<ImageRef>,
    pub columns: u8,
    pub enable_lightbox: bool,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            heading: "Gallery".to_string(),
            images: Vec::new(),
            columns: 3,
            enable_lightbox: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewsSettings {
    pub heading: String,
    pub min_rating: u8,
    pub max_reviews: u32,
    pub show_average: bool,
    pub autoplay: bool,
}

impl Default for ReviewsSettings {
    fn default() -> Self {
        Self {
            heading: "What our clients say".to_string(),
            min_rating: 4,
            max_reviews: 6,
            show_average: true,
            autoplay: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    pub heading: String,
    pub address: Option<String>,
    pub show_map: bool,
    pub show_hours: bool,
    pub show_contact: bool,
    pub map_zoom: u8,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            heading: "Visit us".to_string(),
            address: None,
            show_map: true,
            show_hours: true,
            show_contact: true,
            map_zoom: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaSettings {
    pub headline: String,
    pub description: Option<String>,
    pub button_label: String,
    pub button_link: String,
    pub background_image: Option<ImageRef>,
}

impl Default for CtaSettings {
    fn default() -> Self {
        Self {
            headline: "Ready for your next visit?".to_string(),
            description: None,
            button_label: "Book an appointment".to_string(),
            button_link: "#booking".to_string(),
            background_image: None,
        }
    }
}

/// Settings bundle tagged by the section type it belongs to.
///
/// The shape depends on the type only; every variant of a type shares it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionSettings {
    Hero(HeroSettings),
    Services(ServicesSettings),
    Team(TeamSettings),
    Gallery(GallerySettings),
    Reviews(ReviewsSettings),
    Location(LocationSettings),
    Cta(CtaSettings),
}

impl SectionSettings {
    pub fn default_for(section_type: SectionType) -> Self {
        match section_type {
            SectionType::Hero => Self::Hero(HeroSettings::default()),
            SectionType::Services => Self::Services(ServicesSettings::default()),
            SectionType::Team => Self::Team(TeamSettings::default()),
            SectionType::Gallery => Self::Gallery(GallerySettings::default()),
            SectionType::Reviews => Self::Reviews(ReviewsSettings::default()),
            SectionType::Location => Self::Location(LocationSettings::default()),
            SectionType::Cta => Self::Cta(CtaSettings::default()),
        }
    }

    pub const fn section_type(&self) -> SectionType {
        match self {
            Self::Hero(_) => SectionType::Hero,
            Self::Services(_) => SectionType::Services,
            Self::Team(_) => SectionType::Team,
            Self::Gallery(_) => SectionType::Gallery,
            Self::Reviews(_) => SectionType::Reviews,
            Self::Location(_) => SectionType::Location,
            Self::Cta(_) => SectionType::Cta,
        }
    }

    /// Decode a stored bundle for `section_type`.
    ///
    /// Missing fields take their defaults. Returns `Err` carrying the
    /// defaults when the bundle is not decodable at all.
    pub fn decode(section_type: SectionType, raw: Value) -> Result<Self, Self> {
        let raw = match raw {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        let decoded = match section_type {
            SectionType::Hero => serde_json::from_value(raw).map(Self::Hero),
            SectionType::Services => serde_json::from_value(raw).map(Self::Services),
            SectionType::Team => serde_json::from_value(raw).map(Self::Team),
            SectionType::Gallery => serde_json::from_value(raw).map(Self::Gallery),
            SectionType::Reviews => serde_json::from_value(raw).map(Self::Reviews),
            SectionType::Location => serde_json::from_value(raw).map(Self::Location),
            SectionType::Cta => serde_json::from_value(raw).map(Self::Cta),
        };

        decoded.map_err(|_| Self::default_for(section_type))
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
