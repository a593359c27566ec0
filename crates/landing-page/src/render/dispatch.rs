use crate::sections::SectionType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// External data feed a renderer consumes. Payloads stay opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Services,
    Staff,
    Reviews,
    BusinessHours,
    Contact,
}

impl DataSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Staff => "staff",
            Self::Reviews => "reviews",
            Self::BusinessHours => "business_hours",
            Self::Contact => "contact",
        }
    }
}

/// Presentation component for one section type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RendererHandle {
    pub section_type: SectionType,
    pub component: &'static str,
    pub data_sources: &'static [DataSource],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("no renderer registered for section type '{0}'")]
    UnknownSectionType(String),
}

/// Closed mapping from section type to renderer.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    handles: BTreeMap<SectionType, RendererHandle>,
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl DispatchTable {
    pub fn standard() -> Self {
        let handles = SectionType::ordered()
            .into_iter()
            .map(|section_type| (section_type, standard_handle(section_type)))
            .collect();
        Self { handles }
    }

    /// Table with `section_type` unregistered, as after a renderer is retired.
    pub fn without(mut self, section_type: SectionType) -> Self {
        self.handles.remove(&section_type);
        self
    }

    pub fn renderer_for(&self, section_type: SectionType) -> Result<&RendererHandle, DispatchError> {
        self.handles
            .get(&section_type)
            .ok_or_else(|| DispatchError::UnknownSectionType(section_type.as_str().to_string()))
    }

    pub fn resolve(&self, type_name: &str) -> Result<&RendererHandle, DispatchError> {
        let section_type = type_name
            .parse::<SectionType>()
            .map_err(|err| DispatchError::UnknownSectionType(err.0))?;
        self.renderer_for(section_type)
    }

    pub fn handles(&self) -> impl Iterator<Item = &RendererHandle> {
        self.handles.values()
    }
}

fn standard_handle(section_type: SectionType) -> RendererHandle {
    let (component, data_sources): (&'static str, &'static [DataSource]) = match section_type {
        SectionType::Hero => ("HeroSection", &[]),
        SectionType::Services => ("ServicesSection", &[DataSource::Services]),
        SectionType::Team => ("TeamSection", &[DataSource::Staff]),
        SectionType::Gallery => ("GallerySection", &[]),
        SectionType::Reviews => ("ReviewsSection", &[DataSource::Reviews]),
        SectionType::Location => (
            "LocationSection",
            &[DataSource::BusinessHours, DataSource::Contact],
        ),
        SectionType::Cta => ("CtaSection", &[]),
    };

    RendererHandle {
        section_type,
        component,
        data_sources,
    }
}
