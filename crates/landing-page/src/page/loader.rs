use super::blueprint::TemplateCatalog;
use super::domain::{PageConfiguration, PartialPageConfiguration};
use super::editor::normalize_order;
use crate::merge::{overlay_fields, Overlay};
use crate::sections::{Section, SectionId, SectionRegistry, SectionType};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Non-fatal problem found while loading or composing a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageWarning {
    UnknownSectionType {
        section_id: SectionId,
        type_name: String,
    },
    MissingRenderer {
        section_id: SectionId,
        section_type: SectionType,
    },
    DuplicateSectionId {
        section_id: SectionId,
        type_name: String,
    },
}

impl PageWarning {
    pub fn section_id(&self) -> &SectionId {
        match self {
            Self::UnknownSectionType { section_id, .. }
            | Self::MissingRenderer { section_id, .. }
            | Self::DuplicateSectionId { section_id, .. } => section_id,
        }
    }
}

impl fmt::Display for PageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSectionType {
                section_id,
                type_name,
            } => write!(
                f,
                "section '{section_id}' has unknown type '{type_name}' and was skipped"
            ),
            Self::MissingRenderer {
                section_id,
                section_type,
            } => write!(
                f,
                "no renderer registered for '{section_type}', section '{section_id}' was skipped"
            ),
            Self::DuplicateSectionId {
                section_id,
                type_name,
            } => write!(
                f,
                "a second section with id '{section_id}' (type '{type_name}') was dropped"
            ),
        }
    }
}

/// A reconciled configuration plus everything that had to be dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub config: PageConfiguration,
    pub warnings: Vec<PageWarning>,
}

/// Reconcile a stored document against current template defaults.
///
/// Object-valued fields are merged per nested field with the stored value
/// winning. A non-empty stored section list replaces the template's list
/// wholesale. Sections of unknown type and repeats of an id already seen
/// are dropped with a warning; unrecognised variants are coerced to
/// `default`.
pub fn load(
    registry: &SectionRegistry,
    template: &PageConfiguration,
    stored: Option<&PartialPageConfiguration>,
) -> LoadOutcome {
    let Some(stored) = stored else {
        return LoadOutcome {
            config: template.clone(),
            warnings: Vec::new(),
        };
    };

    let mut config = template.clone();
    stored.overlay_onto(&mut config);

    let mut warnings = Vec::new();
    let stored_sections = stored
        .sections
        .as_deref()
        .map(|sections| validated_sections(registry, sections, &mut warnings))
        .unwrap_or_default();

    config.sections = if stored_sections.is_empty() {
        template.sections.clone()
    } else {
        stored_sections
    };

    LoadOutcome { config, warnings }
}

/// Decode an opaque stored document and reconcile it against the template
/// it names, or the catalog default.
pub fn load_document(
    registry: &SectionRegistry,
    catalog: &TemplateCatalog,
    document: Option<Value>,
) -> LoadOutcome {
    let stored = document.and_then(PartialPageConfiguration::from_document);
    let template = catalog.for_stored(stored.as_ref().and_then(|s| s.template_id.as_deref()));
    load(registry, &template.config, stored.as_ref())
}

/// Copy of `config` ready to persist: dense `order` values and a fresh
/// `updated_at`.
pub fn prepare_for_save(config: &PageConfiguration, now: DateTime<Utc>) -> PageConfiguration {
    PageConfiguration {
        sections: normalize_order(config.sections.clone()),
        updated_at: Some(now),
        ..config.clone()
    }
}

impl Overlay<PageConfiguration> for PartialPageConfiguration {
    /// Scalar and object fields only; sections are reconciled by [`load`].
    fn overlay_onto(&self, base: &mut PageConfiguration) {
        overlay_fields!(set self => base; template_id);
        overlay_fields!(wrap self => base; updated_at);
        self.global_styles.overlay_onto(&mut base.global_styles);
        self.seo.overlay_onto(&mut base.seo);
        self.footer.overlay_onto(&mut base.footer);
    }
}

fn validated_sections(
    registry: &SectionRegistry,
    sections: &[Section],
    warnings: &mut Vec<PageWarning>,
) -> Vec<Section> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(sections.len());

    for section in sections {
        let section_type = match registry.validate_section(section) {
            Ok(settings) => settings.section_type(),
            Err(err) => {
                warn!(section_id = %section.id(), %err, "dropping stored section");
                warnings.push(PageWarning::UnknownSectionType {
                    section_id: section.id().clone(),
                    type_name: section.type_name().to_string(),
                });
                continue;
            }
        };

        if !seen.insert(section.id().clone()) {
            warn!(section_id = %section.id(), %section_type, "dropping section with duplicate id");
            warnings.push(PageWarning::DuplicateSectionId {
                section_id: section.id().clone(),
                type_name: section.type_name().to_string(),
            });
            continue;
        }

        let mut section = section.clone();
        section.variant = registry
            .variant_for(section_type, &section.variant)
            .to_string();
        kept.push(section);
    }

    kept
}
