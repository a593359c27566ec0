//! Pure edit operations over a page configuration.
//!
//! Every operation takes the current configuration by reference and returns
//! a new one; the input is never mutated.

use super::blueprint::Template;
use super::domain::{PageConfiguration, PartialFooter, PartialSeo};
use super::loader::prepare_for_save;
use crate::merge::Overlay;
use crate::sections::{
    RegistryError, Section, SectionBody, SectionId, SectionRegistry, SectionSettings, SectionType,
};
use crate::theme::PartialStyleTokens;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("section '{0}' not found")]
    SectionNotFound(SectionId),
    #[error("settings for section '{section_id}' do not fit section type '{expected}'")]
    SettingsTypeMismatch {
        section_id: SectionId,
        expected: String,
    },
    #[error("section '{section_id}' has unregistered type '{type_name}'")]
    UnknownSectionType {
        section_id: SectionId,
        type_name: String,
    },
}

/// Where a moved section lands relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Before,
    After,
}

impl Placement {
    /// Placement matching a drag from one list index onto another: dragging
    /// down lands after the target, dragging up lands before it.
    pub const fn for_drag(from_index: usize, to_index: usize) -> Self {
        if from_index < to_index {
            Self::After
        } else {
            Self::Before
        }
    }
}

/// Sort by `order` (ties by position) and renumber `0..n-1`.
pub fn normalize_order(mut sections: Vec<Section>) -> Vec<Section> {
    sections.sort_by_key(|section| section.order);
    for (index, section) in sections.iter_mut().enumerate() {
        section.order = index as i32;
    }
    sections
}

/// Move `from` next to `to` and renumber every section densely.
pub fn move_section(
    sections: &[Section],
    from: &SectionId,
    to: &SectionId,
    placement: Placement,
) -> Result<Vec<Section>, EditError> {
    let mut ordered = normalize_order(sections.to_vec());
    let from_index = position(&ordered, from)?;
    position(&ordered, to)?;

    if from == to {
        return Ok(ordered);
    }

    let moved = ordered.remove(from_index);
    let target_index = position(&ordered, to)?;
    let insert_at = match placement {
        Placement::Before => target_index,
        Placement::After => target_index + 1,
    };
    ordered.insert(insert_at, moved);

    Ok(normalize_order_in_place(ordered))
}

pub fn reorder(
    config: &PageConfiguration,
    from: &SectionId,
    to: &SectionId,
    placement: Placement,
) -> Result<PageConfiguration, EditError> {
    Ok(PageConfiguration {
        sections: move_section(&config.sections, from, to, placement)?,
        ..config.clone()
    })
}

pub fn set_enabled(
    config: &PageConfiguration,
    section_id: &SectionId,
    enabled: bool,
) -> Result<PageConfiguration, EditError> {
    edit_section(config, section_id, |section| {
        section.enabled = enabled;
        Ok(())
    })
}

/// Set a section's variant, coercing unknown variants to `default`.
pub fn set_variant(
    config: &PageConfiguration,
    registry: &SectionRegistry,
    section_id: &SectionId,
    variant: &str,
) -> Result<PageConfiguration, EditError> {
    edit_section(config, section_id, |section| {
        let resolved = registry
            .validate_variant(section.type_name(), variant)
            .map_err(|err| unknown_type(section.id(), err))?;
        section.variant = resolved.to_string();
        Ok(())
    })
}

pub fn update_settings(
    config: &PageConfiguration,
    section_id: &SectionId,
    settings: SectionSettings,
) -> Result<PageConfiguration, EditError> {
    edit_section(config, section_id, |section| {
        match section.section_type() {
            Some(section_type) if section_type == settings.section_type() => {
                section.body = SectionBody::Typed(settings);
                Ok(())
            }
            _ => Err(EditError::SettingsTypeMismatch {
                section_id: section.id().clone(),
                expected: section.type_name().to_string(),
            }),
        }
    })
}

/// Replace a section's settings from a raw bundle, decoded against the
/// section's own type.
pub fn update_settings_raw(
    config: &PageConfiguration,
    section_id: &SectionId,
    raw: Value,
) -> Result<PageConfiguration, EditError> {
    let section = config
        .section(section_id)
        .ok_or_else(|| EditError::SectionNotFound(section_id.clone()))?;
    let section_type = section.section_type().ok_or_else(|| EditError::UnknownSectionType {
        section_id: section_id.clone(),
        type_name: section.type_name().to_string(),
    })?;
    let settings = SectionSettings::decode(section_type, raw).map_err(|_| {
        EditError::SettingsTypeMismatch {
            section_id: section_id.clone(),
            expected: section_type.as_str().to_string(),
        }
    })?;
    update_settings(config, section_id, settings)
}

/// Append a new section with registry defaults and a fresh id.
pub fn add_section(
    config: &PageConfiguration,
    registry: &SectionRegistry,
    section_type: SectionType,
    variant: Option<&str>,
) -> PageConfiguration {
    let descriptor = registry.descriptor_for(section_type);
    let mut sections = normalize_order(config.sections.clone());
    let id = fresh_id(&sections, section_type);
    let variant = registry.variant_for(section_type, variant.unwrap_or_default());
    sections.push(
        Section::new(id, descriptor.default_settings.clone(), sections.len() as i32)
            .with_variant(variant),
    );

    PageConfiguration {
        sections,
        ..config.clone()
    }
}

pub fn remove_section(
    config: &PageConfiguration,
    section_id: &SectionId,
) -> Result<PageConfiguration, EditError> {
    let index = position(&config.sections, section_id)?;
    let mut sections = config.sections.clone();
    sections.remove(index);

    Ok(PageConfiguration {
        sections: normalize_order(sections),
        ..config.clone()
    })
}

pub fn update_styles(config: &PageConfiguration, styles: &PartialStyleTokens) -> PageConfiguration {
    let mut updated = config.clone();
    styles.overlay_onto(&mut updated.global_styles);
    updated
}

pub fn update_seo(config: &PageConfiguration, seo: &PartialSeo) -> PageConfiguration {
    let mut updated = config.clone();
    seo.overlay_onto(&mut updated.seo);
    updated
}

pub fn update_footer(config: &PageConfiguration, footer: &PartialFooter) -> PageConfiguration {
    let mut updated = config.clone();
    footer.overlay_onto(&mut updated.footer);
    updated
}

/// Start over from `template`, keeping the tenant's SEO and footer content.
pub fn apply_template(config: &PageConfiguration, template: &Template) -> PageConfiguration {
    PageConfiguration {
        template_id: template.id.to_string(),
        sections: template.config.sections.clone(),
        global_styles: template.config.global_styles.clone(),
        ..config.clone()
    }
}

/// Edit commands the builder can issue, one field group at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    Reorder {
        from: SectionId,
        to: SectionId,
        placement: Placement,
    },
    SetEnabled {
        section_id: SectionId,
        enabled: bool,
    },
    SetVariant {
        section_id: SectionId,
        variant: String,
    },
    UpdateSettings {
        section_id: SectionId,
        settings: Value,
    },
    AddSection {
        section_type: SectionType,
        #[serde(default)]
        variant: Option<String>,
    },
    RemoveSection {
        section_id: SectionId,
    },
    UpdateStyles {
        styles: PartialStyleTokens,
    },
    UpdateSeo {
        seo: PartialSeo,
    },
    UpdateFooter {
        footer: PartialFooter,
    },
}

impl Edit {
    pub fn apply(
        &self,
        config: &PageConfiguration,
        registry: &SectionRegistry,
    ) -> Result<PageConfiguration, EditError> {
        match self {
            Self::Reorder {
                from,
                to,
                placement,
            } => reorder(config, from, to, *placement),
            Self::SetEnabled {
                section_id,
                enabled,
            } => set_enabled(config, section_id, *enabled),
            Self::SetVariant {
                section_id,
                variant,
            } => set_variant(config, registry, section_id, variant),
            Self::UpdateSettings {
                section_id,
                settings,
            } => update_settings_raw(config, section_id, settings.clone()),
            Self::AddSection {
                section_type,
                variant,
            } => Ok(add_section(
                config,
                registry,
                *section_type,
                variant.as_deref(),
            )),
            Self::RemoveSection { section_id } => remove_section(config, section_id),
            Self::UpdateStyles { styles } => Ok(update_styles(config, styles)),
            Self::UpdateSeo { seo } => Ok(update_seo(config, seo)),
            Self::UpdateFooter { footer } => Ok(update_footer(config, footer)),
        }
    }
}

/// Working copy of a page held by the builder between saves.
#[derive(Debug, Clone)]
pub struct PageBuilder {
    registry: SectionRegistry,
    working: PageConfiguration,
    saved: PageConfiguration,
}

impl PageBuilder {
    pub fn new(config: PageConfiguration) -> Self {
        Self::with_registry(SectionRegistry::standard(), config)
    }

    pub fn with_registry(registry: SectionRegistry, config: PageConfiguration) -> Self {
        Self {
            registry,
            working: config.clone(),
            saved: config,
        }
    }

    pub fn config(&self) -> &PageConfiguration {
        &self.working
    }

    pub fn is_dirty(&self) -> bool {
        self.working != self.saved
    }

    /// Apply one edit. A failed edit leaves the working copy untouched.
    pub fn apply(&mut self, edit: &Edit) -> Result<&PageConfiguration, EditError> {
        self.working = edit.apply(&self.working, &self.registry)?;
        Ok(&self.working)
    }

    pub fn apply_template(&mut self, template: &Template) -> &PageConfiguration {
        self.working = apply_template(&self.working, template);
        &self.working
    }

    pub fn prepare_save(&self, now: DateTime<Utc>) -> PageConfiguration {
        prepare_for_save(&self.working, now)
    }

    /// Record `persisted` as both the saved snapshot and the working copy.
    pub fn mark_saved(&mut self, persisted: PageConfiguration) {
        self.working = persisted.clone();
        self.saved = persisted;
    }

    pub fn discard(&mut self) {
        self.working = self.saved.clone();
    }
}

fn position(sections: &[Section], section_id: &SectionId) -> Result<usize, EditError> {
    sections
        .iter()
        .position(|section| section.id() == section_id)
        .ok_or_else(|| EditError::SectionNotFound(section_id.clone()))
}

fn normalize_order_in_place(mut sections: Vec<Section>) -> Vec<Section> {
    for (index, section) in sections.iter_mut().enumerate() {
        section.order = index as i32;
    }
    sections
}

fn edit_section<F>(
    config: &PageConfiguration,
    section_id: &SectionId,
    edit: F,
) -> Result<PageConfiguration, EditError>
where
    F: FnOnce(&mut Section) -> Result<(), EditError>,
{
    let index = position(&config.sections, section_id)?;
    let mut updated = config.clone();
    edit(&mut updated.sections[index])?;
    Ok(updated)
}

fn fresh_id(sections: &[Section], section_type: SectionType) -> SectionId {
    let base = section_type.as_str();
    if sections.iter().all(|section| section.id().as_str() != base) {
        return SectionId::new(base);
    }
    (2..)
        .map(|n| SectionId::new(format!("{base}-{n}")))
        .find(|candidate| sections.iter().all(|section| section.id() != candidate))
        .unwrap_or_else(|| SectionId::new(format!("{base}-{}", sections.len() + 1)))
}

fn unknown_type(section_id: &SectionId, err: RegistryError) -> EditError {
    let RegistryError::NotFound(type_name) = err;
    EditError::UnknownSectionType {
        section_id: section_id.clone(),
        type_name,
    }
}
