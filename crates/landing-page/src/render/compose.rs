use super::dispatch::{DataSource, DispatchTable};
use crate::page::{PageConfiguration, PageWarning};
use crate::sections::{SectionId, SectionRegistry, SectionSettings, SectionType};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// One section ready for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEntry {
    pub section_id: SectionId,
    pub section_type: SectionType,
    pub variant: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub settings: SectionSettings,
    pub component: &'static str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<DataSource, Value>,
    #[serde(skip)]
    data_sources: &'static [DataSource],
}

impl RenderEntry {
    pub fn data_sources(&self) -> &'static [DataSource] {
        self.data_sources
    }
}

/// Ordered, filtered, variant-resolved sections plus whatever was skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderPlan {
    pub entries: Vec<RenderEntry>,
    pub warnings: Vec<PageWarning>,
}

impl RenderPlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach provider payloads to every entry whose renderer asks for them.
    pub fn bind(mut self, providers: &DataProviders) -> Self {
        for entry in &mut self.entries {
            for source in entry.data_sources {
                if let Some(payload) = providers.get(*source) {
                    entry.data.insert(*source, payload.clone());
                }
            }
        }
        self
    }

    /// Prepend warnings raised before composition, e.g. while loading.
    pub fn with_leading_warnings(mut self, mut warnings: Vec<PageWarning>) -> Self {
        warnings.append(&mut self.warnings);
        self.warnings = warnings;
        self
    }
}

/// Opaque data lists keyed by source. Shapes are not validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataProviders {
    payloads: BTreeMap<DataSource, Value>,
}

impl DataProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: DataSource, payload: Value) {
        self.payloads.insert(source, payload);
    }

    pub fn with(mut self, source: DataSource, payload: Value) -> Self {
        self.insert(source, payload);
        self
    }

    pub fn get(&self, source: DataSource) -> Option<&Value> {
        self.payloads.get(&source)
    }
}

/// Build the render plan for `config`.
///
/// Disabled sections are dropped, the rest are stably sorted by `order`
/// and their variants resolved. Sections of unknown type or without a
/// renderer are skipped with a warning; the rest of the page still renders.
pub fn compose(
    config: &PageConfiguration,
    registry: &SectionRegistry,
    dispatch: &DispatchTable,
) -> RenderPlan {
    let mut visible: Vec<_> = config
        .sections
        .iter()
        .filter(|section| section.enabled)
        .collect();
    visible.sort_by_key(|section| section.order);

    let mut plan = RenderPlan::default();
    for section in visible {
        let settings = match registry.validate_section(section) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(section_id = %section.id(), %err, "skipping section of unknown type");
                plan.warnings.push(PageWarning::UnknownSectionType {
                    section_id: section.id().clone(),
                    type_name: section.type_name().to_string(),
                });
                continue;
            }
        };
        let section_type = settings.section_type();

        let handle = match dispatch.renderer_for(section_type) {
            Ok(handle) => handle,
            Err(err) => {
                warn!(section_id = %section.id(), %section_type, %err, "skipping section without renderer");
                plan.warnings.push(PageWarning::MissingRenderer {
                    section_id: section.id().clone(),
                    section_type,
                });
                continue;
            }
        };

        plan.entries.push(RenderEntry {
            section_id: section.id().clone(),
            section_type,
            variant: registry.variant_for(section_type, &section.variant),
            title: section.title.clone(),
            settings: settings.clone(),
            component: handle.component,
            data: BTreeMap::new(),
            data_sources: handle.data_sources,
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::TemplateCatalog;
    use crate::sections::{HeroSettings, Section, ServicesSettings};
    use serde_json::json;

    fn config(sections: Vec<Section>) -> PageConfiguration {
        PageConfiguration {
            sections,
            ..TemplateCatalog::standard().default_template().config.clone()
        }
    }

    fn hero(id: &str, order: i32) -> Section {
        Section::new(id, SectionSettings::Hero(HeroSettings::default()), order)
    }

    fn ids(plan: &RenderPlan) -> Vec<&str> {
        plan.entries.iter().map(|entry| entry.section_id.as_str()).collect()
    }

    #[test]
    fn disabled_sections_are_filtered_and_order_ties_keep_position() {
        let plan = compose(
            &config(vec![
                hero("b", 1),
                hero("a", 1),
                hero("hidden", 0).disabled(),
                hero("first", 0),
            ]),
            &SectionRegistry::standard(),
            &DispatchTable::standard(),
        );

        assert_eq!(ids(&plan), ["first", "b", "a"]);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn variants_resolve_with_fallback() {
        let plan = compose(
            &config(vec![
                hero("hero", 0).with_variant("split"),
                Section::new(
                    "services",
                    SectionSettings::Services(ServicesSettings::default()),
                    1,
                )
                .with_variant("hologram"),
            ]),
            &SectionRegistry::standard(),
            &DispatchTable::standard(),
        );

        let variants: Vec<&str> = plan.entries.iter().map(|entry| entry.variant).collect();
        assert_eq!(variants, ["split", "default"]);
    }

    #[test]
    fn untyped_sections_are_skipped_and_typed_settings_reach_the_plan() {
        let settings = SectionSettings::Hero(HeroSettings {
            headline: "Fresh cuts daily".to_string(),
            ..HeroSettings::default()
        });
        let plan = compose(
            &config(vec![
                Section::new("hero", settings.clone(), 0),
                Section::unknown("promo", "countdown", json!({ "ends_at": "friday" }), 1),
            ]),
            &SectionRegistry::standard(),
            &DispatchTable::standard(),
        );

        assert_eq!(ids(&plan), ["hero"]);
        assert_eq!(plan.entries[0].settings, settings);
        assert_eq!(
            plan.warnings,
            vec![PageWarning::UnknownSectionType {
                section_id: SectionId::new("promo"),
                type_name: "countdown".to_string(),
            }]
        );
    }

    #[test]
    fn missing_renderer_skips_only_that_section() {
        let plan = compose(
            &config(vec![
                hero("hero", 0),
                Section::new(
                    "services",
                    SectionSettings::Services(ServicesSettings::default()),
                    1,
                ),
            ]),
            &SectionRegistry::standard(),
            &DispatchTable::standard().without(SectionType::Services),
        );

        assert_eq!(ids(&plan), ["hero"]);
        assert_eq!(
            plan.warnings,
            vec![PageWarning::MissingRenderer {
                section_id: SectionId::new("services"),
                section_type: SectionType::Services,
            }]
        );
    }

    #[test]
    fn bind_attaches_declared_sources_only() {
        let plan = compose(
            &config(vec![
                hero("hero", 0),
                Section::new(
                    "services",
                    SectionSettings::Services(ServicesSettings::default()),
                    1,
                ),
            ]),
            &SectionRegistry::standard(),
            &DispatchTable::standard(),
        );
        let providers = DataProviders::new()
            .with(DataSource::Services, json!([{ "name": "Cut", "price": 30 }]))
            .with(DataSource::Reviews, json!([]));

        let bound = plan.bind(&providers);
        assert!(bound.entries[0].data.is_empty());
        assert_eq!(
            bound.entries[1].data.get(&DataSource::Services),
            Some(&json!([{ "name": "Cut", "price": 30 }]))
        );
        assert!(!bound.entries[1].data.contains_key(&DataSource::Reviews));
    }
}
