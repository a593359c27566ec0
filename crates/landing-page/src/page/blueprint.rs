use super::domain::{FooterSettings, PageConfiguration, SeoConfig};
use crate::sections::{
    CtaSettings, GallerySettings, HeroSettings, LocationSettings, ReviewsSettings, Section,
    SectionSettings, ServicesSettings, TeamSettings,
};
use crate::theme::{GlobalStyleTokens, HslColor, RadiusClass};
use serde::Serialize;

pub const DEFAULT_TEMPLATE_ID: &str = "classic";

/// A named starting page offered before any customization.
#[derive(Debug, Clone)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub config: PageConfiguration,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub section_types: Vec<&'static str>,
}

impl Template {
    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id,
            name: self.name,
            description: self.description,
            section_types: self
                .config
                .ordered_sections()
                .into_iter()
                .filter(|section| section.enabled)
                .filter_map(|section| section.section_type().map(|kind| kind.as_str()))
                .collect(),
        }
    }
}

#[derive(Debug)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    default_index: usize,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TemplateCatalog {
    pub fn standard() -> Self {
        Self {
            templates: vec![classic(), modern(), minimal()],
            default_index: 0,
        }
    }

    /// Switch the fallback template. Unknown ids leave the current default.
    pub fn with_default(mut self, template_id: &str) -> Self {
        if let Some(index) = self.templates.iter().position(|t| t.id == template_id) {
            self.default_index = index;
        }
        self
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, template_id: &str) -> Option<&Template> {
        self.templates
            .iter()
            .find(|template| template.id == template_id)
    }

    pub fn default_template(&self) -> &Template {
        &self.templates[self.default_index]
    }

    /// The template a stored document should be reconciled against.
    pub fn for_stored(&self, template_id: Option<&str>) -> &Template {
        template_id
            .and_then(|id| self.get(id))
            .unwrap_or_else(|| self.default_template())
    }

    pub fn summaries(&self) -> Vec<TemplateSummary> {
        self.templates.iter().map(Template::summary).collect()
    }
}

fn page(template_id: &str, sections: Vec<Section>, global_styles: GlobalStyleTokens) -> PageConfiguration {
    PageConfiguration {
        template_id: template_id.to_string(),
        sections,
        global_styles,
        seo: SeoConfig::default(),
        footer: FooterSettings::default(),
        updated_at: None,
    }
}

fn classic() -> Template {
    let sections = vec![
        Section::new("hero", SectionSettings::Hero(HeroSettings::default()), 0),
        Section::new(
            "services",
            SectionSettings::Services(ServicesSettings::default()),
            1,
        )
        .with_variant("grid"),
        Section::new("team", SectionSettings::Team(TeamSettings::default()), 2),
        Section::new(
            "reviews",
            SectionSettings::Reviews(ReviewsSettings::default()),
            3,
        ),
        Section::new(
            "gallery",
            SectionSettings::Gallery(GallerySettings::default()),
            4,
        )
        .disabled(),
        Section::new(
            "location",
            SectionSettings::Location(LocationSettings::default()),
            5,
        ),
        Section::new("cta", SectionSettings::Cta(CtaSettings::default()), 6),
    ];

    Template {
        id: "classic",
        name: "Classic",
        description: "Serif headings, warm accent and every section in the familiar order.",
        config: page("classic", sections, GlobalStyleTokens::default()),
    }
}

fn modern() -> Template {
    let sections = vec![
        Section::new(
            "hero",
            SectionSettings::Hero(HeroSettings {
                overlay_opacity: 60,
                ..HeroSettings::default()
            }),
            0,
        )
        .with_variant("split"),
        Section::new(
            "services",
            SectionSettings::Services(ServicesSettings {
                columns: 2,
                ..ServicesSettings::default()
            }),
            1,
        )
        .with_variant("cards"),
        Section::new(
            "gallery",
            SectionSettings::Gallery(GallerySettings::default()),
            2,
        )
        .with_variant("masonry"),
        Section::new("team", SectionSettings::Team(TeamSettings::default()), 3)
            .with_variant("carousel"),
        Section::new(
            "reviews",
            SectionSettings::Reviews(ReviewsSettings {
                autoplay: true,
                ..ReviewsSettings::default()
            }),
            4,
        )
        .with_variant("carousel"),
        Section::new(
            "location",
            SectionSettings::Location(LocationSettings::default()),
            5,
        )
        .with_variant("split"),
        Section::new("cta", SectionSettings::Cta(CtaSettings::default()), 6)
            .with_variant("banner"),
    ];

    let styles = GlobalStyleTokens {
        primary_color: HslColor::new(262, 83, 58),
        secondary_color: HslColor::new(220, 14, 96),
        accent_color: HslColor::new(173, 80, 40),
        heading_font: "Inter".to_string(),
        border_radius: RadiusClass::Lg,
        ..GlobalStyleTokens::default()
    };

    Template {
        id: "modern",
        name: "Modern",
        description: "Split hero, card layouts and a gallery up front.",
        config: page("modern", sections, styles),
    }
}

fn minimal() -> Template {
    let sections = vec![
        Section::new(
            "hero",
            SectionSettings::Hero(HeroSettings {
                subheadline: None,
                ..HeroSettings::default()
            }),
            0,
        )
        .with_variant("minimal"),
        Section::new(
            "services",
            SectionSettings::Services(ServicesSettings {
                columns: 1,
                show_duration: false,
                ..ServicesSettings::default()
            }),
            1,
        )
        .with_variant("list"),
        Section::new(
            "location",
            SectionSettings::Location(LocationSettings {
                show_map: false,
                ..LocationSettings::default()
            }),
            2,
        )
        .with_variant("compact"),
        Section::new("cta", SectionSettings::Cta(CtaSettings::default()), 3)
            .with_variant("minimal"),
    ];

    let styles = GlobalStyleTokens {
        primary_color: HslColor::new(0, 0, 9),
        secondary_color: HslColor::new(0, 0, 96),
        accent_color: HslColor::new(0, 0, 45),
        heading_font: "Inter".to_string(),
        border_radius: RadiusClass::None,
        ..GlobalStyleTokens::default()
    };

    Template {
        id: "minimal",
        name: "Minimal",
        description: "Monochrome palette with only the essentials.",
        config: page("minimal", sections, styles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SectionRegistry;

    #[test]
    fn every_template_uses_registered_variants() {
        let registry = SectionRegistry::standard();
        for template in TemplateCatalog::standard().templates() {
            assert_eq!(template.config.template_id, template.id);
            for section in &template.config.sections {
                let variant = registry
                    .validate_variant(section.type_name(), &section.variant)
                    .expect("registered type");
                assert_eq!(variant, section.variant, "{} in {}", section.id(), template.id);
            }
        }
    }

    #[test]
    fn template_orders_are_dense() {
        for template in TemplateCatalog::standard().templates() {
            let orders: Vec<i32> = template.config.sections.iter().map(|s| s.order).collect();
            let expected: Vec<i32> = (0..orders.len() as i32).collect();
            assert_eq!(orders, expected, "{}", template.id);
        }
    }

    #[test]
    fn unknown_stored_template_falls_back_to_default() {
        let catalog = TemplateCatalog::standard().with_default("modern");
        assert_eq!(catalog.for_stored(Some("retired")).id, "modern");
        assert_eq!(catalog.for_stored(None).id, "modern");
        assert_eq!(catalog.for_stored(Some("minimal")).id, "minimal");
        assert_eq!(
            TemplateCatalog::standard().with_default("nope").default_template().id,
            DEFAULT_TEMPLATE_ID
        );
    }

    #[test]
    fn summaries_skip_disabled_sections() {
        let catalog = TemplateCatalog::standard();
        let classic = catalog.get("classic").expect("classic").summary();
        assert!(!classic.section_types.contains(&"gallery"));
        assert_eq!(classic.section_types.first(), Some(&"hero"));
    }
}
