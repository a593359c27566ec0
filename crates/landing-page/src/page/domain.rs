use crate::merge::{lenient, overlay_fields, Overlay};
use crate::sections::{ImageRef, Section, SectionId};
use crate::theme::{GlobalStyleTokens, PartialStyleTokens};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoConfig {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub og_image: Option<ImageRef>,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            title: "Book your appointment".to_string(),
            description: "Services, team, reviews and opening hours in one place.".to_string(),
            keywords: Vec::new(),
            og_image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterSettings {
    pub show_social_links: bool,
    pub show_hours: bool,
    pub show_powered_by: bool,
    pub copyright_text: Option<String>,
    pub social_links: Vec<SocialLink>,
}

impl Default for FooterSettings {
    fn default() -> Self {
        Self {
            show_social_links: true,
            show_hours: true,
            show_powered_by: true,
            copyright_text: None,
            social_links: Vec::new(),
        }
    }
}

/// The persisted landing page document of one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfiguration {
    pub template_id: String,
    pub sections: Vec<Section>,
    pub global_styles: GlobalStyleTokens,
    pub seo: SeoConfig,
    pub footer: FooterSettings,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PageConfiguration {
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| section.id() == id)
    }

    /// Sections by ascending `order`, ties kept in array order.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut ordered: Vec<&Section> = self.sections.iter().collect();
        ordered.sort_by_key(|section| section.order);
        ordered
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSeo {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub og_image: Option<ImageRef>,
}

impl Overlay<SeoConfig> for PartialSeo {
    fn overlay_onto(&self, base: &mut SeoConfig) {
        overlay_fields!(set self => base; title, description, keywords);
        overlay_fields!(wrap self => base; og_image);
    }
}

impl From<&SeoConfig> for PartialSeo {
    fn from(seo: &SeoConfig) -> Self {
        Self {
            title: Some(seo.title.clone()),
            description: Some(seo.description.clone()),
            keywords: Some(seo.keywords.clone()),
            og_image: seo.og_image.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialFooter {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub show_social_links: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub show_hours: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub show_powered_by: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<SocialLink>>,
}

impl Overlay<FooterSettings> for PartialFooter {
    fn overlay_onto(&self, base: &mut FooterSettings) {
        overlay_fields!(set self => base; show_social_links, show_hours, show_powered_by, social_links);
        overlay_fields!(wrap self => base; copyright_text);
    }
}

impl From<&FooterSettings> for PartialFooter {
    fn from(footer: &FooterSettings) -> Self {
        Self {
            show_social_links: Some(footer.show_social_links),
            show_hours: Some(footer.show_hours),
            show_powered_by: Some(footer.show_powered_by),
            copyright_text: footer.copyright_text.clone(),
            social_links: Some(footer.social_links.clone()),
        }
    }
}

/// A stored page document of unknown age.
///
/// Every field is optional and decoded on its own: a malformed field is
/// treated as absent rather than failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialPageConfiguration {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_sections",
        skip_serializing_if = "Option::is_none"
    )]
    pub sections: Option<Vec<Section>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub global_styles: Option<PartialStyleTokens>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub seo: Option<PartialSeo>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub footer: Option<PartialFooter>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PartialPageConfiguration {
    /// Decode an opaque stored document. Anything but a JSON object counts
    /// as no document.
    pub fn from_document(document: Value) -> Option<Self> {
        if !document.is_object() {
            warn!(kind = json_kind(&document), "stored page document is not an object");
            return None;
        }

        match serde_json::from_value(document) {
            Ok(partial) => Some(partial),
            Err(err) => {
                warn!(%err, "stored page document unreadable");
                None
            }
        }
    }
}

impl From<&PageConfiguration> for PartialPageConfiguration {
    fn from(config: &PageConfiguration) -> Self {
        Self {
            template_id: Some(config.template_id.clone()),
            sections: Some(config.sections.clone()),
            global_styles: Some(PartialStyleTokens::from(&config.global_styles)),
            seo: Some(PartialSeo::from(&config.seo)),
            footer: Some(PartialFooter::from(&config.footer)),
            updated_at: config.updated_at,
        }
    }
}

fn lenient_sections<'de, D>(deserializer: D) -> Result<Option<Vec<Section>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    let sections = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value::<Section>(entry) {
            Ok(section) => Some(section),
            Err(err) => {
                warn!(position, %err, "skipping malformed stored section");
                None
            }
        })
        .collect();

    Ok(Some(sections))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_documents_are_absent() {
        assert!(PartialPageConfiguration::from_document(json!(null)).is_none());
        assert!(PartialPageConfiguration::from_document(json!([1, 2])).is_none());
        assert!(PartialPageConfiguration::from_document(json!("page")).is_none());
    }

    #[test]
    fn malformed_fields_decode_as_absent() {
        let partial = PartialPageConfiguration::from_document(json!({
            "template_id": 42,
            "global_styles": { "primary_color": "#ff0000", "border_radius": "huge" },
            "seo": "broken",
            "footer": { "show_hours": false },
            "updated_at": "yesterday"
        }))
        .expect("object decodes");

        assert!(partial.template_id.is_none());
        assert!(partial.seo.is_none());
        assert!(partial.updated_at.is_none());
        let styles = partial.global_styles.expect("styles present");
        assert_eq!(styles.primary_color.as_deref(), Some("#ff0000"));
        assert_eq!(styles.border_radius, Some(crate::theme::RadiusClass::Md));
        assert_eq!(partial.footer.expect("footer").show_hours, Some(false));
    }

    #[test]
    fn malformed_sections_are_skipped_individually() {
        let partial = PartialPageConfiguration::from_document(json!({
            "sections": [
                { "id": "hero-1", "type": "hero", "order": 0 },
                { "type": "services" },
                "garbage",
                { "id": "cta-1", "type": "cta", "order": 1 }
            ]
        }))
        .expect("object decodes");

        let sections = partial.sections.expect("sections present");
        let ids: Vec<&str> = sections.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, ["hero-1", "cta-1"]);
    }

    #[test]
    fn non_array_sections_are_absent() {
        let partial =
            PartialPageConfiguration::from_document(json!({ "sections": { "hero": true } }))
                .expect("object decodes");
        assert!(partial.sections.is_none());
    }

    #[test]
    fn seo_overlay_is_per_field() {
        let mut seo = SeoConfig::default();
        PartialSeo {
            title: Some("Acme".to_string()),
            ..PartialSeo::default()
        }
        .overlay_onto(&mut seo);
        assert_eq!(seo.title, "Acme");
        assert_eq!(seo.description, SeoConfig::default().description);
    }
}
