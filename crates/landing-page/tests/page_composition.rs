use chrono::{TimeZone, Utc};
use landing_page::branding::{
    resolve, BrandingOverrides, BrandingProfile, DisplayMode, EffectiveBranding, LogoSet,
};
use landing_page::page::{
    load, prepare_for_save, reorder, PageConfiguration, PartialPageConfiguration, PageWarning,
    Placement, TemplateCatalog,
};
use landing_page::render::{compose, DispatchTable, RenderPlan};
use landing_page::sections::{
    HeroSettings, Section, SectionId, SectionRegistry, SectionSettings, ServicesSettings,
    TeamSettings,
};
use landing_page::theme::{hex_to_hsl, HslColor};
use serde_json::{json, Value};

fn template() -> PageConfiguration {
    TemplateCatalog::standard().default_template().config.clone()
}

fn stored(document: Value) -> PartialPageConfiguration {
    PartialPageConfiguration::from_document(document).expect("object document")
}

fn plan_signature(plan: &RenderPlan) -> Vec<(String, &'static str)> {
    plan.entries
        .iter()
        .map(|entry| (entry.section_id.to_string(), entry.variant))
        .collect()
}

#[test]
fn merging_twice_equals_merging_once() {
    let registry = SectionRegistry::standard();
    let documents = [
        json!({}),
        json!({ "global_styles": { "accent_color": "#10b981", "border_radius": "xl" } }),
        json!({
            "template_id": "classic",
            "seo": { "keywords": ["barber", "fade"] },
            "footer": { "show_powered_by": false },
            "sections": [
                { "id": "services", "type": "services", "order": 3, "variant": "bogus" },
                { "id": "hero", "type": "hero", "order": 3 },
                { "id": "legacy", "type": "ticker", "order": 1 }
            ]
        }),
    ];

    for document in documents {
        let partial = stored(document);
        let once = load(&registry, &template(), Some(&partial)).config;
        let twice = load(
            &registry,
            &template(),
            Some(&PartialPageConfiguration::from(&once)),
        )
        .config;
        assert_eq!(once, twice);
    }
}

#[test]
fn merge_is_total_over_hostile_documents() {
    let registry = SectionRegistry::standard();
    let documents = [
        json!({ "sections": "everything" }),
        json!({ "sections": [null, 1, { "id": 7 }, { "id": "x" }] }),
        json!({ "global_styles": { "primary_color": "#zzzzzz", "text_color": "purple" } }),
        json!({ "seo": [], "footer": null, "updated_at": 12 }),
        json!({ "template_id": { "nested": true } }),
    ];

    for document in documents {
        let partial = stored(document);
        let config = load(&registry, &template(), Some(&partial)).config;
        assert_eq!(config.sections, template().sections);
        assert_eq!(config.global_styles, template().global_styles);
    }
}

#[test]
fn tenant_beats_custom_beats_system() {
    let system = EffectiveBranding {
        display_name: "Landing Studio".to_string(),
        tagline: Some("Pages for every shop".to_string()),
        logos: LogoSet {
            generic: Some("/logo.svg".to_string()),
            dark: Some("/logo-dark.svg".to_string()),
            ..LogoSet::default()
        },
        favicon: Some("/favicon.ico".to_string()),
        primary_color: "0 0% 10%".parse().expect("valid triple"),
        secondary_color: HslColor::new(0, 0, 96),
        accent_color: HslColor::new(38, 92, 50),
    };
    let custom = BrandingProfile::custom(BrandingOverrides {
        primary_color: Some("200 80% 50%".parse().expect("valid triple")),
        tagline: Some("Account tagline".to_string()),
        ..BrandingOverrides::default()
    });
    let tenant = BrandingProfile::tenant(BrandingOverrides {
        tagline: Some("Domain tagline".to_string()),
        logos: LogoSet {
            light: Some("/acme-light.svg".to_string()),
            ..LogoSet::default()
        },
        ..BrandingOverrides::default()
    });

    let resolved = resolve(&system, Some(&tenant), Some(&custom));
    assert_eq!(resolved.primary_color.to_string(), "200 80% 50%");
    assert_eq!(resolved.tagline.as_deref(), Some("Domain tagline"));
    assert_eq!(resolved.display_name, "Landing Studio");
    assert_eq!(resolved.logo_for(DisplayMode::Light), Some("/acme-light.svg"));
    assert_eq!(resolved.logo_for(DisplayMode::Dark), Some("/logo-dark.svg"));

    let bare = EffectiveBranding {
        logos: LogoSet::default(),
        ..system
    };
    assert_eq!(resolve(&bare, None, None).logo_for(DisplayMode::Light), None);
}

#[test]
fn reorder_always_leaves_dense_orders() {
    for n in 1..=8usize {
        let sections: Vec<Section> = (0..n)
            .map(|i| {
                let section = Section::new(
                    format!("s{i}"),
                    SectionSettings::Team(TeamSettings::default()),
                    (i as i32 * 7) % 5,
                );
                if i % 3 == 0 {
                    section.disabled()
                } else {
                    section
                }
            })
            .collect();
        let config = PageConfiguration {
            sections,
            ..template()
        };

        for from in 0..n {
            for to in 0..n {
                for placement in [Placement::Before, Placement::After] {
                    let moved = reorder(
                        &config,
                        &SectionId::new(format!("s{from}")),
                        &SectionId::new(format!("s{to}")),
                        placement,
                    )
                    .expect("known sections");
                    let orders: Vec<i32> = moved.sections.iter().map(|s| s.order).collect();
                    assert_eq!(orders, (0..n as i32).collect::<Vec<_>>());
                }
            }
        }
    }
}

#[test]
fn unknown_variants_fall_back_to_default() {
    let registry = SectionRegistry::standard();
    assert_eq!(
        registry.validate_variant("services", "nonexistent-variant"),
        Ok("default")
    );
    assert_eq!(registry.validate_variant("gallery", "masonry"), Ok("masonry"));
    assert!(registry.validate_variant("marquee", "default").is_err());
}

#[test]
fn one_unknown_section_among_four_valid_ones_is_contained() {
    let config = PageConfiguration {
        sections: vec![
            Section::new("hero", SectionSettings::Hero(HeroSettings::default()), 0),
            Section::new(
                "services",
                SectionSettings::Services(ServicesSettings::default()),
                1,
            ),
            Section::unknown("promo", "countdown", json!({ "ends_at": "soon" }), 2),
            Section::new("team", SectionSettings::Team(TeamSettings::default()), 3),
            Section::new("team-archive", SectionSettings::Team(TeamSettings::default()), 4)
                .disabled(),
        ],
        ..template()
    };

    let plan = compose(
        &config,
        &SectionRegistry::standard(),
        &DispatchTable::standard(),
    );

    let ids: Vec<&str> = plan.entries.iter().map(|e| e.section_id.as_str()).collect();
    assert_eq!(ids, ["hero", "services", "team"]);
    assert_eq!(
        plan.warnings,
        vec![PageWarning::UnknownSectionType {
            section_id: SectionId::new("promo"),
            type_name: "countdown".to_string(),
        }]
    );
}

#[test]
fn save_and_reload_reproduce_the_plan() {
    let registry = SectionRegistry::standard();
    let dispatch = DispatchTable::standard();
    let mut config = template();
    config.sections[2].order = 0;
    config.sections[4].enabled = true;
    config.sections[1].variant = "carousel".to_string();

    let before = compose(&config, &registry, &dispatch);

    let now = Utc
        .with_ymd_and_hms(2026, 1, 15, 8, 0, 0)
        .single()
        .expect("valid time");
    let document = serde_json::to_value(prepare_for_save(&config, now)).expect("serializes");
    let reloaded = load(&registry, &template(), Some(&stored(document))).config;
    let after = compose(&reloaded, &registry, &dispatch);

    assert_eq!(plan_signature(&before), plan_signature(&after));
    assert_eq!(reloaded.updated_at, Some(now));
}

#[test]
fn hex_conversion_boundaries() {
    assert_eq!(hex_to_hsl("#000000"), Ok(HslColor::new(0, 0, 0)));
    assert_eq!(hex_to_hsl("#ffffff"), Ok(HslColor::new(0, 0, 100)));
    assert_eq!(hex_to_hsl("#ff0000"), Ok(HslColor::new(0, 100, 50)));
    assert!(hex_to_hsl("#ff00").is_err());
}
