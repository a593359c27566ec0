use chrono::Utc;
use clap::Args;
use landing_page::error::AppError;
use landing_page::page::{load_document, prepare_for_save, LoadOutcome, TemplateCatalog};
use landing_page::render::{compose, DispatchTable, RenderPlan};
use landing_page::sections::SectionRegistry;
use landing_page::theme::HslColor;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct PlanArgs {
    /// Stored page document (JSON). Omit to plan the default template.
    #[arg(long)]
    pub(crate) document: Option<PathBuf>,
    /// Template used when the document names none or an unknown one
    #[arg(long)]
    pub(crate) template: Option<String>,
    /// Print the reconciled, save-ready document instead of the plan
    #[arg(long)]
    pub(crate) normalized: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ColorArgs {
    /// Hex color (#rgb, #rrggbb) or an 'H S% L%' triple
    pub(crate) value: String,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        document,
        template,
        normalized,
    } = args;

    let registry = SectionRegistry::standard();
    let mut catalog = TemplateCatalog::standard();
    if let Some(template_id) = template.as_deref() {
        if catalog.get(template_id).is_none() {
            println!("Unknown template '{template_id}', keeping the default");
        }
        catalog = catalog.with_default(template_id);
    }

    let document = document.map(read_document).transpose()?;
    let LoadOutcome { config, warnings } = load_document(&registry, &catalog, document);

    if normalized {
        let prepared = prepare_for_save(&config, Utc::now());
        match serde_json::to_string_pretty(&prepared) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Normalized document unavailable: {err}"),
        }
        return Ok(());
    }

    let plan =
        compose(&config, &registry, &DispatchTable::standard()).with_leading_warnings(warnings);
    println!("Landing page plan (template '{}')", config.template_id);
    render_plan(&plan);
    Ok(())
}

pub(crate) fn run_templates() -> Result<(), AppError> {
    let catalog = TemplateCatalog::standard();
    let default_id = catalog.default_template().id;
    println!("Available templates");
    for summary in catalog.summaries() {
        let marker = if summary.id == default_id {
            " (default)"
        } else {
            ""
        };
        println!("- {}{}: {}", summary.id, marker, summary.name);
        println!("  {}", summary.description);
        println!("  Sections: {}", summary.section_types.join(" -> "));
    }
    Ok(())
}

pub(crate) fn run_color(args: ColorArgs) -> Result<(), AppError> {
    let color: HslColor = args.value.parse()?;
    println!("Token:   {color}");
    println!("CSS:     {}", color.to_css_function());
    println!("Hex:     {}", color.to_hex());
    Ok(())
}

fn read_document(path: PathBuf) -> Result<Value, AppError> {
    let raw = fs::read_to_string(&path)?;
    let document = serde_json::from_str(&raw).map_err(std::io::Error::from)?;
    Ok(document)
}

fn render_plan(plan: &RenderPlan) {
    if plan.is_empty() {
        println!("- No visible sections");
    }
    for (position, entry) in plan.entries.iter().enumerate() {
        let title = entry.title.as_deref().unwrap_or("untitled");
        println!(
            "{:>2}. {} [{} / {}] -> {} ({})",
            position + 1,
            entry.section_id,
            entry.section_type,
            entry.variant,
            entry.component,
            title
        );
        let sources = entry.data_sources();
        if !sources.is_empty() {
            let names: Vec<&str> = sources.iter().map(|source| source.as_str()).collect();
            println!("    data: {}", names.join(", "));
        }
    }

    if plan.warnings.is_empty() {
        println!("Warnings: none");
    } else {
        println!("Warnings:");
        for warning in &plan.warnings {
            println!("  - {warning}");
        }
    }
}
