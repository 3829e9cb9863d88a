use crate::infra::IdentificationService;
use clap::Args;
use mineral_id::config::AppConfig;
use mineral_id::error::AppError;
use mineral_id::identification::{
    Identification, ObservationInput, ReferenceCatalog, COMPARISON_DEPTH,
};

#[derive(Args, Debug, Default)]
pub(crate) struct IdentifyArgs {
    /// Observed colors, comma separated (e.g. "white, pink")
    #[arg(long, default_value = "")]
    pub(crate) color: String,
    /// Streak color left on unglazed porcelain, or "unknown"
    #[arg(long)]
    pub(crate) streak: Option<String>,
    /// Mohs hardness estimate between 1 and 10
    #[arg(long)]
    pub(crate) hardness: Option<f64>,
    /// Luster label; repeat for several (vitreous, pearly, metallic, ...)
    #[arg(long)]
    pub(crate) luster: Vec<String>,
    /// Cleavage or fracture label; repeat for several
    #[arg(long)]
    pub(crate) cleavage: Vec<String>,
    /// Approximate density in g/cm³ (0 means unknown)
    #[arg(long)]
    pub(crate) density: Option<f64>,
    /// Attracted to a magnet? yes, no, or unknown
    #[arg(long)]
    pub(crate) magnetic: Option<String>,
    /// Fizzes in dilute HCl? yes, no, or unknown
    #[arg(long)]
    pub(crate) acid: Option<String>,
    /// Print the per-channel score breakdown for every candidate
    #[arg(long)]
    pub(crate) explain: bool,
    /// Emit the identification summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl IdentifyArgs {
    fn to_input(&self) -> ObservationInput {
        ObservationInput {
            color: self.color.clone(),
            streak: self.streak.clone(),
            hardness: self.hardness,
            luster: self.luster.clone(),
            cleavage: self.cleavage.clone(),
            density: self.density,
            magnetic: self.magnetic.clone(),
            acid: self.acid.clone(),
        }
    }
}

pub(crate) fn run_identify(args: IdentifyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = IdentificationService::from_config(&config.identification)?;
    let observation = service.observe(&args.to_input())?;
    let identification = service.identify(&observation);

    if args.json {
        let summary = identification.summary();
        let rendered = serde_json::to_string_pretty(&summary).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    render_identification(&identification, args.explain);
    Ok(())
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = IdentificationService::from_config(&config.identification)?;
    render_catalog(service.catalog());
    Ok(())
}

fn render_identification(identification: &Identification<'_>, explain: bool) {
    println!("Mineral identification");

    println!("\nRanking (by score)");
    for row in identification.table() {
        println!(
            "{:>2}. {:<26} {:>5.1}%  {}",
            row.rank, row.name, row.score_pct, row.notes
        );
    }

    if let Some(best) = identification.best_guess() {
        println!(
            "\nMost likely: {} ({:.1}%). Why: {}",
            best.name, best.score_pct, best.rationale
        );
    }

    println!("\nTop {COMPARISON_DEPTH} side by side");
    for row in identification.comparison(COMPARISON_DEPTH) {
        println!(
            "- {} ({:.1}%) | streak {} | hardness {} | luster {} | cleavage {} | density {} | magnetic {} | acid {}",
            row.name,
            row.score_pct,
            row.streak,
            row.hardness_label,
            row.luster.join(", "),
            row.cleavage.join(", "),
            row.density,
            yes_no(row.magnetic),
            yes_no(row.acid_reactive)
        );
    }

    let suggestions = identification.suggested_tests();
    if suggestions.is_empty() {
        println!("\nSuggested tests: none, every diagnostic channel was observed");
    } else {
        println!("\nSuggested tests");
        for (index, suggestion) in suggestions.iter().enumerate() {
            println!(
                "{}. {}: {}",
                index + 1,
                suggestion.label,
                suggestion.instruction
            );
        }
    }

    if explain {
        println!("\nScore breakdown");
        for candidate in identification.breakdown() {
            println!(
                "- {}: {:.2} of {:.2} points",
                candidate.name, candidate.earned, candidate.weight_total
            );
            for component in &candidate.components {
                println!(
                    "    {:<16} {:.2}/{:.2} ({})",
                    component.channel.label(),
                    component.earned,
                    component.weight,
                    component.outcome.label()
                );
            }
        }
    }
}

fn render_catalog(catalog: &ReferenceCatalog) {
    println!("Reference catalog ({} minerals)", catalog.len());
    for record in catalog.records() {
        println!(
            "- {} | colors {} | streak {} | hardness {} | density {} | {}",
            record.name,
            record.colors.iter().cloned().collect::<Vec<_>>().join(", "),
            record.streak,
            record.hardness,
            record.density,
            record.notes
        );
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
