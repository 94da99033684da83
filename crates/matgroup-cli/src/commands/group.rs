use crate::cli::GroupArgs;
use crate::error::Result;
use crate::progress;
use matgroup::core::io;
use matgroup::core::matcher::{CompositionMatcher, MatcherConfig};
use matgroup::workflows::group::build_structure_groups;
use matgroup::workflows::progress::ProgressReporter;
use tracing::info;

pub fn run(args: GroupArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading matcher configuration from {:?}", path);
            MatcherConfig::load(path)?
        }
        None => MatcherConfig::default(),
    };
    if !args.ignored_species.is_empty() {
        config.ignored_species = args.ignored_species.clone();
    }

    info!("Loading entries from {:?}", &args.input);
    let entries = io::read_entries(&args.input)?;
    info!(
        "Loaded {} entries, grouping with ignored species {:?}.",
        entries.len(),
        config.ignored_species
    );

    let matcher = CompositionMatcher::from_config(&config);
    let spinner = progress::grouping_spinner();
    let reporter = ProgressReporter::with_callback(progress::progress_callback(spinner.clone()));

    let documents =
        build_structure_groups(&entries, &matcher, &config.ignored_species, &reporter)?;
    spinner.finish_and_clear();

    info!("Built {} structure-group documents.", documents.len());
    io::write_documents(&documents, &args.output)?;

    println!(
        "✓ {} entries grouped into {} documents, written to: {}",
        entries.len(),
        documents.len(),
        args.output.display()
    );

    Ok(())
}
