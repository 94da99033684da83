use indicatif::{ProgressBar, ProgressStyle};
use matgroup::workflows::progress::{Progress, ProgressCallback};
use std::time::Duration;

/// Creates a spinner for the grouping workflow. Bucket counts are not known
/// up front (they depend on the framework split), so the spinner carries a
/// running message instead of a fixed-length bar.
pub fn grouping_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Bridges workflow progress events onto an indicatif spinner.
pub fn progress_callback(spinner: ProgressBar) -> ProgressCallback<'static> {
    Box::new(move |event| match event {
        Progress::PhaseStart { name } => spinner.set_message(name.to_string()),
        Progress::BucketStart { framework, entries } => {
            spinner.set_message(format!("Matching {} ({} entries)", framework, entries));
        }
        Progress::BucketFinish { .. } => spinner.inc(1),
        Progress::PhaseFinish => spinner.set_message("Finalizing documents"),
        Progress::Message(text) => spinner.set_message(text),
    })
}
