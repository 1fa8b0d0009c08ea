use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Bar over the sample files of an aggregation run; drawn to stderr only when requested.
pub fn make_samplebar(show: bool) -> ProgressBar {
    let bar = ProgressBar::new(0).with_style(
        ProgressStyle::with_template("{prefix}:\t{human_pos}/{human_len:7} {bar:40.cyan/blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_prefix("SAMPLES");

    if !show {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }

    bar
}
