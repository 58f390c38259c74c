use bpextract_core::status::{ProcessingState, ProgressObserver};
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal progress bar driven by status events.
pub struct BarObserver {
    bar: ProgressBar,
}

impl BarObserver {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{prefix:.bold} [{bar:40.green/238}] {pos}/{len} pages  {msg}  {elapsed}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        bar.set_style(style);
        bar.set_prefix("Processing pages");
        BarObserver { bar }
    }
}

impl Default for BarObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for BarObserver {
    fn on_start(&self, total_pages: usize) {
        self.bar.set_length(total_pages as u64);
        self.bar.set_position(0);
    }

    fn on_page(&self, pages_done: usize, _total_pages: usize, records_found: usize) {
        self.bar.set_position(pages_done as u64);
        self.bar.set_message(format!("records={records_found}"));
    }

    fn on_finish(&self, state: ProcessingState) {
        match state {
            ProcessingState::Completed => self.bar.finish(),
            _ => self.bar.abandon(),
        }
    }
}
