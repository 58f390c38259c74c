//! Progress and outcome tracking for a single extraction run.
//!
//! [`ProcessingStatus`] keeps the counters that end up in the final status
//! report. Front ends that want live feedback (a terminal progress bar, for
//! instance) attach a [`ProgressObserver`]; the tracker forwards every state
//! change to it.

use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingState {
    NotStarted,
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingState::NotStarted => write!(f, "Not Started"),
            ProcessingState::Processing => write!(f, "Processing"),
            ProcessingState::Completed => write!(f, "Completed"),
            ProcessingState::Failed => write!(f, "Failed"),
        }
    }
}

/// Receives live progress events. All methods default to no-ops.
pub trait ProgressObserver: Send {
    fn on_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after each page with the running totals.
    fn on_page(&self, pages_done: usize, total_pages: usize, records_found: usize) {
        let _ = (pages_done, total_pages, records_found);
    }

    fn on_finish(&self, state: ProcessingState) {
        let _ = state;
    }
}

/// Counters and timing for one run.
pub struct ProcessingStatus {
    total_pages: usize,
    current_page: usize,
    records_found: usize,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    state: ProcessingState,
    error: Option<String>,
    observer: Option<Box<dyn ProgressObserver>>,
}

impl Default for ProcessingStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessingStatus")
            .field("state", &self.state)
            .field("current_page", &self.current_page)
            .field("total_pages", &self.total_pages)
            .field("records_found", &self.records_found)
            .field("error", &self.error)
            .finish()
    }
}

impl ProcessingStatus {
    pub fn new() -> Self {
        ProcessingStatus {
            total_pages: 0,
            current_page: 0,
            records_found: 0,
            started_at: None,
            finished_at: None,
            state: ProcessingState::NotStarted,
            error: None,
            observer: None,
        }
    }

    pub fn with_observer(observer: Box<dyn ProgressObserver>) -> Self {
        ProcessingStatus {
            observer: Some(observer),
            ..Self::new()
        }
    }

    /// Start the clock. Page counts are unknown until the text is extracted.
    pub fn begin(&mut self) {
        self.total_pages = 0;
        self.current_page = 0;
        self.records_found = 0;
        self.started_at = Some(Instant::now());
        self.finished_at = None;
        self.state = ProcessingState::Processing;
        self.error = None;
    }

    /// Set the number of pages that will be walked.
    ///
    /// Starts the clock too if `begin` was never called.
    pub fn set_total_pages(&mut self, total_pages: usize) {
        if self.state != ProcessingState::Processing {
            self.begin();
        }
        self.total_pages = total_pages;
        if let Some(obs) = &self.observer {
            obs.on_start(total_pages);
        }
    }

    /// Record that `pages_done` pages are finished and `records` readings kept so far.
    pub fn update(&mut self, pages_done: usize, records: usize) {
        self.current_page = pages_done;
        self.records_found = records;
        if let Some(obs) = &self.observer {
            obs.on_page(pages_done, self.total_pages, records);
        }
    }

    /// Mark the run as completed. A failed run stays failed.
    pub fn complete(&mut self) {
        if self.state == ProcessingState::Failed {
            return;
        }
        self.finish(ProcessingState::Completed);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.finish(ProcessingState::Failed);
    }

    fn finish(&mut self, state: ProcessingState) {
        self.finished_at = Some(Instant::now());
        self.state = state;
        if let Some(obs) = &self.observer {
            obs.on_finish(state);
        }
    }

    pub fn state(&self) -> ProcessingState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn records_found(&self) -> usize {
        self.records_found
    }

    /// Percentage of pages processed, 0 when there is nothing to process.
    pub fn progress(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        self.current_page as f64 / self.total_pages as f64 * 100.0
    }

    /// Time since `begin`, frozen once the run has finished.
    pub fn duration(&self) -> Duration {
        match (self.started_at, self.finished_at) {
            (None, _) => Duration::ZERO,
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => start.elapsed(),
        }
    }

    /// Multi-line human readable summary.
    pub fn report(&self) -> String {
        let mut lines = vec![
            format!("Status: {}", self.state),
            format!("Progress: {:.1}%", self.progress()),
            format!(
                "Pages Processed: {}/{}",
                self.current_page, self.total_pages
            ),
            format!("Records Found: {}", self.records_found),
            format!("Time Elapsed: {:.1} seconds", self.duration().as_secs_f64()),
        ];
        if let Some(err) = &self.error {
            lines.push(format!("Error: {err}"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_new_status_is_idle() {
        let status = ProcessingStatus::new();
        assert_eq!(status.state(), ProcessingState::NotStarted);
        assert_eq!(status.progress(), 0.0);
        assert_eq!(status.duration(), Duration::ZERO);
    }

    #[test]
    fn test_progress_percentage() {
        let mut status = ProcessingStatus::new();
        status.set_total_pages(4);
        status.update(1, 10);
        assert_eq!(status.progress(), 25.0);
        status.update(4, 42);
        assert_eq!(status.progress(), 100.0);
        assert_eq!(status.records_found(), 42);
    }

    #[test]
    fn test_clock_runs_before_page_total_is_known() {
        let mut status = ProcessingStatus::new();
        status.begin();
        std::thread::sleep(Duration::from_millis(20));
        status.set_total_pages(3);
        assert!(status.duration() >= Duration::from_millis(20));
        assert_eq!(status.total_pages(), 3);
        assert_eq!(status.state(), ProcessingState::Processing);
    }

    #[test]
    fn test_zero_pages_progress() {
        let mut status = ProcessingStatus::new();
        status.set_total_pages(0);
        assert_eq!(status.progress(), 0.0);
    }

    #[test]
    fn test_duration_frozen_after_complete() {
        let mut status = ProcessingStatus::new();
        status.set_total_pages(1);
        status.complete();
        let d = status.duration();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(status.duration(), d);
    }

    #[test]
    fn test_failure_is_sticky() {
        let mut status = ProcessingStatus::new();
        status.set_total_pages(2);
        status.fail("disk full");
        status.complete();
        assert_eq!(status.state(), ProcessingState::Failed);
        assert_eq!(status.error(), Some("disk full"));
    }

    #[test]
    fn test_report_contents() {
        let mut status = ProcessingStatus::new();
        status.set_total_pages(2);
        status.update(1, 3);
        status.fail("boom");
        let report = status.report();
        assert!(report.starts_with("Status: Failed\n"));
        assert!(report.contains("Progress: 50.0%"));
        assert!(report.contains("Pages Processed: 1/2"));
        assert!(report.contains("Records Found: 3"));
        assert!(report.contains("Time Elapsed: "));
        assert!(report.ends_with("Error: boom"));
    }

    #[derive(Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl ProgressObserver for Recorder {
        fn on_start(&self, total_pages: usize) {
            self.events.lock().unwrap().push(format!("start {total_pages}"));
        }

        fn on_page(&self, pages_done: usize, total_pages: usize, records_found: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("page {pages_done}/{total_pages} {records_found}"));
        }

        fn on_finish(&self, state: ProcessingState) {
            self.events.lock().unwrap().push(format!("finish {state}"));
        }
    }

    #[test]
    fn test_observer_receives_events() {
        let recorder = Recorder::default();
        let events = recorder.events.clone();
        let mut status = ProcessingStatus::with_observer(Box::new(recorder));
        status.set_total_pages(2);
        status.update(1, 5);
        status.update(2, 9);
        status.complete();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["start 2", "page 1/2 5", "page 2/2 9", "finish Completed"]
        );
    }
}
