use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use rand::rngs::StdRng;
use serde::Serialize;
use tokio::time;

use crate::{
    db::GenerationRecord, history::HistoryLedger, poetry::Segmenter, settings::GenerationSettings,
};

const DELAY_ENV: &str = "STARRY_VERSE_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Input was empty after trimming.
    EmptyInput,
    RecordNotFound(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::EmptyInput => write!(f, "input text is empty"),
            GenerationError::RecordNotFound(id) => write!(f, "history record {id} not found"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Pause applied before a result is revealed. Purely visual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DelayStrategy {
    #[default]
    None,
    Fixed(Duration),
}

impl DelayStrategy {
    /// `STARRY_VERSE_DELAY_MS` wins over the stored setting when it parses.
    pub fn from_settings(settings: &GenerationSettings) -> Self {
        let delay = std::env::var(DELAY_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(|ms| (ms > 0).then(|| Duration::from_millis(ms)))
            .unwrap_or_else(|| settings.delay());

        match delay {
            Some(duration) => DelayStrategy::Fixed(duration),
            None => DelayStrategy::None,
        }
    }

    pub async fn wait(self) {
        if let DelayStrategy::Fixed(duration) = self {
            time::sleep(duration).await;
        }
    }
}

/// Everything the front-end needs to redraw.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSnapshot {
    pub is_loading: bool,
    pub current: Option<GenerationRecord>,
    pub selected_id: Option<String>,
    pub history: Vec<GenerationRecord>,
}

/// Data for the overview page: every non-whitespace character of the
/// stored verses and floating text, plus the newest few records for quick
/// selection.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub characters: Vec<char>,
    pub recent: Vec<GenerationRecord>,
}

pub const QUICK_SELECT_LIMIT: usize = 5;

/// Counts one in-flight generation for as long as it lives, including when
/// the generating future is dropped mid-delay.
pub(crate) struct PendingGuard {
    pending: Arc<AtomicUsize>,
}

impl PendingGuard {
    pub fn enter(pending: &Arc<AtomicUsize>) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        Self {
            pending: Arc::clone(pending),
        }
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

pub(crate) struct SessionState {
    pub history: HistoryLedger,
    pub current: Option<GenerationRecord>,
    pub selected_id: Option<String>,
    pub settings: GenerationSettings,
    pub segmenter: Segmenter,
    pub rng: StdRng,
}

impl SessionState {
    pub fn new(settings: GenerationSettings, rng: StdRng) -> Self {
        Self {
            history: HistoryLedger::new(),
            current: None,
            selected_id: None,
            settings,
            segmenter: Segmenter::default(),
            rng,
        }
    }

    pub fn snapshot(&self, is_loading: bool) -> GenerationSnapshot {
        GenerationSnapshot {
            is_loading,
            current: self.current.clone(),
            selected_id: self.selected_id.clone(),
            history: self.history.list().to_vec(),
        }
    }

    pub fn overview(&self) -> Overview {
        let characters = self
            .history
            .list()
            .iter()
            .flat_map(|record| {
                record
                    .display_text
                    .chars()
                    .chain(record.decoration_text.chars())
            })
            .filter(|c| !c.is_whitespace())
            .collect();

        Overview {
            characters,
            recent: self
                .history
                .list()
                .iter()
                .take(QUICK_SELECT_LIMIT)
                .cloned()
                .collect(),
        }
    }

    /// Drop the selection if its record has been evicted.
    pub fn reconcile_selection(&mut self) {
        if let Some(id) = &self.selected_id {
            if self.history.get(id).is_none() {
                self.selected_id = None;
            }
        }
    }
}
