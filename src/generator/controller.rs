use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::Result;
use chrono::Local;
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::Mutex;

use crate::{
    db::{Database, GenerationRecord},
    floating,
    history::{HistoryLedger, HISTORY_CAPACITY},
    settings::GenerationSettings,
    log_error, log_info, log_warn,
};

use super::state::{
    DelayStrategy, GenerationError, GenerationSnapshot, Overview, PendingGuard, SessionState,
};

const ENABLE_LOGS: bool = true;

/// Per-session view-model. Clones share state; every history mutation goes
/// through the one mutex.
#[derive(Clone)]
pub struct GenerationController {
    state: Arc<Mutex<SessionState>>,
    /// Generations that have started but not yet finished or been dropped.
    pending: Arc<AtomicUsize>,
    db: Option<Database>,
}

impl GenerationController {
    pub fn new(db: Option<Database>, settings: GenerationSettings) -> Self {
        Self::with_rng(db, settings, StdRng::from_entropy())
    }

    pub fn with_rng(db: Option<Database>, settings: GenerationSettings, rng: StdRng) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new(settings, rng))),
            pending: Arc::new(AtomicUsize::new(0)),
            db,
        }
    }

    /// Reload history from the store, trimming it to the ledger capacity.
    /// Returns the number of records restored.
    pub async fn restore_history(&self) -> Result<usize> {
        let Some(db) = &self.db else {
            return Ok(0);
        };

        let removed = db.prune_records(HISTORY_CAPACITY).await?;
        if removed > 0 {
            log_warn!("Pruned {removed} stale history records");
        }

        let records = db.list_records(HISTORY_CAPACITY).await?;
        let restored = records.len();

        let mut state = self.state.lock().await;
        state.history = HistoryLedger::from_records(records);
        state.reconcile_selection();

        Ok(restored)
    }

    pub async fn generate(&self, input: &str) -> Result<GenerationRecord> {
        let input = input.trim();
        if input.is_empty() {
            return Err(GenerationError::EmptyInput.into());
        }

        let _pending = PendingGuard::enter(&self.pending);
        let delay = DelayStrategy::from_settings(&self.state.lock().await.settings);
        delay.wait().await;

        let record = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;

            let display_text = state.segmenter.segment(input);
            let decoration_text = floating::sample(
                input,
                state.settings.random_count,
                &state.settings.alphabet,
                &mut state.rng,
            );
            let record = GenerationRecord::new(input.to_string(), display_text, decoration_text);

            state.history.append(record.clone());
            state.current = Some(record.clone());
            state.reconcile_selection();
            record
        };

        log_info!(
            "Generated record {} ({} chars in, {} floating)",
            record.id,
            input.chars().count(),
            record.decoration_text.chars().count()
        );

        if let Some(db) = &self.db {
            if let Err(err) = self.persist(db, &record).await {
                log_error!("Failed to persist record {}: {err:#}", record.id);
            }
        }

        Ok(record)
    }

    /// Run a fresh generation on the input of an existing history item.
    /// Records missing from the session ledger are looked up in the store.
    pub async fn regenerate(&self, record_id: &str) -> Result<GenerationRecord> {
        let cached = {
            let state = self.state.lock().await;
            state
                .history
                .get(record_id)
                .map(|record| record.input_text.clone())
        };

        let input = match (cached, &self.db) {
            (Some(input), _) => input,
            (None, Some(db)) => db
                .get_record(record_id)
                .await?
                .map(|record| record.input_text)
                .ok_or_else(|| GenerationError::RecordNotFound(record_id.to_string()))?,
            (None, None) => {
                return Err(GenerationError::RecordNotFound(record_id.to_string()).into())
            }
        };

        self.generate(&input).await
    }

    pub async fn select(&self, record_id: &str) -> Result<GenerationRecord> {
        let mut state = self.state.lock().await;
        let record = state
            .history
            .get(record_id)
            .cloned()
            .ok_or_else(|| GenerationError::RecordNotFound(record_id.to_string()))?;
        state.selected_id = Some(record.id.clone());
        Ok(record)
    }

    pub async fn clear_selection(&self) {
        self.state.lock().await.selected_id = None;
    }

    /// Plain-text rendering of a history item for saving or sharing.
    pub async fn export(&self, record_id: &str) -> Result<String> {
        let state = self.state.lock().await;
        let record = state
            .history
            .get(record_id)
            .ok_or_else(|| GenerationError::RecordNotFound(record_id.to_string()))?;

        Ok(format_export(record))
    }

    pub async fn history(&self) -> Vec<GenerationRecord> {
        self.state.lock().await.history.list().to_vec()
    }

    pub async fn clear_history(&self) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            state.history.clear();
            state.selected_id = None;
        }

        if let Some(db) = &self.db {
            db.clear_records().await?;
        }

        log_info!("History cleared");
        Ok(())
    }

    pub async fn snapshot(&self) -> GenerationSnapshot {
        let is_loading = self.pending.load(Ordering::SeqCst) > 0;
        self.state.lock().await.snapshot(is_loading)
    }

    pub async fn overview(&self) -> Overview {
        self.state.lock().await.overview()
    }

    pub async fn settings(&self) -> GenerationSettings {
        self.state.lock().await.settings.clone()
    }

    pub async fn update_settings(&self, settings: GenerationSettings) -> Result<()> {
        settings.validate()?;
        self.state.lock().await.settings = settings;
        Ok(())
    }

    async fn persist(&self, db: &Database, record: &GenerationRecord) -> Result<()> {
        db.insert_record(record).await?;
        db.prune_records(HISTORY_CAPACITY).await?;
        Ok(())
    }
}

fn format_export(record: &GenerationRecord) -> String {
    let created = record
        .created_at
        .with_timezone(&Local)
        .format("%Y/%-m/%-d %H:%M:%S");

    format!(
        "诗意星空 · {created}\n\n原始输入\n{}\n\n诗意转化\n{}\n\n漂浮语言\n{}\n",
        record.input_text, record.display_text, record.decoration_text
    )
}
