use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use tokio::sync::oneshot;

use super::migrations::migrate;
use crate::{log_error, log_info};

const ENABLE_LOGS: bool = true;

type Job = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum Message {
    Run(Job),
    Stop,
}

/// Owns the worker thread; stops and joins it when the last handle goes.
struct Worker {
    jobs: mpsc::Sender<Message>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Worker {
    fn drop(&mut self) {
        let handle = self
            .thread
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        let Some(handle) = handle else {
            return;
        };
        if self.jobs.send(Message::Stop).is_err() {
            log_error!("History store worker already gone");
        }
        if handle.join().is_err() {
            log_error!("History store worker panicked");
        }
    }
}

/// Handle to the history database. Every statement runs on one worker
/// thread; clones share it.
#[derive(Clone)]
pub struct Database {
    worker: Arc<Worker>,
}

impl Database {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let (jobs_tx, jobs_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let worker_path = path.clone();

        let thread = thread::Builder::new()
            .name("starry-verse-db".into())
            .spawn(move || match open(&worker_path) {
                Ok(mut conn) => {
                    if ready_tx.send(Ok(())).is_ok() {
                        serve(&mut conn, jobs_rx);
                    }
                }
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                }
            })
            .context("failed to spawn history store thread")?;

        ready_rx
            .recv()
            .context("history store thread exited during startup")??;

        log_info!("History store opened at {}", path.display());

        Ok(Self {
            worker: Arc::new(Worker {
                jobs: jobs_tx,
                thread: Mutex::new(Some(thread)),
            }),
        })
    }

    /// Run `task` on the worker and await its result.
    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job = Box::new(move |conn| {
            // Receiver gone means the caller was dropped; nothing to report to.
            let _ = reply_tx.send(task(conn));
        });

        self.worker
            .jobs
            .send(Message::Run(job))
            .map_err(|_| anyhow!("history store is shut down"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("history store dropped the request"))?
    }
}

fn open(path: &Path) -> Result<Connection> {
    let mut conn = Connection::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
        log_error!("WAL unavailable, using default journal: {err}");
    }

    migrate(&mut conn)?;
    Ok(conn)
}

fn serve(conn: &mut Connection, jobs: mpsc::Receiver<Message>) {
    while let Ok(Message::Run(job)) = jobs.recv() {
        job(conn);
    }
    log_info!("History store worker stopped");
}
