//! ChatDispatcher - Background loop feeding inbound messages to per-chat workers.
//!
//! Polls the chat transport and hands each message to the worker task of
//! its chat. Each worker owns a bounded queue and processes its chat's
//! messages strictly in arrival order; different chats run concurrently,
//! so a slow inference call only stalls the chat that issued it.
//!
//! Queueing never waits. A message for a chat whose queue is full is logged
//! and dropped. Workers exit after sitting idle and are reaped after each
//! poll; the next message for that chat starts a fresh one.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `poll_error_delay` | 1s | Pause after a failed poll |
//! | `worker_queue_capacity` | 32 | Pending messages per chat before new ones are dropped |
//! | `worker_idle_timeout` | 5m | Idle time after which a chat worker exits |
//!
//! ## Graceful Shutdown
//!
//! On the shutdown signal the loop stops polling, closes every worker queue
//! and waits for the workers to drain what they already received.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::FutureExt;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use crate::application::handlers::conversation::HandleMessageHandler;
use crate::domain::conversation::InboundMessage;
use crate::domain::foundation::ChatId;
use crate::ports::ChatTransport;

/// Configuration for the ChatDispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// How long to wait before polling again after a transport error.
    pub poll_error_delay: Duration,

    /// Bounded queue length of each chat worker.
    pub worker_queue_capacity: usize,

    /// How long a worker waits for its next message before exiting.
    pub worker_idle_timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            poll_error_delay: Duration::from_millis(1000),
            worker_queue_capacity: 32,
            worker_idle_timeout: Duration::from_secs(300),
        }
    }
}

impl DispatcherConfig {
    pub fn with_poll_error_delay(mut self, delay: Duration) -> Self {
        self.poll_error_delay = delay;
        self
    }

    pub fn with_worker_queue_capacity(mut self, capacity: usize) -> Self {
        self.worker_queue_capacity = capacity.max(1);
        self
    }

    pub fn with_worker_idle_timeout(mut self, timeout: Duration) -> Self {
        self.worker_idle_timeout = timeout;
        self
    }
}

/// Long-running bot loop.
pub struct ChatDispatcher {
    transport: Arc<dyn ChatTransport>,
    handler: Arc<HandleMessageHandler>,
    config: DispatcherConfig,
}

impl ChatDispatcher {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        handler: Arc<HandleMessageHandler>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            transport,
            handler,
            config,
        }
    }

    /// Run the dispatch loop until the shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut pool = WorkerPool::new(
            self.transport.clone(),
            self.handler.clone(),
            self.config.clone(),
        );
        let mut offset = 0;

        tracing::info!("chat dispatcher started");

        while !*shutdown.borrow() {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }

                polled = self.transport.poll(offset) => match polled {
                    Ok(batch) => {
                        offset = batch.next_offset;
                        for message in batch.messages {
                            pool.dispatch(message);
                        }
                        pool.reap();
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "polling chat transport failed");
                        tokio::select! {
                            _ = time::sleep(self.config.poll_error_delay) => {}
                            _ = shutdown.changed() => {}
                        }
                    }
                }
            }
        }

        tracing::info!(workers = pool.len(), "chat dispatcher stopping");
        pool.shutdown().await;
    }
}

struct Worker {
    queue: mpsc::Sender<InboundMessage>,
    handle: JoinHandle<()>,
}

/// Per-chat workers owned by the poll loop.
struct WorkerPool {
    workers: HashMap<ChatId, Worker>,
    transport: Arc<dyn ChatTransport>,
    handler: Arc<HandleMessageHandler>,
    config: DispatcherConfig,
}

impl WorkerPool {
    fn new(
        transport: Arc<dyn ChatTransport>,
        handler: Arc<HandleMessageHandler>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            workers: HashMap::new(),
            transport,
            handler,
            config,
        }
    }

    fn len(&self) -> usize {
        self.workers.len()
    }

    /// Queues a message on its chat's worker, starting one if needed.
    ///
    /// Returns false if the chat's queue was full and the message dropped.
    fn dispatch(&mut self, message: InboundMessage) -> bool {
        let chat_id = message.chat_id;

        let (message, previous) = match self.workers.remove(&chat_id) {
            Some(worker) => match worker.queue.try_send(message) {
                Ok(()) => {
                    self.workers.insert(chat_id, worker);
                    return true;
                }
                Err(TrySendError::Full(dropped)) => {
                    tracing::warn!(
                        chat_id = %chat_id,
                        message_id = dropped.message_id.value(),
                        capacity = self.config.worker_queue_capacity,
                        "chat queue full, dropping message"
                    );
                    self.workers.insert(chat_id, worker);
                    return false;
                }
                // Worker went idle and closed its queue.
                Err(TrySendError::Closed(message)) => (message, Some(worker.handle)),
            },
            None => (message, None),
        };

        let worker = self.spawn_worker(chat_id, previous);
        if worker.queue.try_send(message).is_err() {
            tracing::error!(chat_id = %chat_id, "new chat worker rejected its first message");
        }
        self.workers.insert(chat_id, worker);
        true
    }

    /// Drops workers whose task has ended. Returns how many were removed.
    fn reap(&mut self) -> usize {
        let before = self.workers.len();
        self.workers.retain(|chat_id, worker| {
            if !worker.handle.is_finished() {
                return true;
            }
            if let Some(Err(e)) = (&mut worker.handle).now_or_never() {
                tracing::error!(chat_id = %chat_id, error = %e, "chat worker panicked");
            }
            false
        });
        before - self.workers.len()
    }

    /// Closes every queue and waits for the workers to drain.
    async fn shutdown(self) {
        // Dropping the senders closes the queues.
        let handles = self.workers.into_values().map(|worker| worker.handle);
        for result in join_all(handles).await {
            if let Err(e) = result {
                tracing::error!(error = %e, "chat worker panicked");
            }
        }
    }

    fn spawn_worker(&self, chat_id: ChatId, previous: Option<JoinHandle<()>>) -> Worker {
        let (queue, mut inbox) = mpsc::channel::<InboundMessage>(self.config.worker_queue_capacity);
        let handler = self.handler.clone();
        let transport = self.transport.clone();
        let idle_timeout = self.config.worker_idle_timeout;

        tracing::debug!(chat_id = %chat_id, "starting chat worker");

        let handle = tokio::spawn(async move {
            // A replaced worker may still be draining; its messages come first.
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    tracing::error!(chat_id = %chat_id, error = %e, "chat worker panicked");
                }
            }

            loop {
                match time::timeout(idle_timeout, inbox.recv()).await {
                    Ok(Some(message)) => serve(&handler, transport.as_ref(), &message).await,
                    Ok(None) => break,
                    Err(_) => {
                        inbox.close();
                        while let Some(message) = inbox.recv().await {
                            serve(&handler, transport.as_ref(), &message).await;
                        }
                        tracing::debug!(chat_id = %chat_id, "chat worker idle, exiting");
                        break;
                    }
                }
            }
        });

        Worker { queue, handle }
    }
}

async fn serve(handler: &HandleMessageHandler, transport: &dyn ChatTransport, message: &InboundMessage) {
    let chat_id = message.chat_id;
    match handler.handle(message).await {
        Ok(reply) => {
            if let Err(e) = transport.send(&reply).await {
                tracing::warn!(chat_id = %chat_id, error = %e, "sending reply failed");
            }
        }
        Err(e) => {
            tracing::error!(chat_id = %chat_id, error = %e, "handling message failed");
        }
    }
}
