use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use portal_core::{MutationCommand, MutationKind, ScopeHeader};
use portal_logging::{portal_debug, portal_info};

use crate::{ApiError, MutationDispatcher, MutationReceipt, RemoteCollection, Resource, Transport};

enum EngineCommand<R: Resource> {
    Fetch { scope_id: String, refetch: bool },
    Mutate(MutationCommand<R::Item>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent<T> {
    /// Sent ahead of a successful `CollectionLoaded` for scopes that carry
    /// details.
    HeaderLoaded {
        scope_id: String,
        header: ScopeHeader,
    },
    CollectionLoaded {
        scope_id: String,
        result: Result<Vec<T>, ApiError>,
    },
    MutationCompleted {
        kind: MutationKind,
        result: Result<MutationReceipt, ApiError>,
    },
}

/// Background worker for one resource. Requests go in through the handle,
/// results come back as `EngineEvent`s.
///
/// The worker thread lives exactly as long as the handle: dropping the
/// handle closes the command channel and joins the thread.
pub struct EngineHandle<R: Resource> {
    cmd_tx: Option<mpsc::Sender<EngineCommand<R>>>,
    event_rx: mpsc::Receiver<EngineEvent<R::Item>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl<R: Resource> EngineHandle<R> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let dispatcher = Arc::new(MutationDispatcher::<R>::new(Arc::clone(&transport)));
            let mut collections: HashMap<String, Arc<RemoteCollection<R>>> = HashMap::new();

            while let Ok(command) = cmd_rx.recv() {
                let event_tx = event_tx.clone();
                match command {
                    EngineCommand::Fetch { scope_id, refetch } => {
                        let collection = Arc::clone(
                            collections.entry(scope_id.clone()).or_insert_with(|| {
                                Arc::new(RemoteCollection::new(Arc::clone(&transport), &scope_id))
                            }),
                        );
                        runtime.spawn(async move {
                            let result = if refetch {
                                collection.refetch().await
                            } else {
                                collection.fetch().await
                            };
                            if result.is_ok() {
                                if let Some(header) = collection.header() {
                                    let _ = event_tx.send(EngineEvent::HeaderLoaded {
                                        scope_id: scope_id.clone(),
                                        header,
                                    });
                                }
                            }
                            let _ = event_tx.send(EngineEvent::CollectionLoaded {
                                scope_id,
                                result: result.map(|items| items.to_vec()),
                            });
                        });
                    }
                    EngineCommand::Mutate(command) => {
                        let dispatcher = Arc::clone(&dispatcher);
                        runtime.spawn(async move {
                            let result = dispatcher.execute(&command).await;
                            let _ = event_tx.send(EngineEvent::MutationCompleted {
                                kind: command.kind(),
                                result,
                            });
                        });
                    }
                }
            }
            portal_debug!("Engine for {} shutting down", R::NAME);
        });

        portal_info!("Engine for {} started", R::NAME);
        Self {
            cmd_tx: Some(cmd_tx),
            event_rx,
            worker: Some(worker),
        }
    }

    pub fn fetch(&self, scope_id: impl Into<String>) {
        self.send(EngineCommand::Fetch {
            scope_id: scope_id.into(),
            refetch: false,
        });
    }

    pub fn refetch(&self, scope_id: impl Into<String>) {
        self.send(EngineCommand::Fetch {
            scope_id: scope_id.into(),
            refetch: true,
        });
    }

    pub fn mutate(&self, command: MutationCommand<R::Item>) {
        self.send(EngineCommand::Mutate(command));
    }

    pub fn try_recv(&self) -> Option<EngineEvent<R::Item>> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent<R::Item>> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand<R>) {
        if let Some(tx) = &self.cmd_tx {
            let _ = tx.send(command);
        }
    }
}

impl<R: Resource> Drop for EngineHandle<R> {
    fn drop(&mut self) {
        self.cmd_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
