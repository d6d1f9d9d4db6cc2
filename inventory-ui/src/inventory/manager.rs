use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use super::client::{ProductApi, ProductClient};
use super::{Command, InventoryAction, InventoryEvent, InventoryState};
use crate::http_client::Result;
use crate::wasm_utils;

pub struct InventoryManager {
    // Current state - single source of truth
    state: InventoryState,

    // Remote product store
    api: Arc<dyn ProductApi>,

    // Actions dispatched by the UI, applied in order
    pending_actions: VecDeque<InventoryAction>,

    // Outcomes of spawned commands, drained by poll()
    events_tx: Sender<InventoryEvent>,
    events_rx: Receiver<InventoryEvent>,
}

impl InventoryManager {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::new_with_api(Arc::new(ProductClient::new(base_url)?)))
    }

    pub fn new_with_api(api: Arc<dyn ProductApi>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            state: InventoryState::default(),
            api,
            pending_actions: VecDeque::new(),
            events_tx,
            events_rx,
        }
    }

    /// UI calls this - synchronous, just queues the action
    pub fn dispatch(&mut self, action: InventoryAction) {
        log::debug!("Dispatching action: {}", action.description());
        self.pending_actions.push_back(action);
    }

    /// UI reads this - immutable reference
    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    /// True while actions are queued or commands are outstanding.
    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty() || self.state.is_busy()
    }

    /// Frame driver. Applies finished command outcomes, then queued actions,
    /// and spawns any commands they produce. Never blocks, so overlapping
    /// requests race and the last list to arrive wins.
    pub fn poll(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            let commands = self.state.handle_event(event);
            self.spawn_commands(commands);
        }

        while let Some(action) = self.pending_actions.pop_front() {
            let commands = self.state.handle_action(action);
            self.spawn_commands(commands);
        }
    }

    /// Sequential driver. Processes one queued action and awaits every
    /// command it leads to, including the reload after a mutation.
    pub async fn update(&mut self) {
        if let Some(action) = self.pending_actions.pop_front() {
            log::debug!("Processing action: {}", action.description());
            let commands = self.state.handle_action(action);
            self.run_to_completion(commands).await;
        }
    }

    /// Runs `update` until the action queue is empty.
    pub async fn run_until_idle(&mut self) {
        while !self.pending_actions.is_empty() {
            self.update().await;
        }
    }

    async fn run_to_completion(&mut self, commands: Vec<Command>) {
        let mut queue: VecDeque<Command> = commands.into();
        while let Some(command) = queue.pop_front() {
            let event = run_command(self.api.as_ref(), command).await;
            queue.extend(self.state.handle_event(event));
        }
    }

    fn spawn_commands(&self, commands: Vec<Command>) {
        for command in commands {
            let api = Arc::clone(&self.api);
            let events_tx = self.events_tx.clone();

            wasm_utils::spawn_async(async move {
                let event = run_command(api.as_ref(), command).await;
                if events_tx.send(event).is_err() {
                    log::warn!("Inventory manager dropped before command finished");
                }
            });
        }
    }
}

/// Executes one command against the API and reports its outcome.
pub async fn run_command(api: &dyn ProductApi, command: Command) -> InventoryEvent {
    log::debug!("Running command: {}", command.description());

    match command {
        Command::FetchProducts => match api.list_products().await {
            Ok(products) => InventoryEvent::ProductsLoaded(products),
            Err(error) => InventoryEvent::ProductsFetchFailed(error),
        },
        Command::CreateProduct(product) => match api.create_product(&product).await {
            Ok(()) => InventoryEvent::ProductCreated {
                product_id: product.product_id,
            },
            Err(error) => InventoryEvent::ProductCreateFailed(error),
        },
        Command::UpdateProduct(patch) => match api.update_product(&patch).await {
            Ok(()) => InventoryEvent::ProductUpdated {
                product_id: patch.product_id,
            },
            Err(error) => InventoryEvent::ProductUpdateFailed(error),
        },
        Command::DeleteProduct { product_id } => match api.delete_product(&product_id).await {
            Ok(()) => InventoryEvent::ProductDeleted { product_id },
            Err(error) => InventoryEvent::ProductDeleteFailed { product_id, error },
        },
    }
}
