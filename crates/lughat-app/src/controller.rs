use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lughat_config::Config;
use lughat_core::store::{LanguageStore, Subscription};
use lughat_core::types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{EventContext, event_loop};
use crate::io::store_callback;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub store_feed: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(config: &Config) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(config.view_capacity.max(1)), // snapshot bursts
            ui_to_app: kanal::bounded_async(config.event_capacity.max(1)), // user requests
            store_feed: kanal::unbounded_async(),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    store: Arc<dyn LanguageStore>,
    subscription: Option<Subscription>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, store: Arc<dyn LanguageStore>, channels: ChannelSet) -> Self {
        Self {
            channels,
            state,
            store,
            subscription: None,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Start listening to the store; the current snapshot is queued at once
    pub fn attach_store(&mut self) {
        let callback = store_callback(self.channels.store_feed.0.clone());
        self.subscription = Some(self.store.subscribe(callback));
        tracing::info!("Subscribed to language store");
    }

    /// Sender the presentation side uses to talk to the app
    pub fn sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    /// Receiver of everything the app sends to the presentation side
    pub fn receiver(&self) -> AsyncReceiver<AppEvent> {
        self.channels.app_to_ui.1.clone()
    }

    pub fn context(&self) -> EventContext {
        EventContext {
            state: self.state.clone(),
            store: self.store.clone(),
            app_to_ui_tx: self.channels.app_to_ui.0.clone(),
        }
    }

    pub fn spawn_event_loop(&self, tasks: &mut JoinSet<anyhow::Result<()>>) {
        tasks.spawn(event_loop(
            self.context(),
            self.channels.ui_to_app.1.clone(),
            self.channels.store_feed.1.clone(),
            self.cancel_token.child_token(),
        ));
    }

    pub fn spawn_tasks(&self, show_view: bool) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        self.spawn_event_loop(&mut tasks);

        // UI loop
        tasks.spawn(ui_loop(self.channels.app_to_ui.1.clone(), show_view));

        tasks
    }

    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.cancel_token.cancel();
    }
}
