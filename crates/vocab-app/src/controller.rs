use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use vocab_types::AppEvent;

use crate::events::event_loop;
use crate::io::{spawn_stdin_reader, write_output};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub input_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_output: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            input_to_app: kanal::bounded_async(64),   // pasted word lists
            app_to_output: kanal::bounded_async(16),
        }
    }
}

/// Task spawning and lifecycle for the interactive session
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.input_to_app.1.clone(),
            self.channels.app_to_output.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks.spawn(write_output(
            tokio::io::stdout(),
            self.channels.app_to_output.1.clone(),
            self.cancel_token.child_token(),
        ));

        // detached: a blocked stdin read must not hold up shutdown
        spawn_stdin_reader(self.channels.input_to_app.0.clone());

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
