use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use vocab_types::AppEvent;

use crate::state::AppState;

pub mod lookup;
pub mod translate;

use lookup::handle_lookup;
use translate::handle_translate;

/// App's main loop. Ends on `Quit`, which is passed on to the output side.
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::debug!("Event loop started");

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Event loop cancelled");
                return Ok(());
            }
            event = input_rx.recv() => event?,
        };

        if matches!(event, AppEvent::Quit) {
            output_tx.send(AppEvent::Quit).await?;
            return Ok(());
        }

        handle_events(&state, &output_tx, event).await?;
    }
}

async fn handle_events(
    state: &AppState,
    output_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Lookup { id, word } => {
            handle_lookup(state, id, word, output_tx).await?;
        }
        AppEvent::Translate {
            id,
            text,
            from_lang,
            to_lang,
        } => {
            handle_translate(state, id, text, from_lang, to_lang, output_tx).await?;
        }
        AppEvent::CacheStatus => {
            let size = state.dictionary.cache_len();
            output_tx.send(AppEvent::ShowCacheSize(size)).await?;
        }
        AppEvent::ClearCache => {
            state.dictionary.clear_cache();
            tracing::info!("Cache cleared");
            output_tx
                .send(AppEvent::ShowCacheSize(state.dictionary.cache_len()))
                .await?;
        }
        AppEvent::ShowEntry(_) | AppEvent::ShowTranslation(_) | AppEvent::ShowCacheSize(_) => {
            // output-only
        }
        AppEvent::Quit => {}
    }

    Ok(())
}
