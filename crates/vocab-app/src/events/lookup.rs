use kanal::AsyncSender;
use tracing::Instrument;
use uuid::Uuid;
use vocab_types::AppEvent;

use crate::state::AppState;

pub async fn handle_lookup(
    state: &AppState,
    id: Uuid,
    word: String,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let entry = state
        .dictionary
        .lookup_word(&word)
        .instrument(tracing::info_span!("lookup", %id))
        .await;

    tracing::debug!(
        "'{}': {} definitions, {} idioms",
        entry.word,
        entry.definitions.len(),
        entry.idioms.len()
    );

    output_tx.send(AppEvent::ShowEntry(entry)).await?;
    Ok(())
}
