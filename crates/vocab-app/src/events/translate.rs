use kanal::AsyncSender;
use tracing::Instrument;
use uuid::Uuid;
use vocab_types::AppEvent;

use crate::state::AppState;

pub async fn handle_translate(
    state: &AppState,
    id: Uuid,
    text: String,
    from_lang: Option<String>,
    to_lang: Option<String>,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let result = state
        .dictionary
        .translate_text(&text, from_lang.as_deref(), to_lang.as_deref())
        .instrument(tracing::info_span!("translate", %id))
        .await;

    output_tx.send(AppEvent::ShowTranslation(result)).await?;
    Ok(())
}
