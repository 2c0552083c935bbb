use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use vocab_config::Config;
use vocab_core::{Browser, BrowserError, BrowserLauncher};
use vocab_types::{AppEvent, NOT_FOUND_MESSAGE, TRANSLATION_FAILED, WordEntry};

use crate::events::event_loop;
use crate::io::write_output;
use crate::state::AppState;

struct NoBrowser;

#[async_trait]
impl BrowserLauncher for NoBrowser {
    async fn launch(&self) -> Result<Arc<dyn Browser>, BrowserError> {
        Err(BrowserError::Launch("no browser in tests".to_string()))
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

fn offline_state() -> Arc<AppState> {
    Arc::new(AppState::with_launcher(Config::default(), Arc::new(NoBrowser)).unwrap())
}

async fn next(rx: &kanal::AsyncReceiver<AppEvent>) -> AppEvent {
    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout waiting for event"),
    }
}

#[tokio::test]
async fn test_events_answer_in_order() {
    let (input_tx, input_rx) = kanal::unbounded_async::<AppEvent>();
    let (output_tx, output_rx) = kanal::unbounded_async::<AppEvent>();

    let task = tokio::spawn(event_loop(
        offline_state(),
        input_rx,
        output_tx,
        CancellationToken::new(),
    ));

    input_tx
        .send(AppEvent::Lookup {
            id: Uuid::new_v4(),
            word: "run".to_string(),
        })
        .await
        .unwrap();
    input_tx
        .send(AppEvent::Translate {
            id: Uuid::new_v4(),
            text: "hello".to_string(),
            from_lang: None,
            to_lang: Some("fr".to_string()),
        })
        .await
        .unwrap();
    input_tx.send(AppEvent::CacheStatus).await.unwrap();
    input_tx.send(AppEvent::ClearCache).await.unwrap();
    input_tx.send(AppEvent::Quit).await.unwrap();

    match next(&output_rx).await {
        AppEvent::ShowEntry(entry) => {
            assert_eq!(entry.word, "run");
            assert!(entry.definitions.is_empty());
            let error = entry.error.unwrap();
            assert!(error.starts_with("Failed to look up word:"), "{error}");
        }
        other => panic!("Wrong event type: {:?}", other),
    }

    match next(&output_rx).await {
        AppEvent::ShowTranslation(result) => {
            assert_eq!(result.original, "hello");
            assert_eq!(result.translation, TRANSLATION_FAILED);
        }
        other => panic!("Wrong event type: {:?}", other),
    }

    assert!(matches!(next(&output_rx).await, AppEvent::ShowCacheSize(0)));
    assert!(matches!(next(&output_rx).await, AppEvent::ShowCacheSize(0)));
    assert!(matches!(next(&output_rx).await, AppEvent::Quit));

    timeout(Duration::from_secs(2), task)
        .await
        .expect("event loop did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_event_loop_stops_on_cancel() {
    let (_input_tx, input_rx) = kanal::unbounded_async::<AppEvent>();
    let (output_tx, _output_rx) = kanal::unbounded_async::<AppEvent>();
    let cancel = CancellationToken::new();

    let task = tokio::spawn(event_loop(
        offline_state(),
        input_rx,
        output_tx,
        cancel.child_token(),
    ));

    cancel.cancel();

    let result = timeout(Duration::from_secs(2), task).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}

#[tokio::test]
async fn test_output_prints_until_quit() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let mut buf: Vec<u8> = Vec::new();

    tx.send(AppEvent::ShowCacheSize(3)).await.unwrap();
    tx.send(AppEvent::ShowEntry(WordEntry::not_found("zzz")))
        .await
        .unwrap();
    tx.send(AppEvent::Quit).await.unwrap();
    tx.send(AppEvent::ShowCacheSize(9)).await.unwrap();

    write_output(&mut buf, rx, CancellationToken::new())
        .await
        .unwrap();

    let printed = String::from_utf8(buf).unwrap();
    assert!(printed.starts_with("3 words cached\n"));
    assert!(printed.contains(r#""word": "zzz""#));
    assert!(printed.contains(&format!(r#""error": "{NOT_FOUND_MESSAGE}""#)));
    assert!(!printed.contains("9 words cached"));
}
