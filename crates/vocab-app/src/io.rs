use std::io::BufRead;
use std::thread::JoinHandle;

use kanal::{AsyncReceiver, AsyncSender, Sender};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use vocab_types::AppEvent;

const TRANSLATE_PREFIX: &str = ":t ";

/// One input line to an event. Blank lines are ignored.
///
/// `:t <text>` translates, `:cache` reports the cache size, `:clear` empties
/// it, `:quit` ends the session and anything else is looked up as a word.
pub fn parse_line(line: &str) -> Option<AppEvent> {
    let line = line.trim();

    match line {
        "" => None,
        ":quit" | ":q" => Some(AppEvent::Quit),
        ":cache" => Some(AppEvent::CacheStatus),
        ":clear" => Some(AppEvent::ClearCache),
        _ => match line.strip_prefix(TRANSLATE_PREFIX) {
            Some(text) => Some(AppEvent::Translate {
                id: Uuid::new_v4(),
                text: text.trim().to_string(),
                from_lang: None,
                to_lang: None,
            }),
            None => Some(AppEvent::Lookup {
                id: Uuid::new_v4(),
                word: line.to_string(),
            }),
        },
    }
}

/// Forward parsed lines until `:quit` or end of input. Always ends with `Quit`.
pub fn read_lines<R: BufRead>(reader: R, tx: &Sender<AppEvent>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to read input: {e}");
                break;
            }
        };

        let Some(event) = parse_line(&line) else {
            continue;
        };

        let quit = matches!(event, AppEvent::Quit);
        if tx.send(event).is_err() || quit {
            return;
        }
    }

    tracing::debug!("Input closed");
    let _ = tx.send(AppEvent::Quit);
}

/// Stdin is read on a plain thread: a pending read never blocks runtime shutdown
pub fn spawn_stdin_reader(tx: AsyncSender<AppEvent>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let tx = tx.to_sync();
        read_lines(std::io::stdin().lock(), &tx);
    })
}

/// Print results until `Quit` arrives or the session is cancelled
pub async fn write_output<W>(
    mut writer: W,
    output_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = output_rx.recv() => event?,
        };

        if matches!(event, AppEvent::Quit) {
            break;
        }

        if let Some(text) = render(&event)? {
            writer.write_all(text.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    writer.flush().await?;
    Ok(())
}

pub fn render(event: &AppEvent) -> anyhow::Result<Option<String>> {
    let text = match event {
        AppEvent::ShowEntry(entry) => serde_json::to_string_pretty(entry)?,
        AppEvent::ShowTranslation(result) => serde_json::to_string_pretty(result)?,
        AppEvent::ShowCacheSize(size) => format!("{size} words cached"),
        _ => return Ok(None),
    };

    Ok(Some(text))
}
