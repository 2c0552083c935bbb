use std::io::Cursor;

use vocab_types::AppEvent;

use crate::io::{parse_line, read_lines};

fn drain(rx: &kanal::Receiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(Some(event)) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn test_plain_line_is_a_lookup() {
    match parse_line("  take off \n") {
        Some(AppEvent::Lookup { word, .. }) => assert_eq!(word, "take off"),
        other => panic!("Wrong event type: {:?}", other),
    }
}

#[test]
fn test_commands() {
    assert!(parse_line("").is_none());
    assert!(parse_line("   ").is_none());
    assert!(matches!(parse_line(":cache"), Some(AppEvent::CacheStatus)));
    assert!(matches!(parse_line(":clear"), Some(AppEvent::ClearCache)));
    assert!(matches!(parse_line(":quit"), Some(AppEvent::Quit)));

    match parse_line(":t  good morning ") {
        Some(AppEvent::Translate {
            text,
            from_lang,
            to_lang,
            ..
        }) => {
            assert_eq!(text, "good morning");
            assert!(from_lang.is_none());
            assert!(to_lang.is_none());
        }
        other => panic!("Wrong event type: {:?}", other),
    }
}

#[test]
fn test_requests_get_distinct_ids() {
    let ids: Vec<_> = ["run", "run"]
        .into_iter()
        .filter_map(parse_line)
        .map(|event| match event {
            AppEvent::Lookup { id, .. } => id,
            other => panic!("Wrong event type: {:?}", other),
        })
        .collect();

    assert_ne!(ids[0], ids[1]);
}

#[test]
fn test_end_of_input_sends_quit() {
    let (tx, rx) = kanal::unbounded::<AppEvent>();

    read_lines(Cursor::new("run\n\n:t hello\n:cache\n"), &tx);

    let events = drain(&rx);
    assert_eq!(events.len(), 4);
    assert!(matches!(&events[0], AppEvent::Lookup { word, .. } if word == "run"));
    assert!(matches!(&events[1], AppEvent::Translate { text, .. } if text == "hello"));
    assert!(matches!(events[2], AppEvent::CacheStatus));
    assert!(matches!(events[3], AppEvent::Quit));
}

#[test]
fn test_quit_stops_reading() {
    let (tx, rx) = kanal::unbounded::<AppEvent>();

    read_lines(Cursor::new(":quit\nrun\n"), &tx);

    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], AppEvent::Quit));
}
