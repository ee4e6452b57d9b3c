//! Property tests for chunking.
//!
//! Verifies, for markdown-flavoured random input:
//! 1. The raw event sequence is identical however the input is split
//! 2. The event stream is well formed (closes match opens)
//! 3. Input without marker characters passes through as plain text

use markdown_trickle_parser::{BlockKind, Event, InlineKind, StreamParser};
use proptest::prelude::*;

/// Input built from marker-heavy fragments so that runs get split often.
fn gen_markdown() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("#".to_string()),
        Just("*".to_string()),
        Just("`".to_string()),
        Just("```".to_string()),
        Just("-".to_string()),
        Just("1.".to_string()),
        Just(" ".to_string()),
        Just("\n".to_string()),
        Just("é".to_string()),
        Just("日本".to_string()),
        "[a-z]{1,4}",
    ];
    prop::collection::vec(fragment, 0..48).prop_map(|parts| parts.concat())
}

/// Feed `input` split at the given char offsets and finish.
fn run_chunked(input: &str, cuts: &[usize]) -> Vec<Event> {
    let chars: Vec<char> = input.chars().collect();
    let mut offsets: Vec<usize> = cuts
        .iter()
        .map(|cut| cut % (chars.len() + 1))
        .collect();
    offsets.push(0);
    offsets.push(chars.len());
    offsets.sort_unstable();
    offsets.dedup();

    let mut parser = StreamParser::new();
    let mut events = Vec::new();
    for window in offsets.windows(2) {
        let chunk: String = chars[window[0]..window[1]].iter().collect();
        parser.feed(&chunk, &mut events).unwrap();
    }
    parser.finish(&mut events).unwrap();
    events
}

/// Replays events against a model of the open containers.
fn check_well_formed(events: &[Event]) -> Result<(), String> {
    let mut block: Option<&BlockKind> = None;
    let mut spans: Vec<InlineKind> = Vec::new();

    for (idx, event) in events.iter().enumerate() {
        match event {
            Event::OpenBlock(kind) => {
                if let Some(open) = block {
                    return Err(format!("event {idx}: opened {kind} while {open} is open"));
                }
                block = Some(kind);
            }
            Event::CloseBlock => {
                if block.take().is_none() {
                    return Err(format!("event {idx}: close with no open block"));
                }
                spans.clear();
            }
            Event::OpenInline(kind) => {
                if block.is_none() {
                    return Err(format!("event {idx}: {kind} opened outside a block"));
                }
                spans.push(*kind);
            }
            Event::CloseInline(kind) => match spans.iter().rposition(|open| open == kind) {
                Some(pos) => {
                    spans.remove(pos);
                }
                None => return Err(format!("event {idx}: close of unopened {kind}")),
            },
            Event::Text(text) => {
                if text.is_empty() {
                    return Err(format!("event {idx}: empty text"));
                }
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn events_do_not_depend_on_chunking(
        input in gen_markdown(),
        cuts in prop::collection::vec(0usize..256, 0..12),
    ) {
        let whole = run_chunked(&input, &[]);
        let split = run_chunked(&input, &cuts);
        prop_assert_eq!(&whole, &split, "input {:?} cut at {:?}", input, cuts);
    }

    #[test]
    fn single_char_feeding_matches_whole(input in gen_markdown()) {
        let every: Vec<usize> = (0..input.chars().count()).collect();
        prop_assert_eq!(run_chunked(&input, &[]), run_chunked(&input, &every));
    }

    #[test]
    fn event_stream_is_well_formed(input in gen_markdown()) {
        let events = run_chunked(&input, &[]);
        if let Err(problem) = check_well_formed(&events) {
            prop_assert!(false, "{} for input {:?}", problem, input);
        }
    }

    #[test]
    fn plain_text_passes_through(input in "[a-zA-Z ,!?\n]{0,64}") {
        let events = run_chunked(&input, &[3, 7, 11]);
        let text: String = events
            .iter()
            .filter_map(|event| match event {
                Event::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(text, input);
    }
}
