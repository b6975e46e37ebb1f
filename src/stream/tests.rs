//! 流式解析层集成测试
//!
//! 在 scanner + tracker + events 组合层面验证端到端性质：
//! 单调性、增量无标记泄漏、回放一致性、标记跨分片挂起。

use super::assembler::{assemble_chapter_intro, MarkerCompat};
use super::events::StudyEvent;
use super::scanner::SectionScanner;
use super::sections::{SectionKind, CHAPTER_INTRO};
use super::tracker::{DeltaTracker, Emission};
use proptest::prelude::*;

/// 服务层事件循环的最小复刻：喂入分片，产出下发事件
fn run_marker_pipeline(chunks: &[&str]) -> (Vec<StudyEvent>, SectionScanner) {
    let mut scanner = SectionScanner::new(&CHAPTER_INTRO);
    let mut tracker = DeltaTracker::new();
    let mut events = Vec::new();

    let pump = |scanner: &SectionScanner, tracker: &mut DeltaTracker, out: &mut Vec<StudyEvent>| {
        let pending_owner = scanner.pending_owner();
        for view in scanner.sections() {
            let held = pending_owner == Some(view.spec.name);
            match tracker.advance(&view, held) {
                Some(Emission::Delta { text }) => out.push(StudyEvent::SectionUpdate {
                    section: view.spec.name.to_string(),
                    content: text,
                    is_complete: view.closed,
                }),
                Some(Emission::Full { text }) => out.push(StudyEvent::HeaderUpdate {
                    section: view.spec.name.to_string(),
                    content: text,
                }),
                None => {}
            }
        }
    };

    for chunk in chunks {
        scanner.push(chunk);
        pump(&scanner, &mut tracker, &mut events);
    }
    scanner.finish();
    pump(&scanner, &mut tracker, &mut events);

    let intro = assemble_chapter_intro(&scanner, MarkerCompat::Keep);
    events.push(StudyEvent::Complete {
        data: serde_json::to_value(intro).unwrap(),
    });
    (events, scanner)
}

/// 把完整文本按给定字节步长切片（对齐到字符边界）
fn split_by_steps(full: &str, steps: &[usize]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut i = 0;
    let mut k = 0;
    while i < full.len() {
        let step = steps.get(k).copied().unwrap_or(3).max(1);
        k += 1;
        let mut j = (i + step).min(full.len());
        while !full.is_char_boundary(j) {
            j += 1;
        }
        chunks.push(full[i..j].to_string());
        i = j;
    }
    chunks
}

const CANONICAL: &str = "[MAIN_HEADING]God Creates the World[/MAIN_HEADING]\n\
    [TIMELINE_INFO]c. 1400 BC, traditionally Moses[/TIMELINE_INFO]\n\
    [CULTURAL_CONTEXT]In the ancient Near East, creation stories were told \
    in temples.[WHAT_MIGHT_SEEM_STRANGE]Light appears before the sun.\
    [KEY_INSIGHTS]Watch the sevenfold refrain.[WHY_THIS_MATTERS_TODAY]Order \
    is not an accident.[/WHY_THIS_MATTERS_TODAY]";

proptest! {
    /// 任意切分下，段落内容只会前缀式增长，最终内容与一次性喂入一致
    #[test]
    fn prop_extraction_is_monotonic_and_split_invariant(
        steps in prop::collection::vec(1usize..24, 1..64)
    ) {
        let chunks = split_by_steps(CANONICAL, &steps);

        let mut scanner = SectionScanner::new(&CHAPTER_INTRO);
        let mut prev: Vec<(String, String)> = Vec::new();
        for chunk in &chunks {
            scanner.push(chunk);
            let now: Vec<(String, String)> = scanner
                .sections()
                .iter()
                .map(|v| (v.spec.name.to_string(), v.content.to_string()))
                .collect();
            for (name, old) in &prev {
                let new = now
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, c)| c.as_str())
                    .unwrap_or("");
                prop_assert!(new.starts_with(old.as_str()));
            }
            prev = now;
        }
        scanner.finish();

        let mut oneshot = SectionScanner::new(&CHAPTER_INTRO);
        oneshot.push(CANONICAL);
        oneshot.finish();
        for view in oneshot.sections() {
            let split_view = scanner.section(view.spec.name);
            prop_assert_eq!(split_view.map(|v| v.content.to_string()),
                Some(view.content.to_string()));
        }
    }

    /// 任意切分下，增量事件不含 `[`/`]`，且回放增量恰好重建各段最终内容
    #[test]
    fn prop_deltas_are_clean_and_replay_exactly(
        steps in prop::collection::vec(1usize..24, 1..64)
    ) {
        let chunks = split_by_steps(CANONICAL, &steps);
        let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let (events, scanner) = run_marker_pipeline(&refs);

        let mut replayed: std::collections::HashMap<String, String> = Default::default();
        for event in &events {
            if let StudyEvent::SectionUpdate { section, content, .. } = event {
                prop_assert!(!content.contains('['));
                prop_assert!(!content.contains(']'));
                replayed.entry(section.clone()).or_default().push_str(content);
            }
        }
        for view in scanner.sections() {
            if view.spec.kind == SectionKind::Body {
                prop_assert_eq!(
                    replayed.get(view.spec.name).map(String::as_str).unwrap_or(""),
                    view.content
                );
            }
        }
    }
}

#[test]
fn test_scenario_split_headers_emit_once_with_full_value() {
    let (events, _) = run_marker_pipeline(&[
        "[MAIN_HEADING]Go",
        "d Creates[/MAIN_HEADING][TIMELINE_INFO]c. 1400",
        " BC[/TIMELINE_INFO]",
    ]);

    let headers: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            StudyEvent::HeaderUpdate { section, content } => {
                Some((section.as_str(), content.as_str()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        headers,
        vec![("MainHeading", "God Creates"), ("TimelineInfo", "c. 1400 BC")]
    );
}

#[test]
fn test_scenario_marker_split_across_three_chunks_is_held_not_dropped() {
    let (events, _) = run_marker_pipeline(&[
        "[CULTURAL_CONTEXT]saw that it was good and [",
        "WHAT_MIGHT",
        "_SEEM_STRANGE]Light first.",
    ]);

    let cultural: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            StudyEvent::SectionUpdate { section, content, .. }
                if section == "CulturalContext" =>
            {
                Some(content.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(cultural, vec!["saw that it was good and"]);
    assert!(events
        .iter()
        .all(|e| !matches!(e, StudyEvent::Error { .. })));
}

#[test]
fn test_exactly_one_terminal_event_and_it_is_last() {
    let (events, _) = run_marker_pipeline(&[CANONICAL]);
    let terminals = events.iter().filter(|e| e.is_terminal()).count();
    assert_eq!(terminals, 1);
    assert!(events.last().unwrap().is_terminal());
}

#[test]
fn test_complete_data_matches_final_assembly() {
    let (events, scanner) = run_marker_pipeline(&[CANONICAL]);
    let intro = assemble_chapter_intro(&scanner, MarkerCompat::Keep);
    match events.last().unwrap() {
        StudyEvent::Complete { data } => {
            assert_eq!(data, &serde_json::to_value(intro).unwrap());
        }
        other => panic!("expected complete, got {other:?}"),
    }
}
