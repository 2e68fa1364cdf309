//! Tests for deck partitioning and export.

use std::path::Path;

use freqdeck_engine::{Engine, EngineOptions, Layout};

fn write_inputs(input: &Path, lemmas: &str, meanings: &str, ipas: &str) {
    std::fs::create_dir_all(input).unwrap();
    std::fs::write(input.join("lemma.txt"), lemmas).unwrap();
    std::fs::write(input.join("meanings.json"), meanings).unwrap();
    std::fs::write(input.join("ipas.json"), ipas).unwrap();
}

fn engine(root: &Path) -> Engine {
    Engine::new().with_layout(Layout::new(root.join("input"), root.join("output")))
}

#[test]
fn test_single_card_deck() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(
        &dir.path().join("input"),
        "1 500 the det\n",
        r#"[{"w": "the", "p": "det", "m": "definite article", "e": "What's the matter?"}]"#,
        r#"{"the-det": "/ðə/"}"#,
    );

    let summaries = engine(dir.path()).decks().build().unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].cards, 1);
    assert_eq!(summaries[0].total_frequency, 500);
    assert_eq!(summaries[0].to_string(), "Deck 1: 1 cards, total frequency 500 (100.0% of total)");

    let content = std::fs::read_to_string(dir.path().join("output/cards_deck_1.txt")).unwrap();
    let fields: Vec<&str> = content.trim_end_matches('\n').split('\t').collect();
    assert_eq!(fields.len(), 12);
    assert_eq!(fields[0], "the-det");
    assert_eq!(fields[1], "the");
    assert_eq!(fields[4], "<img src='the-det.jpg'>");
    assert_eq!(fields[5], "[sound:the-det-word.mp3]");
    assert_eq!(fields[8], "determiner");
    assert_eq!(fields[9], "/ðə/");
    assert_eq!(fields[10], "1");
    assert_eq!(fields[11], "500");
}

#[test]
fn test_decks_cover_every_card_once() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(
        &dir.path().join("input"),
        "3 150 c n\n1 400 a n\n5 50 e n\n2 250 b n\n4 100 d n\n6 50 f n\n",
        "[]",
        "{}",
    );

    let engine = engine(dir.path());
    let summaries = engine.decks().build().unwrap();

    // total 1000, threshold 300: [a] [b] [c, d, e] [f]
    let sizes: Vec<usize> = summaries.iter().map(|s| s.cards).collect();
    assert_eq!(sizes, vec![1, 1, 3, 1]);
    let totals: Vec<u64> = summaries.iter().map(|s| s.total_frequency).collect();
    assert_eq!(totals, vec![400, 250, 300, 50]);

    let mut ids = Vec::new();
    for summary in &summaries {
        assert!(summary.path.ends_with(format!("cards_deck_{}.txt", summary.index)));
        let content = std::fs::read_to_string(&summary.path).unwrap();
        let counts: Vec<u64> = content
            .lines()
            .map(|line| {
                let fields: Vec<&str> = line.split('\t').collect();
                ids.push(fields[0].to_string());
                fields[11].parse().unwrap()
            })
            .collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }
    ids.sort();
    assert_eq!(ids, vec!["a-n", "b-n", "c-n", "d-n", "e-n", "f-n"]);
    assert!(!dir.path().join("output/cards_deck_5.txt").exists());
}

#[test]
fn test_deck_share_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(
        &dir.path().join("input"),
        "1 400 a n\n2 250 b n\n3 150 c n\n4 100 d n\n5 50 e n\n6 50 f n\n",
        "[]",
        "{}",
    );

    let engine = engine(dir.path()).with_options(EngineOptions {
        deck_share: 0.5,
        ..Default::default()
    });
    let plan = engine.decks().plan().unwrap();

    // [a] [b, c, d] [e, f]
    assert_eq!(plan.threshold, 500);
    let totals: Vec<u64> = plan.decks.iter().map(|d| d.total_frequency).collect();
    assert_eq!(totals, vec![400, 500, 100]);
}

#[test]
fn test_empty_lemma_list_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(&dir.path().join("input"), "", "[]", "{}");

    let summaries = engine(dir.path()).decks().build().unwrap();

    assert!(summaries.is_empty());
    assert_eq!(std::fs::read_dir(dir.path().join("output")).unwrap().count(), 0);
}
