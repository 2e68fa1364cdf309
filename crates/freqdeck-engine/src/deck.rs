//! Frequency-balanced deck partitioning and export.
//!
//! Cards are sorted by descending corpus frequency and packed greedily into
//! decks. A deck is closed as soon as the next card would push its summed
//! frequency above `deck_share` of the total, so the first deck holds the few
//! most frequent words and later decks hold ever more, rarer words.
//!
//! Each deck is written as a tab-separated file that Anki can import, one
//! card per line:
//!
//! ```text
//! id  word  meaning  example  <img src='id.jpg'>  [sound:id-word.mp3]  [sound:id-meaning.mp3]  [sound:id-example.mp3]  pos  ipa  rank  count
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use freqdeck::{AssetKind, part_of_speech_label};
use serde::Serialize;
use tracing::info;

use crate::lemma::Lemma;
use crate::store::{IpaStore, MeaningStore};
use crate::{Engine, Result};

/// A lemma joined with its generated content.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// The lemma the card is built from.
    pub lemma: Lemma,
    /// The meaning, or empty if none was generated.
    pub meaning: String,
    /// The example sentence, or empty if none was generated.
    pub example: String,
    /// The phonetic transcription, or empty if none was found.
    pub ipa: String,
}

impl Card {
    /// The identity key.
    pub fn id(&self) -> String {
        self.lemma.id()
    }

    /// Frequency count of the word.
    pub fn count(&self) -> u64 {
        self.lemma.count
    }

    /// The card as one tab-separated import line, without line terminator.
    pub fn to_line(&self) -> String {
        let word = &self.lemma.word;
        let sound = |kind| format!("[sound:{}]", word.asset(kind));
        [
            self.id(),
            word.text.clone(),
            self.meaning.clone(),
            self.example.clone(),
            format!("<img src='{}'>", word.asset(AssetKind::Image)),
            sound(AssetKind::WordAudio),
            sound(AssetKind::MeaningAudio),
            sound(AssetKind::ExampleAudio),
            part_of_speech_label(&word.part_of_speech).to_string(),
            self.ipa.clone(),
            self.lemma.rank.to_string(),
            self.lemma.count.to_string(),
        ]
        .join("\t")
    }
}

/// Join lemmas with their meanings and transcriptions.
///
/// Missing meanings or transcriptions become empty strings.
pub fn build_cards(lemmas: &[Lemma], meanings: &MeaningStore, ipas: &IpaStore) -> Vec<Card> {
    lemmas
        .iter()
        .map(|lemma| {
            let id = lemma.id();
            let meaning = meanings.get(&id);
            Card {
                lemma: lemma.clone(),
                meaning: meaning.map(|m| m.meaning.clone()).unwrap_or_default(),
                example: meaning.map(|m| m.example.clone()).unwrap_or_default(),
                ipa: ipas.get(&id).unwrap_or_default().to_string(),
            }
        })
        .collect()
}

/// A non-empty group of cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    /// 1-based deck number.
    pub index: usize,
    /// Cards in descending frequency order.
    pub cards: Vec<Card>,
    /// Summed frequency of the cards.
    pub total_frequency: u64,
}

/// The result of [`partition`].
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// The decks, in order.
    pub decks: Vec<Deck>,
    /// Summed frequency of all cards.
    pub total_frequency: u64,
    /// The largest total a deck of more than one card may have.
    pub threshold: u64,
}

/// Split cards into decks of bounded summed frequency.
///
/// Cards are sorted by descending count (ties keep their input order). A deck
/// never exceeds `floor(total * share)` unless it consists of a single card
/// that exceeds it on its own.
pub fn partition(mut cards: Vec<Card>, share: f64) -> Partition {
    cards.sort_by(|a, b| b.count().cmp(&a.count()));

    let total_frequency = cards
        .iter()
        .fold(0u64, |total, card| total.saturating_add(card.count()));
    let threshold = (total_frequency as f64 * share) as u64;

    let mut decks = Vec::new();
    let mut current: Vec<Card> = Vec::new();
    let mut current_total = 0u64;

    for card in cards {
        if current_total.saturating_add(card.count()) > threshold && !current.is_empty() {
            decks.push(Deck {
                index: decks.len() + 1,
                cards: std::mem::take(&mut current),
                total_frequency: current_total,
            });
            current_total = 0;
        }
        current_total = current_total.saturating_add(card.count());
        current.push(card);
    }

    if !current.is_empty() {
        decks.push(Deck {
            index: decks.len() + 1,
            cards: current,
            total_frequency: current_total,
        });
    }

    Partition {
        decks,
        total_frequency,
        threshold,
    }
}

/// What was written for one deck.
#[derive(Debug, Clone, Serialize)]
pub struct DeckSummary {
    /// 1-based deck number.
    pub index: usize,
    /// The written file.
    pub path: PathBuf,
    /// Number of cards.
    pub cards: usize,
    /// Summed frequency of the cards.
    pub total_frequency: u64,
    /// `total_frequency` as a percentage of all cards' frequency.
    pub percent_of_total: f64,
}

impl fmt::Display for DeckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deck {}: {} cards, total frequency {} ({:.1}% of total)",
            self.index, self.cards, self.total_frequency, self.percent_of_total
        )
    }
}

/// File name of a deck.
pub fn deck_file_name(index: usize) -> String {
    format!("cards_deck_{}.txt", index)
}

/// Deck workflow engine.
#[derive(Debug)]
pub struct DeckEngine<'a> {
    engine: &'a Engine,
}

impl<'a> DeckEngine<'a> {
    pub(crate) fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    /// Build cards from the lemma list and stores and partition them.
    pub fn plan(&self) -> Result<Partition> {
        let lemmas = self.engine.lemmas()?;
        let meanings = self.engine.meaning_store()?;
        let ipas = self.engine.ipa_store()?;
        let cards = build_cards(&lemmas, &meanings, &ipas);
        Ok(partition(cards, self.engine.options().deck_share))
    }

    /// Build the decks and write them to the output directory.
    pub fn build(&self) -> Result<Vec<DeckSummary>> {
        let plan = self.plan()?;
        self.write(&plan)
    }

    /// Write each deck of a partition to `cards_deck_N.txt`.
    pub fn write(&self, plan: &Partition) -> Result<Vec<DeckSummary>> {
        let output_dir = &self.engine.layout().output_dir;
        std::fs::create_dir_all(output_dir)?;

        let mut summaries = Vec::with_capacity(plan.decks.len());
        for deck in &plan.decks {
            let path = output_dir.join(deck_file_name(deck.index));
            let mut writer = BufWriter::new(File::create(&path)?);
            for card in &deck.cards {
                writeln!(writer, "{}", card.to_line())?;
            }
            writer.flush()?;

            let percent_of_total = if plan.total_frequency == 0 {
                0.0
            } else {
                deck.total_frequency as f64 / plan.total_frequency as f64 * 100.0
            };
            let summary = DeckSummary {
                index: deck.index,
                path,
                cards: deck.cards.len(),
                total_frequency: deck.total_frequency,
                percent_of_total,
            };
            info!(
                deck = summary.index,
                cards = summary.cards,
                total_frequency = summary.total_frequency,
                "wrote deck"
            );
            summaries.push(summary);
        }

        Ok(summaries)
    }
}
