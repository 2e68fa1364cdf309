//! Vocabulary types shared by every freqdeck component.

use serde::{Deserialize, Serialize};

/// A word together with its part-of-speech code, e.g. `the` / `det`.
///
/// The pair forms the identity key used to correlate a word across the
/// lemma list, the meanings store, the IPA map and the downloaded assets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    /// The word as written in the lemma list.
    #[serde(rename = "w")]
    pub text: String,
    /// Short part-of-speech code (`n`, `v`, `det`, ...).
    #[serde(rename = "p")]
    pub part_of_speech: String,
}

impl Word {
    /// Create a new word.
    pub fn new(text: impl Into<String>, part_of_speech: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            part_of_speech: part_of_speech.into(),
        }
    }

    /// The identity key, `text-partOfSpeech`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.text, self.part_of_speech)
    }

    /// Filename of an asset belonging to this word.
    pub fn asset(&self, kind: AssetKind) -> String {
        kind.filename(&self.id())
    }
}

/// A word with a generated definition and example sentence.
///
/// Serialized as a flat object `{"w", "p", "m", "e"}`, which is both the
/// shape of the meanings store and the shape the chat model is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    /// The word this meaning belongs to.
    #[serde(flatten)]
    pub word: Word,
    /// Short definition.
    #[serde(rename = "m", default)]
    pub meaning: String,
    /// Example sentence; doubles as the image prompt.
    #[serde(rename = "e", default)]
    pub example: String,
}

impl Meaning {
    /// Create a new meaning.
    pub fn new(word: Word, meaning: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            word,
            meaning: meaning.into(),
            example: example.into(),
        }
    }

    /// The identity key of the underlying word.
    pub fn id(&self) -> String {
        self.word.id()
    }

    /// The text spoken for a given audio asset.
    ///
    /// Returns `None` for [`AssetKind::Image`].
    pub fn spoken_text(&self, kind: AssetKind) -> Option<&str> {
        match kind {
            AssetKind::WordAudio => Some(&self.word.text),
            AssetKind::MeaningAudio => Some(&self.meaning),
            AssetKind::ExampleAudio => Some(&self.example),
            AssetKind::Image => None,
        }
    }
}

/// The media files derived from a word's identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// `{id}-word.mp3`
    WordAudio,
    /// `{id}-meaning.mp3`
    MeaningAudio,
    /// `{id}-example.mp3`
    ExampleAudio,
    /// `{id}.jpg`
    Image,
}

impl AssetKind {
    /// The three audio assets, in download order.
    pub const AUDIO: [AssetKind; 3] = [
        AssetKind::WordAudio,
        AssetKind::MeaningAudio,
        AssetKind::ExampleAudio,
    ];

    /// Filename of this asset for the given identity key.
    pub fn filename(self, id: &str) -> String {
        match self {
            AssetKind::WordAudio => format!("{}-word.mp3", id),
            AssetKind::MeaningAudio => format!("{}-meaning.mp3", id),
            AssetKind::ExampleAudio => format!("{}-example.mp3", id),
            AssetKind::Image => format!("{}.jpg", id),
        }
    }
}

/// Human-readable label for a part-of-speech code.
///
/// Unknown codes are returned unchanged.
pub fn part_of_speech_label(code: &str) -> &str {
    match code {
        "n" => "noun",
        "v" => "verb",
        "a" => "adjective",
        "adv" => "adverb",
        "conj" => "conjunction",
        "interjection" => "interjection",
        "pron" => "pronoun",
        "prep" => "preposition",
        "modal" => "modal verb",
        "co" => "coordinating conjunction",
        "det" => "determiner",
        "infinitive-marker" => "infinitive marker",
        other => other,
    }
}
