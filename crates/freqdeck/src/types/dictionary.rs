//! Dictionary response types.

use serde::Deserialize;

/// One entry of a dictionary lookup response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryEntry {
    /// Preferred transcription, when the dictionary provides one.
    #[serde(default)]
    pub phonetic: Option<String>,
    /// Alternative transcriptions (often per accent, some with audio only).
    #[serde(default)]
    pub phonetics: Vec<PhoneticText>,
}

/// A transcription variant within a [`DictionaryEntry`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhoneticText {
    /// The transcription text; absent for audio-only variants.
    #[serde(default)]
    pub text: Option<String>,
}

/// Pick the transcription to show on a card.
///
/// Uses the first entry's `phonetic` if it is non-empty, otherwise the first
/// non-empty variant text of that entry, otherwise an empty string.
pub fn best_transcription(entries: &[DictionaryEntry]) -> String {
    let Some(entry) = entries.first() else {
        return String::new();
    };

    if let Some(phonetic) = entry.phonetic.as_deref().filter(|p| !p.is_empty()) {
        return phonetic.to_string();
    }

    entry
        .phonetics
        .iter()
        .filter_map(|p| p.text.as_deref())
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}
