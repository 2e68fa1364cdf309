//! Lemma list parsing.
//!
//! The lemma list has one entry per line: `rank amount word posCode`, for
//! example `1 500 the det`.

use freqdeck::Word;

use crate::{Error, Result};

/// File name of the lemma list.
pub const LEMMA_FILE: &str = "lemma.txt";

/// A frequency-ranked vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lemma {
    /// Frequency rank as given in the list.
    pub rank: u32,
    /// Number of occurrences in the corpus.
    pub count: u64,
    /// The word and its part-of-speech code.
    pub word: Word,
}

impl Lemma {
    /// The identity key of the word.
    pub fn id(&self) -> String {
        self.word.id()
    }
}

/// Parse a lemma list, keeping file order.
///
/// Blank lines are skipped. A line with fewer than four fields, or with a
/// non-numeric rank or amount, fails the whole parse.
pub fn parse_lemmas(text: &str) -> Result<Vec<Lemma>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_line(line).map_err(|reason| Error::Lemma {
                line: i + 1,
                reason,
            })
        })
        .collect()
}

fn parse_line(line: &str) -> std::result::Result<Lemma, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [rank, count, word, pos, ..] = fields.as_slice() else {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    };

    let rank = rank
        .parse::<u32>()
        .map_err(|e| format!("invalid rank '{}': {}", rank, e))?;
    let count = count
        .parse::<u64>()
        .map_err(|e| format!("invalid amount '{}': {}", count, e))?;

    Ok(Lemma {
        rank,
        count,
        word: Word::new(*word, *pos),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_file_order() {
        let lemmas = parse_lemmas("2 300 of prep\n1 500 the det\n").unwrap();
        assert_eq!(lemmas.len(), 2);
        assert_eq!(lemmas[0].rank, 2);
        assert_eq!(lemmas[0].id(), "of-prep");
        assert_eq!(lemmas[1].count, 500);
        assert_eq!(lemmas[1].word, Word::new("the", "det"));
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let lemmas = parse_lemmas("1 500 the det\r\n\r\n2 300 of prep\r\n").unwrap();
        assert_eq!(lemmas.len(), 2);
        assert_eq!(lemmas[1].word.part_of_speech, "prep");
    }

    #[test]
    fn test_short_line_fails_with_line_number() {
        let err = parse_lemmas("1 500 the det\n2 300 of\n").unwrap_err();
        match err {
            Error::Lemma { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("4 fields"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_numeric_fields_fail() {
        assert!(matches!(
            parse_lemmas("one 500 the det"),
            Err(Error::Lemma { line: 1, .. })
        ));
        assert!(matches!(
            parse_lemmas("1 lots the det"),
            Err(Error::Lemma { line: 1, .. })
        ));
    }
}
