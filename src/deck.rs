use regex::Regex;

use crate::core::Card;

/// Parse a raw model completion into flashcards.
///
/// The model is asked for newline-separated `Term: Definition` pairs, often
/// decorated with list markers. Each line is stripped of leading bullets and
/// whitespace, then split on the first colon; a definition containing colons
/// is rejoined. Lines without a non-empty term and definition are dropped so
/// one malformed line never spoils the rest. Order follows the input, and an
/// empty result is a valid outcome the caller reports to the user.
pub fn parse_flashcards(raw: &str) -> Vec<Card> {
    let leading_markers = Regex::new(r"^[\s*-]+").expect("valid bullet marker pattern");

    raw.lines()
        .filter_map(|line| {
            let cleaned = leading_markers.replace(line, "");
            let (term, definition) = cleaned.split_once(':')?;
            let term = term.trim();
            let definition = definition.trim();
            if term.is_empty() || definition.is_empty() {
                return None;
            }
            Some(Card::new(term, definition))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &str) -> Vec<(String, String)> {
        parse_flashcards(raw).into_iter().map(|c| (c.term, c.definition)).collect()
    }

    #[test]
    fn parses_term_definition_lines_in_order() {
        let cards = pairs("Mitochondria: The powerhouse of the cell.\nRibosome: Site of protein synthesis.");
        assert_eq!(
            cards,
            vec![
                ("Mitochondria".to_string(), "The powerhouse of the cell.".to_string()),
                ("Ribosome".to_string(), "Site of protein synthesis.".to_string()),
            ]
        );
    }

    #[test]
    fn drops_malformed_lines_and_keeps_the_rest() {
        let cards = pairs("A: first\nbad-line\nB: second: extra\n: no-term");
        assert_eq!(
            cards,
            vec![
                ("A".to_string(), "first".to_string()),
                ("B".to_string(), "second: extra".to_string()),
            ]
        );
    }

    #[test]
    fn strips_leading_bullets_and_dashes() {
        let cards = pairs("- Osmosis: Water diffusion.\n* Enzyme:  A catalyst.  \n  -- Gene: Unit of heredity.");
        assert_eq!(
            cards,
            vec![
                ("Osmosis".to_string(), "Water diffusion.".to_string()),
                ("Enzyme".to_string(), "A catalyst.".to_string()),
                ("Gene".to_string(), "Unit of heredity.".to_string()),
            ]
        );
    }

    #[test]
    fn colonless_or_empty_definition_lines_yield_nothing() {
        assert!(parse_flashcards("no separator here").is_empty());
        assert!(parse_flashcards("Term:   ").is_empty());
        assert!(parse_flashcards("").is_empty());
    }
}
