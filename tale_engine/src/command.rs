//! Free-text command parsing.
//!
//! Input is normalized to lowercase and split on whitespace. The first token
//! is the verb; the first preposition after it splits the remainder into a
//! direct and an indirect object. Conjunctions ("and", "using", "then")
//! never split: without a preposition the whole remainder stays one direct
//! object, so multi-part objects like "wire and battery" survive intact.
//! Parsing is pure: no I/O, no world access.

use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref PREPOSITIONS: HashSet<&'static str> = HashSet::from([
        "on", "to", "with", "in", "at", "from", "under", "behind", "inside", "about", "for",
        "through", "by", "into",
    ]);
}

/// Structured form of one line of player input.
///
/// Unused slots are empty strings rather than options, matching how the
/// handlers consume them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub verb: String,
    pub direct_object: String,
    pub preposition: String,
    pub indirect_object: String,
}

impl ParsedCommand {
    fn new(verb: &str, direct: &str, preposition: &str, indirect: &str) -> Self {
        Self {
            verb: verb.to_string(),
            direct_object: direct.to_string(),
            preposition: preposition.to_string(),
            indirect_object: indirect.to_string(),
        }
    }
}

/// Parse a raw input line into a [`ParsedCommand`].
///
/// Compound forms `talk ... to X` and `look ... at X` are rewritten to
/// `talk X` and `examine X` so the dispatcher sees one shape per verb.
pub fn parse_command(raw: &str) -> ParsedCommand {
    let normalized = raw.trim().to_lowercase();
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let Some(verb) = tokens.first() else {
        return ParsedCommand::default();
    };

    if tokens.len() == 1 {
        return ParsedCommand::new(verb, "", "", "");
    }

    // First preposition wins, wherever it sits in the remainder.
    let preposition_index = tokens
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, token)| PREPOSITIONS.contains(*token))
        .map(|(index, _)| index);

    let (direct, preposition, indirect) = match preposition_index {
        Some(1) => {
            // Preposition immediately after the verb: no direct object.
            (String::new(), tokens[1].to_string(), tokens[2..].join(" "))
        },
        Some(index) => (
            tokens[1..index].join(" "),
            tokens[index].to_string(),
            tokens[index + 1..].join(" "),
        ),
        // No preposition: the remainder (conjunctions included) is the
        // direct object.
        None => (tokens[1..].join(" "), String::new(), String::new()),
    };

    if *verb == "talk" && preposition == "to" && !indirect.is_empty() {
        return ParsedCommand::new("talk", &indirect, "", "");
    }
    if *verb == "look" && preposition == "at" && !indirect.is_empty() {
        return ParsedCommand::new("examine", &indirect, "", "");
    }

    ParsedCommand::new(verb, &direct, &preposition, &indirect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_and_direction() {
        let cmd = parse_command("go north");
        assert_eq!(cmd, ParsedCommand::new("go", "north", "", ""));
    }

    #[test]
    fn splits_on_first_preposition() {
        let cmd = parse_command("use key on door");
        assert_eq!(cmd, ParsedCommand::new("use", "key", "on", "door"));
    }

    #[test]
    fn multi_word_objects_survive() {
        let cmd = parse_command("use rusty key on heavy door");
        assert_eq!(cmd, ParsedCommand::new("use", "rusty key", "on", "heavy door"));
    }

    #[test]
    fn look_at_becomes_examine() {
        let cmd = parse_command("look at statue");
        assert_eq!(cmd, ParsedCommand::new("examine", "statue", "", ""));
    }

    #[test]
    fn talk_to_collapses_to_direct_object() {
        let cmd = parse_command("talk to innkeeper");
        assert_eq!(cmd, ParsedCommand::new("talk", "innkeeper", "", ""));
    }

    #[test]
    fn bare_look_is_not_rewritten() {
        let cmd = parse_command("look");
        assert_eq!(cmd, ParsedCommand::new("look", "", "", ""));
    }

    #[test]
    fn conjunction_keeps_remainder_as_direct_object() {
        let cmd = parse_command("combine wire and battery");
        assert_eq!(cmd, ParsedCommand::new("combine", "wire and battery", "", ""));
    }

    #[test]
    fn preposition_after_conjunction_still_splits() {
        let cmd = parse_command("use key and card on door");
        assert_eq!(cmd, ParsedCommand::new("use", "key and card", "on", "door"));
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let cmd = parse_command("  TAKE   Rusty  KEY ");
        assert_eq!(cmd, ParsedCommand::new("take", "rusty key", "", ""));
    }

    #[test]
    fn blank_input_is_all_empty() {
        assert_eq!(parse_command("   "), ParsedCommand::default());
    }

    #[test]
    fn preposition_at_index_one_leaves_direct_empty() {
        let cmd = parse_command("look at");
        assert_eq!(cmd, ParsedCommand::new("look", "", "at", ""));
    }
}
