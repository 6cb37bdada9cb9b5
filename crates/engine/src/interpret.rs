//! Tolerant interpretation of advisor reply text.
//!
//! The advisor is asked for `{"m":"XY","r":"why"}` but may wrap it in
//! prose, emit it mid-stream, or get cut off entirely. Extraction
//! scans for a brace-delimited span that parses rather than demanding
//! the whole reply be structured data. Reply text is untrusted free
//! text — a failed parse becomes an empty proposal, never an error
//! escaping this module.

use serde::Deserialize;

/// A move proposal recovered from advisor output.
///
/// An empty `move_code` marks a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentProposal {
    pub move_code: String,
    pub rationale: String,
    pub thoughts: Vec<String>,
}

/// The minimal reply shape requested from the advisor.
#[derive(Debug, Deserialize)]
struct ReplyShape {
    m: String,
    #[serde(default)]
    r: String,
}

/// Extract a proposal from accumulated answer text, attaching any
/// reasoning fragments collected along the way.
pub fn extract_proposal(content: &str, thoughts: Vec<String>) -> AgentProposal {
    match scan_reply(content) {
        Some(reply) => AgentProposal {
            move_code: reply.m.trim().to_uppercase(),
            rationale: reply.r,
            thoughts,
        },
        None => AgentProposal {
            move_code: String::new(),
            rationale: String::new(),
            thoughts,
        },
    }
}

/// Find the first brace-delimited span that parses as a reply.
///
/// Starting at the first `{`, each closing brace is tried left to
/// right; the first span that parses wins. A stream truncated
/// mid-object simply never parses.
fn scan_reply(content: &str) -> Option<ReplyShape> {
    let start = content.find('{')?;
    let tail = &content[start..];

    for (end, _) in tail.match_indices('}') {
        if let Ok(reply) = serde_json::from_str::<ReplyShape>(&tail[..=end]) {
            return Some(reply);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_surrounding_prose() {
        let proposal = extract_proposal(r#"some text {"m":"AC","r":"ok"} trailing"#, vec![]);
        assert_eq!(proposal.move_code, "AC");
        assert_eq!(proposal.rationale, "ok");
    }

    #[test]
    fn extracts_bare_json() {
        let proposal = extract_proposal(r#"{"m":"AB","r":"free the small disk"}"#, vec![]);
        assert_eq!(proposal.move_code, "AB");
        assert_eq!(proposal.rationale, "free the small disk");
    }

    #[test]
    fn uppercases_the_move_code() {
        let proposal = extract_proposal(r#"{"m":"ac","r":"ok"}"#, vec![]);
        assert_eq!(proposal.move_code, "AC");
    }

    #[test]
    fn missing_rationale_defaults_empty() {
        let proposal = extract_proposal(r#"{"m":"AC"}"#, vec![]);
        assert_eq!(proposal.move_code, "AC");
        assert_eq!(proposal.rationale, "");
    }

    #[test]
    fn truncated_object_yields_empty_proposal() {
        // Stream cut off mid-object: no closing brace ever parses
        let proposal = extract_proposal(r#"I think {"m":"AC","r":"going t"#, vec![]);
        assert!(proposal.move_code.is_empty());
    }

    #[test]
    fn no_braces_yields_empty_proposal() {
        let proposal = extract_proposal("move A to C please", vec![]);
        assert!(proposal.move_code.is_empty());
    }

    #[test]
    fn first_parsing_span_wins() {
        let proposal = extract_proposal(r#"{"m":"AC","r":"ok"} also {"m":"BA"}"#, vec![]);
        assert_eq!(proposal.move_code, "AC");
    }

    #[test]
    fn stray_brace_before_object_defeats_the_scan() {
        // The scan anchors on the first '{'; a stray opener ahead of
        // the real object makes every span unparseable. Accepted limit
        // of the heuristic.
        let proposal = extract_proposal(r#"note{ "m" is the move: {"m":"AC","r":"ok"}"#, vec![]);
        assert!(proposal.move_code.is_empty());
    }

    #[test]
    fn thoughts_pass_through_untouched() {
        let thoughts = vec!["first".to_string(), "second".to_string()];
        let proposal = extract_proposal("garbage", thoughts.clone());
        assert_eq!(proposal.thoughts, thoughts);
    }

    #[test]
    fn empty_content_yields_empty_proposal() {
        assert!(extract_proposal("", vec![]).move_code.is_empty());
    }
}
