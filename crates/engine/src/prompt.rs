//! Prompt rendering for the advisor call.
//!
//! Two strings go out per call: a fixed instruction block describing
//! the game and the required reply shape, and a compact per-call
//! context. Both are pure text and deterministic for identical inputs.

use pegwise_core::board::{Board, Move, PegId};

/// Fixed system/instruction text sent with every request.
pub const SYSTEM_INSTRUCTIONS: &str = "Tower of Hanoi solver. Disks: larger#=bigger. Rules: move top only, never big on small. Goal: stack all on C.\n\
Algorithm: To move n disks A→C using B: move n-1 from A→B, move bottom A→C, move n-1 from B→C.\n\
Reply ONLY: {\"m\":\"XY\",\"r\":\"why\"} - XY must be from valid moves list.";

/// Render the per-call context string.
///
/// Pegs are shown top-to-bottom (`-` when empty), candidates as
/// two-letter codes, and history truncated to the most recent `window`
/// moves. The optimal move count (2^n − 1) is included purely for
/// scale reference.
pub fn render_context(
    board: &Board,
    disk_count: u32,
    candidates: &[Move],
    history: &[Move],
    window: usize,
) -> String {
    let codes: Vec<String> = candidates.iter().map(|m| m.code()).collect();

    let start = history.len().saturating_sub(window);
    let recent: Vec<String> = history[start..].iter().map(|m| m.code()).collect();
    let recent = if recent.is_empty() {
        "none".to_string()
    } else {
        recent.join(" ")
    };

    let optimal = 2u64.saturating_pow(disk_count).saturating_sub(1);

    format!(
        "Tower of Hanoi: {disk_count} disks, goal=all on C.\n\
State: A[{a}] B[{b}] C[{c}] (top→bottom)\n\
Valid moves: {moves}\n\
History({total}/{optimal}): {recent}\n\n\
Pick the best move. Reply JSON only: {{\"m\":\"XY\",\"r\":\"reason\"}} where XY is from valid moves.",
        a = render_peg(board, PegId::A),
        b = render_peg(board, PegId::B),
        c = render_peg(board, PegId::C),
        moves = codes.join(","),
        total = history.len(),
    )
}

/// One peg's disks top-to-bottom, comma-joined, or `-` when empty.
fn render_peg(board: &Board, peg: PegId) -> String {
    let disks = board.peg(peg);
    if disks.is_empty() {
        return "-".to_string();
    }
    disks
        .iter()
        .rev()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::legal_moves;

    fn mv(code: &str) -> Move {
        Move::parse_code(code).unwrap()
    }

    #[test]
    fn renders_initial_state() {
        let board = Board::try_new([vec![3, 2, 1], vec![], vec![]]).unwrap();
        let candidates = legal_moves(&board, None);
        let context = render_context(&board, 3, &candidates, &[], 10);

        assert!(context.contains("Tower of Hanoi: 3 disks, goal=all on C."));
        assert!(context.contains("State: A[1,2,3] B[-] C[-] (top→bottom)"));
        assert!(context.contains("Valid moves: AB,AC"));
        assert!(context.contains("History(0/7): none"));
    }

    #[test]
    fn pegs_render_top_to_bottom() {
        let board = Board::try_new([vec![3], vec![2, 1], vec![]]).unwrap();
        let context = render_context(&board, 3, &[], &[], 10);
        assert!(context.contains("A[3] B[1,2] C[-]"));
    }

    #[test]
    fn history_is_truncated_to_window() {
        let board = Board::try_new([vec![3, 2, 1], vec![], vec![]]).unwrap();
        let history: Vec<Move> = ["AB", "BC", "CA", "AB", "BC"]
            .iter()
            .map(|c| mv(c))
            .collect();
        let context = render_context(&board, 3, &[], &history, 3);

        // Full length still reported, only the last 3 codes rendered
        assert!(context.contains("History(5/7): CA AB BC"));
        assert!(!context.contains("AB BC CA"));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let board = Board::try_new([vec![2, 1], vec![], vec![]]).unwrap();
        let candidates = legal_moves(&board, None);
        let history = vec![mv("AB")];
        let one = render_context(&board, 2, &candidates, &history, 10);
        let two = render_context(&board, 2, &candidates, &history, 10);
        assert_eq!(one, two);
    }

    #[test]
    fn large_disk_count_does_not_overflow() {
        let board = Board::try_new([vec![1], vec![], vec![]]).unwrap();
        let context = render_context(&board, 200, &[], &[], 10);
        assert!(context.contains("200 disks"));
    }

    #[test]
    fn instructions_demand_json_reply() {
        assert!(SYSTEM_INSTRUCTIONS.contains(r#"{"m":"XY","r":"why"}"#));
    }
}
