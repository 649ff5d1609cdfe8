use std::io::{BufRead, Write};

use anyhow::Result;

use crate::error::EvalError;
use crate::model::{RankedLists, RelevantSet};
use crate::prompt::Prompter;

/// Asks for the cutoff and both relevant lists on the terminal.
pub fn read_manual_lists<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<RankedLists> {
    let top_k = parse_top_k(&prompter.ask("Enter TopK: ")?)?;
    let list1 = cleanse_rank_list(&prompter.ask("Enter relevance List 1 (comma-separated): ")?)?;
    let list2 = cleanse_rank_list(&prompter.ask("Enter relevance List 2 (comma-separated): ")?)?;

    Ok(RankedLists {
        list1,
        list2,
        top_k,
        transcript: String::new(),
    })
}

pub fn parse_top_k(raw: &str) -> Result<usize, EvalError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| {
            EvalError::InvalidInput(format!("TopK must be a positive integer, got `{trimmed}`"))
        })
}

/// Keeps only digits and commas, then parses the comma-separated ranks.
///
/// Brackets and spaces such as `"[1, 2,  5]"` are accepted; empty segments
/// are skipped. A list that ends up empty is rejected.
pub fn cleanse_rank_list(raw: &str) -> Result<RelevantSet, EvalError> {
    let cleansed: String = raw
        .chars()
        .filter(|character| character.is_ascii_digit() || *character == ',')
        .collect();

    let mut ranks = Vec::new();
    for segment in cleansed.split(',').filter(|segment| !segment.is_empty()) {
        let rank = segment.parse::<u32>().map_err(|_| {
            EvalError::InvalidInput(format!("rank `{segment}` is out of range"))
        })?;
        ranks.push(rank);
    }

    if ranks.is_empty() {
        return Err(EvalError::InvalidInput(format!(
            "no rank positions found in `{}`",
            raw.trim()
        )));
    }

    RelevantSet::from_ranks(ranks)
}
