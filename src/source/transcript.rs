use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseFailure;
use crate::model::{RankedLists, RelevantSet};

static LIST1_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"List 1: \[([0-9, ]+)\]").expect("valid list 1 regex"));
static LIST2_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"List 2: \[([0-9, ]+)\]").expect("valid list 2 regex"));
static TOP_K_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Your TopK = (\d+)").expect("valid top-k regex"));

/// Extracts both relevant lists and the cutoff from ranking generator output.
///
/// Each value is read from the first line carrying its pattern; any other text
/// in the transcript is ignored.
pub fn parse_transcript(text: &str) -> Result<RankedLists, ParseFailure> {
    let mut list1 = None;
    let mut list2 = None;
    let mut top_k = None;

    for line in text.lines() {
        if list1.is_none() {
            if let Some(captures) = LIST1_LINE.captures(line) {
                list1 = Some(parse_rank_list(&captures[1])?);
                continue;
            }
        }
        if list2.is_none() {
            if let Some(captures) = LIST2_LINE.captures(line) {
                list2 = Some(parse_rank_list(&captures[1])?);
                continue;
            }
        }
        if top_k.is_none() {
            if let Some(captures) = TOP_K_LINE.captures(line) {
                let raw = &captures[1];
                top_k = Some(
                    raw.parse::<usize>()
                        .ok()
                        .filter(|value| *value > 0)
                        .ok_or_else(|| ParseFailure::InvalidNumber(raw.to_string()))?,
                );
            }
        }
    }

    Ok(RankedLists {
        list1: list1.ok_or(ParseFailure::MissingList1)?,
        list2: list2.ok_or(ParseFailure::MissingList2)?,
        top_k: top_k.ok_or(ParseFailure::MissingTopK)?,
        transcript: text.to_string(),
    })
}

fn parse_rank_list(raw: &str) -> Result<RelevantSet, ParseFailure> {
    let mut ranks = Vec::new();
    for item in raw.split(',') {
        let item = item.trim();
        let rank = item
            .parse::<u32>()
            .ok()
            .filter(|rank| *rank > 0)
            .ok_or_else(|| ParseFailure::InvalidNumber(item.to_string()))?;
        ranks.push(rank);
    }

    RelevantSet::from_ranks(ranks).map_err(|_| ParseFailure::InvalidNumber(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "\
Generating ranked lists for seed 123
List 1: [1, 3, 4, 9]
List 2: [2, 5, 6]
Your TopK = 10
";

    #[test]
    fn parses_well_formed_transcript() {
        let lists = parse_transcript(TRANSCRIPT).expect("transcript parses");
        assert_eq!(lists.list1.to_string(), "[1, 3, 4, 9]");
        assert_eq!(lists.list2.to_string(), "[2, 5, 6]");
        assert_eq!(lists.top_k, 10);
        assert_eq!(lists.transcript, TRANSCRIPT);
    }

    #[test]
    fn reports_missing_top_k() {
        let text = "List 1: [1, 2]\nList 2: [3]\n";
        assert_eq!(parse_transcript(text), Err(ParseFailure::MissingTopK));
    }

    #[test]
    fn reports_missing_lists_in_order() {
        assert_eq!(
            parse_transcript("Your TopK = 5"),
            Err(ParseFailure::MissingList1)
        );
        assert_eq!(
            parse_transcript("List 1: [1]\nYour TopK = 5"),
            Err(ParseFailure::MissingList2)
        );
    }

    #[test]
    fn empty_list_brackets_do_not_match() {
        let text = "List 1: []\nList 2: [3]\nYour TopK = 5";
        assert_eq!(parse_transcript(text), Err(ParseFailure::MissingList1));
    }

    #[test]
    fn rejects_rank_zero_and_dangling_commas() {
        let text = "List 1: [0, 2]\nList 2: [3]\nYour TopK = 5";
        assert_eq!(
            parse_transcript(text),
            Err(ParseFailure::InvalidNumber("0".to_string()))
        );

        let text = "List 1: [1,, 2]\nList 2: [3]\nYour TopK = 5";
        assert_eq!(
            parse_transcript(text),
            Err(ParseFailure::InvalidNumber(String::new()))
        );
    }

    #[test]
    fn rejects_zero_top_k() {
        let text = "List 1: [1]\nList 2: [3]\nYour TopK = 0";
        assert_eq!(
            parse_transcript(text),
            Err(ParseFailure::InvalidNumber("0".to_string()))
        );
    }

    #[test]
    fn tolerates_surrounding_noise() {
        let text = "warn: something\n>> List 2: [7]\n>> List 1: [1,2]\nDone. Your TopK = 8 (seed 4)\n";
        let lists = parse_transcript(text).expect("transcript parses");
        assert_eq!(lists.list1.len(), 2);
        assert_eq!(lists.list2.to_string(), "[7]");
        assert_eq!(lists.top_k, 8);
    }
}
