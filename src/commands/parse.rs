use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::ParseArgs;
use crate::model::RankedLists;
use crate::source::parse_transcript;

pub fn run(args: ParseArgs) -> Result<()> {
    let text = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read transcript from stdin")?;
        buf
    } else {
        fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read {}", args.input.display()))?
    };

    let lists = parse_transcript(&text).context("transcript does not match generator format")?;
    info!(top_k = lists.top_k, "transcript parsed");

    let mut output = io::BufWriter::new(io::stdout().lock());
    write!(output, "{}", describe(&lists))?;
    output.flush()?;
    Ok(())
}

fn describe(lists: &RankedLists) -> String {
    format!(
        "List 1: {}\nList 2: {}\nTopK: {}\n",
        lists.list1, lists.list2, lists.top_k
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_prints_normalized_lists() {
        let lists = parse_transcript("List 1: [4, 1]\nList 2: [2]\nYour TopK = 7").expect("lists");
        assert_eq!(describe(&lists), "List 1: [1, 4]\nList 2: [2]\nTopK: 7\n");
    }
}
