mod manual;
mod process;
mod transcript;

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{info, warn};

use crate::error::SourceError;
use crate::model::{InputOrigin, RankedLists};
use crate::prompt::Prompter;

pub use manual::{cleanse_rank_list, read_manual_lists};
pub use process::{DEFAULT_GENERATOR_CLASS, DEFAULT_JAR_PATH, JarRankingSource};
pub use transcript::parse_transcript;

/// Supplies two relevant-rank lists and a cutoff for a numeric seed.
pub trait RankingSource {
    fn invoke(&self, seed: &str) -> Result<RankedLists, SourceError>;
}

#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub lists: RankedLists,
    pub origin: InputOrigin,
    pub fallback_reason: Option<String>,
}

/// Asks `source` for the lists and falls back to manual entry on any source
/// failure. Only the manual path can fail this call.
pub fn resolve_input<S, R, W>(
    source: Option<&S>,
    seed: &str,
    prompter: &mut Prompter<R, W>,
) -> Result<ResolvedInput>
where
    S: RankingSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let fallback_reason = match source {
        Some(source) => match source.invoke(seed) {
            Ok(lists) => {
                info!(
                    top_k = lists.top_k,
                    list1 = lists.list1.len(),
                    list2 = lists.list2.len(),
                    "ranked lists received"
                );
                return Ok(ResolvedInput {
                    lists,
                    origin: InputOrigin::Generator,
                    fallback_reason: None,
                });
            }
            Err(err) => {
                warn!(error = %err, "ranking generator unavailable; falling back to manual entry");
                Some(err.to_string())
            }
        },
        None => None,
    };

    let lists = read_manual_lists(prompter)?;
    Ok(ResolvedInput {
        lists,
        origin: InputOrigin::Manual,
        fallback_reason,
    })
}
