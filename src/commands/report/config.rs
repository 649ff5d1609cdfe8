use std::io::{BufRead, Write};

use anyhow::Result;

use crate::cli::ReportArgs;
use crate::model::{AppConfig, RankedLists};
use crate::prompt::Prompter;
use crate::source::cleanse_rank_list;

/// Builds the run configuration from flags, asking for anything the run needs
/// but the flags left out.
pub fn resolve_config<R: BufRead, W: Write>(
    args: &ReportArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<AppConfig> {
    let document = !args.no_document;
    let use_generator = !args.no_generator && args.list1.is_none();

    let identifier = match (&args.name, document) {
        (Some(name), _) => name.clone(),
        (None, true) => prompter.ask("Enter your name: ")?.trim().to_string(),
        (None, false) => String::new(),
    };

    let roll_number = match (&args.roll_number, document || use_generator) {
        (Some(roll_number), _) => roll_number.clone(),
        (None, true) => prompter.ask("Enter your roll number: ")?.trim().to_string(),
        (None, false) => String::new(),
    };

    let jar_path = match (&args.jar_path, use_generator) {
        (Some(path), _) => path.clone(),
        (None, true) => {
            let answer = prompter.ask(
                "Enter the file path of the InfoRetireval.jar file \
                 (press Enter if in the current directory): ",
            )?;
            let answer = answer.trim();
            if answer.is_empty() {
                ReportArgs::default_jar_path()
            } else {
                answer.into()
            }
        }
        (None, false) => ReportArgs::default_jar_path(),
    };

    Ok(AppConfig {
        identifier,
        roll_number,
        jar_path,
        java_bin: args.java_bin.clone(),
        generator_class: args.generator_class.clone(),
        output_dir: args.output_dir.clone(),
        report_prefix: args.report_prefix.clone(),
        title: args.title.clone(),
        document,
        keep_images: args.keep_images,
        manifest_path: args.manifest_path.clone(),
        use_generator,
    })
}

/// Lists given with `--list1/--list2/--top-k`, if any.
pub fn command_line_lists(args: &ReportArgs) -> Result<Option<RankedLists>> {
    let (Some(list1), Some(list2), Some(top_k)) = (&args.list1, &args.list2, args.top_k) else {
        return Ok(None);
    };

    Ok(Some(RankedLists {
        list1: cleanse_rank_list(list1)?,
        list2: cleanse_rank_list(list2)?,
        top_k,
        transcript: String::new(),
    }))
}
