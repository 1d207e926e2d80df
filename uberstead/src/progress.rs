//! Feedback while an external command runs.

use indicatif::{ProgressBar, ProgressStyle};
use uber_core::command_stream::{ExitStatus, ProcessRunner};
use uber_core::error::Result;
use uber_core::{uber_error, uber_println};

const MAX_MESSAGE_WIDTH: usize = 60;

/// Run `command_line`, either streaming its output or behind a progress bar
/// sized for `expected_lines` lines.
///
/// With the bar, output is held back and printed only if the command fails.
pub fn run_with_progress(
    runner: &dyn ProcessRunner,
    command_line: &str,
    expected_lines: u64,
    verbose: bool,
) -> Result<ExitStatus> {
    if verbose {
        return runner.run(command_line, &mut |line| uber_println!("{}", line));
    }

    let bar = ProgressBar::new(expected_lines);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let (status, output) = run_with_bar(runner, command_line, &bar)?;
    if !status.success() {
        for line in &output {
            uber_error!("{}", line);
        }
    }
    Ok(status)
}

fn run_with_bar(
    runner: &dyn ProcessRunner,
    command_line: &str,
    bar: &ProgressBar,
) -> Result<(ExitStatus, Vec<String>)> {
    let mut output = Vec::new();
    let status = runner.run(command_line, &mut |line| {
        bar.inc(1);
        bar.set_message(shorten(line.trim()));
        output.push(line.to_string());
    });
    bar.finish_and_clear();
    Ok((status?, output))
}

fn shorten(line: &str) -> String {
    match line.char_indices().nth(MAX_MESSAGE_WIDTH) {
        Some((cut, _)) => format!("{}…", &line[..cut]),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lines(&'static [&'static str], i32);

    impl ProcessRunner for Lines {
        fn run(&self, _command_line: &str, on_line: &mut dyn FnMut(&str)) -> Result<ExitStatus> {
            for line in self.0 {
                on_line(line);
            }
            Ok(ExitStatus::from_code(self.1))
        }
    }

    #[test]
    fn test_bar_counts_and_collects_lines() {
        let bar = ProgressBar::hidden();
        let (status, output) =
            run_with_bar(&Lines(&["one", "two", "three"], 0), "true", &bar).unwrap();

        assert!(status.success());
        assert_eq!(output, vec!["one", "two", "three"]);
        assert_eq!(bar.position(), 3);
        assert!(bar.is_finished());
    }

    #[test]
    fn test_failure_status_is_returned() {
        let bar = ProgressBar::hidden();
        let (status, output) = run_with_bar(&Lines(&["ERROR 1045"], 1), "false", &bar).unwrap();

        assert_eq!(status.code(), Some(1));
        assert_eq!(output, vec!["ERROR 1045"]);
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("short"), "short");
        let long = "x".repeat(80);
        let shortened = shorten(&long);
        assert_eq!(shortened.chars().count(), MAX_MESSAGE_WIDTH + 1);
        assert!(shortened.ends_with('…'));
    }
}
