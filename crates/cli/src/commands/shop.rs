use std::io::{self, BufRead};
use std::time::Instant;

use storefront_core::config::LoadOptions;
use tracing::warn;

use crate::commands::{load_context, CommandResult, EXIT_IO};
use crate::session::{Action, ShopSession, StepKind};
use crate::view;

#[derive(Debug, Default)]
struct Tally {
    applied: usize,
    not_found: usize,
    ignored: usize,
    rejected: usize,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let stdin = io::stdin();
    run_with_input(options, stdin.lock())
}

/// Runs one session over `input`, one action per line. Blank lines and lines
/// starting with `#` are skipped.
pub fn run_with_input<R: BufRead>(options: &LoadOptions, input: R) -> CommandResult {
    let (config, catalog) = match load_context("shop", options) {
        Ok(context) => context,
        Err(failure) => return failure,
    };

    let mut session = ShopSession::new(&config, catalog);
    let mut tally = Tally::default();
    let mut transcript = Vec::new();

    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                return CommandResult::failure(
                    "shop",
                    "input_io",
                    format!("failed to read shop actions: {error}"),
                    EXIT_IO,
                );
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        transcript.push(format!("> {trimmed}"));
        let action = match trimmed.parse::<Action>() {
            Ok(action) => action,
            Err(error) => {
                warn!(event_name = "shop.action.rejected", input = trimmed, %error, "bad action");
                tally.rejected += 1;
                transcript.push(format!("! {error}"));
                continue;
            }
        };

        let step = session.apply(action, Instant::now());
        transcript.push(step.output);
        match step.kind {
            StepKind::Applied => tally.applied += 1,
            StepKind::NotFound => tally.not_found += 1,
            StepKind::Ignored => tally.ignored += 1,
            StepKind::Quit => break,
        }
    }

    let cart = session.cart();
    let summary = CommandResult::success(
        "shop",
        format!(
            "{} applied, {} not found, {} ignored, {} rejected; cart has {} line(s), total {}",
            tally.applied,
            tally.not_found,
            tally.ignored,
            tally.rejected,
            cart.get_count(),
            view::money(cart.get_total(), session.currency())
        ),
    );

    transcript.push(summary.output);
    CommandResult::text(transcript.join("\n"))
}
