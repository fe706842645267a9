//! Playback commands

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `hear [chord|played]` - play the featured chord, a named chord, or the held notes
pub fn cmd_hear(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let (label, frequencies) = if args.is_empty() {
        let chord = ctx.session.featured();
        (chord.name().to_string(), chord.frequencies().to_vec())
    } else if args.eq_ignore_ascii_case("played") {
        if ctx.session.played().is_empty() {
            return CommandResult::Error("No notes held".to_string());
        }
        (
            format!("held notes {}", ctx.session.played()),
            ctx.session.played_frequencies(),
        )
    } else {
        match ctx.session.catalog().get(args) {
            Some(chord) => (chord.name().to_string(), chord.frequencies().to_vec()),
            None => return CommandResult::Error(format!("Unknown chord: {}", args)),
        }
    };

    ctx.synth.play(&frequencies);
    CommandResult::Message(playing_message(&label, ctx))
}

/// Handle `preview` - play the first chord of the selected progression
pub fn cmd_preview(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(progression) = ctx.session.progression() else {
        return CommandResult::Error("No progression selected".to_string());
    };
    let name = progression.name.clone();
    let first = progression.chords.first().cloned().unwrap_or_default();

    match ctx.session.preview_frequencies() {
        Some(frequencies) => {
            ctx.synth.play(&frequencies);
            CommandResult::Message(playing_message(&format!("{} ({})", first, name), ctx))
        }
        None => CommandResult::Message(
            format!("{} opens with {}, which isn't in the chord library", name, first)
                .dimmed()
                .to_string(),
        ),
    }
}

fn playing_message(label: &str, ctx: &CommandContext) -> String {
    if ctx.synth.is_available() {
        format!("🎵 Playing {}", label).bright_green().to_string()
    } else {
        format!("🔇 {} (audio unavailable)", label).dimmed().to_string()
    }
}
