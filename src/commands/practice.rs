//! Chord explorer and recognition commands

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use jazzkeys_core::{Chord, MatchResult, MatchStatus, Note, PlayedSet};

/// Handle `chords` - list the catalog
pub fn cmd_chords(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let session = &ctx.session;
    let mut out = format!("{}", "Chord Explorer".bold());
    for chord in session.catalog().chords() {
        let mut tags = Vec::new();
        if chord.name() == session.featured().name() {
            tags.push("featured");
        }
        if chord.name() == session.target().name() {
            tags.push("practice");
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" ({})", tags.join(", ")).dimmed().to_string()
        };
        out.push_str(&format!(
            "\n  {:<10} {}{}",
            chord.name().cyan(),
            chord.mood(),
            tags
        ));
    }
    CommandResult::Message(out)
}

/// Handle `show <chord>` - select and describe a chord
pub fn cmd_show(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !args.is_empty() {
        if let Err(e) = ctx.session.select_featured(args) {
            return CommandResult::Error(e.to_string());
        }
    }
    CommandResult::Message(describe_chord(ctx.session.featured()))
}

/// Handle `practice <chord>` - set the recognition target
pub fn cmd_practice(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Practicing {} (notes: {})",
            ctx.session.target().name().cyan(),
            note_list(ctx.session.target().notes())
        ));
    }
    match ctx.session.select_target(args) {
        Ok(chord) => CommandResult::Message(format!(
            "🎯 Practice target: {}. Tap the keys you play.",
            chord.name().bright_yellow().bold()
        )),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `toggle <notes...>` (and bare note input) - toggle held notes
pub fn cmd_toggle(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let notes = match parse_notes(args) {
        Ok(notes) if !notes.is_empty() => notes,
        Ok(_) => return CommandResult::Error("Usage: toggle <note> [note...]".to_string()),
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    for note in notes {
        ctx.session.toggle(note);
    }
    CommandResult::Message(render_status(ctx))
}

/// Handle `reset` - clear held notes
pub fn cmd_reset(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.session.reset();
    CommandResult::Message(render_status(ctx))
}

/// Handle `status` - show target, keyboard and feedback
pub fn cmd_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(render_status(ctx))
}

/// Handle `keys` - show the keyboard
pub fn cmd_keys(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(render_keyboard(ctx.session.target(), ctx.session.played()))
}

/// Handle `progressions` - list progressions
pub fn cmd_progressions(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let session = &ctx.session;
    let mut out = format!("{}", "Progression Studio".bold());
    for progression in session.catalog().progressions() {
        let marker = match session.progression() {
            Some(p) if p.name == progression.name => "▶".bright_yellow().to_string(),
            _ => " ".to_string(),
        };
        out.push_str(&format!(
            "\n {} {}\n     {}\n     {}",
            marker,
            progression.name.bold(),
            progression.chords.join("  •  ").cyan(),
            progression.description.dimmed()
        ));
    }
    CommandResult::Message(out)
}

/// Handle `progression <name>` - select a progression
pub fn cmd_progression(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return match ctx.session.progression() {
            Some(p) => CommandResult::Message(format!(
                "{}: {}",
                p.name.bold(),
                p.chords.join("  •  ").cyan()
            )),
            None => CommandResult::Error("No progression selected".to_string()),
        };
    }
    match ctx.session.select_progression(args) {
        Ok(p) => CommandResult::Message(format!(
            "Selected {}: {}. Use 'preview' to hear the first chord.",
            p.name.bold(),
            p.chords.join("  •  ").cyan()
        )),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `reharm` - list pop-to-jazz reharmonizations
pub fn cmd_reharm(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut out = format!("{}", "Pop to Jazz".bold());
    for song in ctx.session.catalog().reharmonizations() {
        out.push_str(&format!(
            "\n  {} {}\n    Original: {}\n    Jazz:     {}\n    {}",
            song.song.bold(),
            format!("({})", song.artist).dimmed(),
            song.original,
            song.jazz.cyan(),
            song.vibe.dimmed()
        ));
    }
    CommandResult::Message(out)
}

/// Parse whitespace- or comma-separated note names
pub fn parse_notes(input: &str) -> anyhow::Result<Vec<Note>> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Note>())
        .collect()
}

fn note_list(notes: &[Note]) -> String {
    notes.iter().map(|n| n.name()).collect::<Vec<_>>().join(", ")
}

/// Multi-line description of a chord for the explorer
pub fn describe_chord(chord: &Chord) -> String {
    let mut out = format!("{}", chord.name().bright_yellow().bold());
    if !chord.mood().is_empty() {
        out.push_str(&format!("  {}", chord.mood().dimmed()));
    }
    out.push_str(&format!("\n  Notes:      {}", note_list(chord.notes()).cyan()));
    let fingering = chord.fingering();
    if !fingering.right.is_empty() {
        out.push_str(&format!("\n  Right hand: {}", fingering.right));
    }
    if !fingering.left.is_empty() {
        out.push_str(&format!("\n  Left hand:  {}", fingering.left));
    }
    out
}

/// The 12 keys: held chord tones green, wrong notes red, idle black keys dim
pub fn render_keyboard(target: &Chord, played: &PlayedSet) -> String {
    Note::ALL
        .iter()
        .map(|note| {
            let label = format!("[{}]", note.name());
            match (played.contains(note), target.contains(note)) {
                (true, true) => label.bright_green().bold().to_string(),
                (true, false) => label.bright_red().bold().to_string(),
                (false, _) if note.is_natural() => label,
                (false, _) => label.dimmed().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Feedback line colored by status
pub fn render_feedback(result: &MatchResult) -> String {
    let text = result.feedback();
    match result.status {
        MatchStatus::AwaitingInput => text.dimmed().to_string(),
        MatchStatus::ExactMatch => format!("✓ {}", text).bright_green().bold().to_string(),
        MatchStatus::Close => text.yellow().to_string(),
        MatchStatus::Mismatch => text.red().to_string(),
    }
}

/// Target, keyboard and feedback in one block
pub fn render_status(ctx: &CommandContext) -> String {
    let session = &ctx.session;
    format!(
        "Target {} {}\n{}\n{}",
        session.target().name().cyan().bold(),
        format!(
            "(close = up to {} missing)",
            session.engine().config().close_threshold
        )
        .dimmed(),
        render_keyboard(session.target(), session.played()),
        render_feedback(&session.result())
    )
}
