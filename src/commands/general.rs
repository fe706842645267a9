//! General REPL commands (help, quit, watch)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `watch [file]` command - reload a JSON catalog whenever it changes
pub fn cmd_watch(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !args.is_empty() {
        return CommandResult::Watch(args.to_string());
    }
    match &ctx.catalog_path {
        Some(path) => CommandResult::Watch(path.display().to_string()),
        None => CommandResult::Error("Usage: watch <catalog.json>".to_string()),
    }
}

/// Print help information
fn print_help() {
    println!("{}", "🎹 Jazz Keys Help".bold());
    println!("{}", "=================".bold());
    println!();
    println!("{}", "Chord Explorer:".green());
    println!("  {}              - List chords in the library", "chords".cyan());
    println!("  {}      - Show notes and fingering", "show <chord>".cyan());
    println!(
        "  {}  - Play the shown chord, a named chord, or held notes",
        "hear [chord|played]".cyan()
    );
    println!();
    println!("{}", "Practice:".green());
    println!("  {}  - Set the chord to match", "practice <chord>".cyan());
    println!("  {}             - Toggle held notes", "C E G B".cyan());
    println!("  {}   - Same, as a command", "toggle <notes>".cyan());
    println!("  {}               - Release all notes", "reset".cyan());
    println!("  {}              - Target, keyboard and feedback", "status".cyan());
    println!("  {}                - Show the keyboard", "keys".cyan());
    println!();
    println!("{}", "Progressions and Reharms:".green());
    println!("  {}        - List progressions", "progressions".cyan());
    println!("  {} - Select a progression", "progression <name>".cyan());
    println!("  {}             - Hear its first chord", "preview".cyan());
    println!("  {}              - Pop songs, jazz chords", "reharm".cyan());
    println!();
    println!("{}", "MIDI Input:".green());
    println!("  {}        - List input ports", "midi devices".cyan());
    println!("  {} - Toggle notes from a keyboard", "midi connect <port>".cyan());
    println!("  {}     - Close the connection", "midi disconnect".cyan());
    println!("  {}         - Show the connection", "midi status".cyan());
    println!();
    println!("{}", "Other:".green());
    println!("  {}        - Reload a JSON catalog on change", "watch [file]".cyan());
    println!("  {}           - Show this help", "help".cyan());
    println!("  {}    - Exit", "quit / exit".cyan());
}
