//! MIDI REPL commands

use crate::audio::MidiKeyboard;
use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `midi devices` command - list available MIDI input ports
pub fn cmd_midi_devices(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    match MidiKeyboard::list_ports() {
        Ok(ports) => {
            if ports.is_empty() {
                CommandResult::Message(
                    "No MIDI input ports found. Plug in a keyboard or start a virtual port."
                        .yellow()
                        .to_string(),
                )
            } else {
                let mut output = format!("{}\n", "🎹 Available MIDI Input Ports:".bold());
                for (i, port) in ports.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, port.cyan()));
                }
                output.push_str(&format!(
                    "\n{} {}",
                    "Use".dimmed(),
                    "midi connect <port name>".green()
                ));
                CommandResult::Message(output)
            }
        }
        Err(e) => CommandResult::Error(format!("Failed to list MIDI ports: {}", e)),
    }
}

/// Handle `midi connect <port>` command - toggle notes from a MIDI keyboard
pub fn cmd_midi_connect(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error(
            "Usage: midi connect <port name>\nUse 'midi devices' to see available ports"
                .to_string(),
        );
    }

    match ctx.midi.connect(args) {
        Ok(name) => CommandResult::Message(format!(
            "🎹 Connected to MIDI port: {}. Each key press toggles a note.",
            name.green()
        )),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `midi disconnect` command
pub fn cmd_midi_disconnect(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if ctx.midi.disconnect() {
        CommandResult::Message("🎹 Disconnected from MIDI".to_string())
    } else {
        CommandResult::Error("No MIDI port connected".to_string())
    }
}

/// Handle `midi status` command
pub fn cmd_midi_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.midi.port_name() {
        Some(name) => CommandResult::Message(format!("🎹 MIDI input: {}", name.green())),
        None => CommandResult::Message(format!(
            "🎹 MIDI input: {}",
            "not connected".dimmed()
        )),
    }
}
