//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod audio;
pub mod general;
pub mod midi;
pub mod practice;

use crate::audio::{MidiKeyboard, ToneSynthesizer};
use crate::session::PracticeSession;
use std::path::PathBuf;

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Not a command, try reading the line as notes to toggle
    NotACommand,
    /// Error occurred
    Error(String),
    /// Watch a catalog file for changes
    Watch(String),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub session: PracticeSession,
    pub synth: ToneSynthesizer,
    pub midi: MidiKeyboard,
    /// Catalog file the session was loaded from, used by a bare `watch`
    pub catalog_path: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(session: PracticeSession, synth: ToneSynthesizer, midi: MidiKeyboard) -> Self {
        Self {
            session,
            synth,
            midi,
            catalog_path: None,
        }
    }

    pub fn with_catalog_path(mut self, path: Option<PathBuf>) -> Self {
        self.catalog_path = path;
        self
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix (e.g., "midi connect")
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Explorer and practice
    registry.register("chords", practice::cmd_chords);
    registry.register("show", practice::cmd_show);
    registry.register("practice", practice::cmd_practice);
    registry.register("toggle", practice::cmd_toggle);
    registry.register("reset", practice::cmd_reset);
    registry.register("status", practice::cmd_status);
    registry.register("keys", practice::cmd_keys);
    registry.register("progressions", practice::cmd_progressions);
    registry.register("progression", practice::cmd_progression);
    registry.register("reharm", practice::cmd_reharm);

    // Playback
    registry.register("hear", audio::cmd_hear);
    registry.register("preview", audio::cmd_preview);

    // MIDI input
    registry.register("midi devices", midi::cmd_midi_devices);
    registry.register("midi connect", midi::cmd_midi_connect);
    registry.register("midi disconnect", midi::cmd_midi_disconnect);
    registry.register("midi status", midi::cmd_midi_status);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);
    registry.register("watch", general::cmd_watch);

    registry
}


#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;

    #[test]
    fn test_longest_prefix_wins() {
        let registry = create_registry();
        let mut ctx = context();

        // "progressions" must not be dispatched to "progression" with args "s"
        match registry.execute("progressions", &mut ctx) {
            CommandResult::Message(msg) => assert!(msg.contains("Gospel glide")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_prefix_requires_word_boundary() {
        let registry = create_registry();
        let mut ctx = context();
        assert!(matches!(
            registry.execute("showme", &mut ctx),
            CommandResult::NotACommand
        ));
        assert!(matches!(
            registry.execute("C E G", &mut ctx),
            CommandResult::NotACommand
        ));
    }

    #[test]
    fn test_quit_and_exit() {
        let registry = create_registry();
        let mut ctx = context();
        assert!(matches!(registry.execute("quit", &mut ctx), CommandResult::Exit));
        assert!(matches!(registry.execute("exit", &mut ctx), CommandResult::Exit));
    }

    #[test]
    fn test_registry_lists_commands() {
        let registry = create_registry();
        let commands = registry.list_commands();
        assert!(commands.contains(&"midi connect"));
        assert!(commands.contains(&"hear"));
        // Sorted longest first
        assert!(commands[0].len() >= commands[commands.len() - 1].len());
    }
}
