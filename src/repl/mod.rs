//! Interactive practice loop
//!
//! Typed lines, MIDI key presses and catalog file changes all arrive on
//! channels and are handled one at a time on the REPL thread, so the session
//! never needs locking.

use crate::audio::{KeyEvent, MidiKeyboard, ToneSynthesizer};
use crate::commands::practice::{cmd_toggle, render_status};
use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::config::{self, Config};
use crate::repl::watcher::FileWatcher;
use crate::session::PracticeSession;
use anyhow::{anyhow, Result};
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use jazzkeys_core::MatchEngine;
use notify::{Event, EventKind};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;
use std::thread;

pub mod watcher;

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// What the loop should do after a line has been handled
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit,
    Watch(String),
}

/// Interactive chord trainer
pub struct Repl {
    editor: Option<DefaultEditor>,
    registry: CommandRegistry,
    ctx: CommandContext,

    // Event channels
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    rx_keys: Receiver<KeyEvent>,
    tx_watcher: Sender<notify::Result<Event>>,
    rx_watcher: Receiver<notify::Result<Event>>,

    // File watcher
    watcher: Option<FileWatcher>,
}

impl Repl {
    /// Create a new REPL from the command-line configuration
    pub fn new(config: Config) -> Result<Self> {
        let editor =
            DefaultEditor::new().map_err(|e| anyhow!("Failed to initialize editor: {}", e))?;

        let catalog = config.load_catalog()?;
        let session = PracticeSession::new(catalog, MatchEngine::new(config.match_config()))?;

        let synth = if config.mute {
            ToneSynthesizer::muted(config.tone_config())
        } else {
            ToneSynthesizer::new(config.tone_config())
        };

        let (tx_keys, rx_keys) = unbounded();
        let mut midi = MidiKeyboard::new(tx_keys);
        if let Some(port) = &config.midi {
            // Non-fatal: the trainer works from the typed keyboard too
            if let Err(e) = midi.connect(port) {
                log::warn!("MIDI input not connected: {}", e);
                println!("{} {}", "MIDI:".yellow(), e);
            }
        }

        let (tx_input, rx_input) = unbounded();
        let (tx_watcher, rx_watcher) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            registry: create_registry(),
            ctx: CommandContext::new(session, synth, midi).with_catalog_path(config.catalog),
            tx_input,
            rx_input,
            rx_keys,
            tx_watcher,
            rx_watcher,
            watcher: None,
        })
    }

    fn print_banner(&self) {
        println!(
            "{} {}",
            "🎹".bright_yellow(),
            "Jazz Keys: chord explorer and trainer".bright_cyan().bold()
        );
        println!(
            "Practicing {}. Type notes like {} to toggle keys, {} to hear a chord.",
            self.ctx.session.target().name().bright_yellow(),
            "C E G B".cyan(),
            "hear".cyan()
        );
        let tone = self.ctx.synth.config();
        println!(
            "Voice: {} at gain {:.2}",
            tone.waveform.name(),
            tone.envelope.peak
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );
    }

    fn start_watching(&mut self, path: &str) {
        // Initialize watcher if needed
        if self.watcher.is_none() {
            match FileWatcher::new(self.tx_watcher.clone()) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => println!("{} Failed to create watcher: {}", "Error:".red(), e),
            }
        }

        if let Some(w) = &mut self.watcher {
            if let Err(e) = w.watch(path) {
                println!("{} Failed to watch {}: {}", "Error:".red(), path, e);
            } else {
                println!(
                    "{} Watching {} for changes...",
                    "👀".bright_cyan(),
                    path.bright_green()
                );
            }
        }
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        self.print_banner();

        // Move editor to thread
        let mut editor = self
            .editor
            .take()
            .ok_or_else(|| anyhow!("REPL is already running"))?;
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "jazzkeys>".bright_magenta().bold());
            let readline = editor.readline(&prompt);

            match readline {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        loop {
            crossbeam_channel::select! {
                recv(self.rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        match handle_line(&self.registry, &mut self.ctx, &line) {
                            LineOutcome::Continue => {}
                            LineOutcome::Exit => {
                                println!("{} 🎹", "Goodbye!".bright_cyan());
                                break;
                            }
                            LineOutcome::Watch(path) => self.start_watching(&path),
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted)))
                    | Ok(ReplEvent::Input(Err(ReadlineError::Eof))) => {
                        println!("{} 🎹", "Goodbye!".bright_cyan());
                        break;
                    }
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                    }
                    Err(_) => break, // Channel closed
                },

                recv(self.rx_keys) -> msg => match msg {
                    Ok(KeyEvent::Toggle(note)) => {
                        self.ctx.session.toggle(note);
                        log::debug!("MIDI toggled {}", note);
                        println!("\n{}", render_status(&self.ctx));
                    }
                    // The keyboard owns the sender, so this only happens on shutdown
                    Err(_) => break,
                },

                recv(self.rx_watcher) -> msg => match msg {
                    Ok(Ok(event)) => {
                        if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                            for path in event.paths {
                                println!("{} File changed: {}", "⚡".bright_yellow(), path.display());
                                match reload_catalog(&mut self.ctx, &path) {
                                    Ok(count) => println!(
                                        "{} Reloaded {} chords",
                                        "✓".bright_green(),
                                        count
                                    ),
                                    Err(e) => {
                                        log::warn!("Catalog reload failed: {:#}", e);
                                        println!("{} {:#}", "Error:".red(), e);
                                    }
                                }
                            }
                        }
                    }
                    Ok(Err(e)) => println!("{} Watch error: {}", "Error:".red(), e),
                    Err(_) => break, // Channel closed
                }
            }
        }

        Ok(())
    }
}

/// Run one input line: a command, or else a list of notes to toggle
pub fn handle_line(registry: &CommandRegistry, ctx: &mut CommandContext, line: &str) -> LineOutcome {
    if line.is_empty() {
        return LineOutcome::Continue;
    }

    let result = match registry.execute(line, ctx) {
        CommandResult::NotACommand => match cmd_toggle(line, ctx) {
            CommandResult::Error(_) => CommandResult::Error(format!(
                "Unknown command or note: {} (type 'help')",
                line
            )),
            other => other,
        },
        other => other,
    };

    match result {
        CommandResult::Success | CommandResult::NotACommand => LineOutcome::Continue,
        CommandResult::Message(msg) => {
            println!("{}", msg);
            LineOutcome::Continue
        }
        CommandResult::Exit => LineOutcome::Exit,
        CommandResult::Error(e) => {
            println!("{} {}", "Error:".bright_red().bold(), e.red());
            LineOutcome::Continue
        }
        CommandResult::Watch(path) => LineOutcome::Watch(path),
    }
}

/// Re-read a catalog file into the session. The old catalog stays on failure.
pub fn reload_catalog(ctx: &mut CommandContext, path: &Path) -> Result<usize> {
    let catalog = config::load_catalog(path)?;
    let count = catalog.len();
    ctx.session.replace_catalog(catalog)?;
    Ok(count)
}

/// Convenience function to start the REPL
pub fn start(config: Config) -> Result<()> {
    let mut repl = Repl::new(config)?;
    repl.run()
}
