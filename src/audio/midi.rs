//! MIDI keyboard input
//!
//! Turns key presses on an external MIDI controller into note toggle events,
//! delivered over a channel so the practice loop stays single-threaded.

use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use jazzkeys_core::Note;
use midir::{MidiInput, MidiInputConnection};

/// Event produced by an input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A key was pressed: add the note if absent, remove it if present
    Toggle(Note),
}

/// Decode a raw MIDI message. Only Note On with non-zero velocity produces an
/// event; releases are ignored since every press is a toggle.
pub fn parse_midi_message(message: &[u8]) -> Option<KeyEvent> {
    if message.len() < 3 {
        return None;
    }
    match message[0] & 0xF0 {
        0x90 if message[2] > 0 => Some(KeyEvent::Toggle(Note::from_midi(message[1] & 0x7F))),
        _ => None,
    }
}

/// Connection to one MIDI input port
pub struct MidiKeyboard {
    events: Sender<KeyEvent>,
    connection: Option<MidiInputConnection<()>>,
    port_name: Option<String>,
}

impl MidiKeyboard {
    /// Create a keyboard that will send its events to `events` (not connected yet)
    pub fn new(events: Sender<KeyEvent>) -> Self {
        Self {
            events,
            connection: None,
            port_name: None,
        }
    }

    /// List available MIDI input ports
    pub fn list_ports() -> Result<Vec<String>> {
        let midi_in = MidiInput::new("jazzkeys")?;
        Ok(midi_in
            .ports()
            .iter()
            .filter_map(|p| midi_in.port_name(p).ok())
            .collect())
    }

    /// Connect to the first input port whose name contains `port_name`
    pub fn connect(&mut self, port_name: &str) -> Result<String> {
        let midi_in = MidiInput::new("jazzkeys")?;
        let ports = midi_in.ports();

        let (port, full_name) = ports
            .iter()
            .find_map(|p| {
                midi_in
                    .port_name(p)
                    .ok()
                    .filter(|name| name.contains(port_name))
                    .map(|name| (p, name))
            })
            .ok_or_else(|| anyhow!("MIDI port '{}' not found", port_name))?;

        let tx = self.events.clone();
        let connection = midi_in
            .connect(
                port,
                "jazzkeys-in",
                move |_timestamp, message, _| {
                    if let Some(event) = parse_midi_message(message) {
                        if let Err(e) = tx.send(event) {
                            log::warn!("Failed to forward MIDI event: {}", e);
                        }
                    }
                },
                (),
            )
            .map_err(|e| anyhow!("Failed to connect to '{}': {}", full_name, e))?;

        // Replacing the connection closes any previous one
        self.connection = Some(connection);
        self.port_name = Some(full_name.clone());
        log::info!("MIDI input connected: {}", full_name);
        Ok(full_name)
    }

    /// Close the current connection, if any
    pub fn disconnect(&mut self) -> bool {
        match self.connection.take() {
            Some(connection) => {
                connection.close();
                if let Some(name) = self.port_name.take() {
                    log::info!("MIDI input disconnected: {}", name);
                }
                true
            }
            None => false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn port_name(&self) -> Option<&str> {
        self.port_name.as_deref()
    }
}

impl Drop for MidiKeyboard {
    fn drop(&mut self) {
        self.disconnect();
    }
}
