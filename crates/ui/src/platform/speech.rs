use std::process::{Child, Command};
use std::thread::{self, JoinHandle};

use tracing::debug;

use super::UiSpeaker;

/// Speaks through the operating system's speech command.
pub struct DesktopSpeaker;

impl UiSpeaker for DesktopSpeaker {
    fn speak(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match speech_command(text).spawn() {
            Ok(child) => {
                reap(child);
            }
            Err(err) => debug!(error = %err, "speech synthesis unavailable"),
        }
    }
}

/// Wait for the speech process off the UI thread so it does not linger as a zombie.
fn reap(mut child: Child) -> Option<JoinHandle<()>> {
    let spawned = thread::Builder::new()
        .name("speech-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) if !status.success() => debug!(%status, "speech command failed"),
            Ok(_) => {}
            Err(err) => debug!(error = %err, "speech command wait failed"),
        });
    spawned
        .map_err(|err| debug!(error = %err, "cannot start speech reaper"))
        .ok()
}

#[cfg(target_os = "macos")]
fn speech_command(text: &str) -> Command {
    let mut command = Command::new("say");
    command.arg(text);
    command
}

#[cfg(target_os = "windows")]
fn speech_command(text: &str) -> Command {
    let escaped = text.replace('\'', "''");
    let script = format!(
        "Add-Type -AssemblyName System.Speech; \
         (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{escaped}')"
    );
    let mut command = Command::new("powershell");
    command.args(["-NoProfile", "-Command", &script]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn speech_command(text: &str) -> Command {
    let mut command = Command::new("espeak");
    command.arg(text);
    command
}
