//! # Platform-specific utilities
//!
//! Questo modulo centralizza la logica per la gestione cross-platform
//! dei comandi esterni (ffmpeg) e della loro disponibilità nel PATH.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Platform-specific command manager
pub struct PlatformCommands {
    commands: HashMap<&'static str, &'static str>,
    which_command: &'static str,
}

impl PlatformCommands {
    /// Get the singleton instance
    pub fn instance() -> &'static Self {
        static INSTANCE: OnceLock<PlatformCommands> = OnceLock::new();
        INSTANCE.get_or_init(Self::new)
    }

    /// Initialize platform-specific commands
    fn new() -> Self {
        let mut commands = HashMap::new();
        let which_command = if cfg!(windows) {
            commands.insert("ffmpeg", "ffmpeg.exe");
            "where"
        } else {
            commands.insert("ffmpeg", "ffmpeg");
            "which"
        };

        Self {
            commands,
            which_command,
        }
    }

    /// Get the platform-specific command name
    pub fn get_command<'a>(&self, base_name: &'a str) -> &'a str {
        self.commands.get(base_name).copied().unwrap_or(base_name)
    }

    /// Check if a command is available on the system
    pub async fn is_command_available(&self, base_name: &str) -> bool {
        let command_name = self.get_command(base_name);

        let result = tokio::process::Command::new(self.which_command)
            .arg(command_name)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) => status.success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_commands() {
        let platform = PlatformCommands::instance();

        let ffmpeg = platform.get_command("ffmpeg");
        if cfg!(windows) {
            assert_eq!(ffmpeg, "ffmpeg.exe");
        } else {
            assert_eq!(ffmpeg, "ffmpeg");
        }

        // Unknown tools fall through unchanged
        assert_eq!(platform.get_command("ffprobe"), "ffprobe");
        assert!(["which", "where"].contains(&platform.which_command));
    }

    #[tokio::test]
    async fn test_command_availability() {
        let platform = PlatformCommands::instance();

        assert!(!platform.is_command_available("no-such-tool-7f3a9c").await);
        // Don't assert on a real tool, minimal environments may lack `which`
        let _ = platform.is_command_available("ffmpeg").await;
    }
}
