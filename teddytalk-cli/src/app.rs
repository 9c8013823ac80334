use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use indicatif::ProgressBar;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use teddytalk_core::chat::TurnRole;
use teddytalk_core::settings::SettingsManager;
use teddytalk_core::voice::audio::DataUri;
use teddytalk_core::{ai, voice, Session};

use crate::commands::{parse_command, LocalCommand, HELP_TEXT};

pub struct App {
    session: Session,
    audio_dir: PathBuf,
}

impl App {
    pub fn new(
        settings_path: Option<PathBuf>,
        mock: bool,
        audio_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let settings_manager = match settings_path {
            Some(path) => SettingsManager::from_path(path)?,
            None => SettingsManager::new()?,
        };

        let mut settings = settings_manager.settings();
        if mock {
            settings.use_mocks();
        }

        let chat = ai::build_provider(&settings.chat_provider)?;
        let cloner = voice::build_cloner(&settings.voice_provider)?;
        let synthesizer = voice::build_synthesizer(&settings.voice_provider)?;

        let audio_dir = audio_dir
            .or(settings.audio_dir)
            .unwrap_or_else(default_audio_dir);
        std::fs::create_dir_all(&audio_dir)
            .with_context(|| format!("Failed to create audio directory {audio_dir:?}"))?;

        Ok(Self {
            session: Session::new(chat, cloner, synthesizer),
            audio_dir,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        println!("🧸 TeddyTalk - type /help for commands, /quit to leave");
        println!("   Clone your voice with /clone <audio-file> and the bear answers in it.");

        loop {
            let line = match rl.readline("\x1b[35m>\x1b[0m ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(_) => break,
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            rl.add_history_entry(&line)?;

            match parse_command(input) {
                Some(LocalCommand::Quit) => break,
                Some(LocalCommand::Help) => println!("{HELP_TEXT}"),
                Some(LocalCommand::Transcript) => self.print_transcript(),
                Some(LocalCommand::Voice(id)) => {
                    println!("Replies will now use voice {id}");
                    self.session.set_voice(id);
                }
                Some(LocalCommand::Clone(path)) => self.clone_voice(&path).await,
                Some(LocalCommand::Invalid(message)) => eprintln!("{message}"),
                None => self.chat_turn(input).await,
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    async fn chat_turn(&mut self, prompt: &str) {
        let spinner = spinner("Thinking...");
        let result = self.session.send(prompt).await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => {
                println!("🧸 {}", reply.text);
                match reply.speech {
                    Ok(media) => self.deliver_audio(&media).await,
                    Err(e) => eprintln!("(no audio this time: {e})"),
                }
            }
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    async fn clone_voice(&mut self, path: &Path) {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Could not read {}: {e}", path.display());
                return;
            }
        };
        let sample = DataUri::encode(mime_for_sample(path), &bytes);

        let spinner = spinner("Cloning your voice... this can take a moment");
        let result = self.session.clone_voice(sample.as_str()).await;
        spinner.finish_and_clear();

        match result {
            Ok(voice_id) => println!("Voice cloned! Replies will now use voice {voice_id}"),
            Err(e) => eprintln!("Voice cloning failed: {e}"),
        }
    }

    async fn deliver_audio(&self, media: &str) {
        #[cfg(feature = "playback")]
        {
            use teddytalk_core::voice::audio::playback::SpeechPlayer;

            match SpeechPlayer::new().and_then(|player| player.play_media(media)) {
                Ok(playback) => {
                    playback.wait().await;
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = ?e, "direct playback unavailable; saving instead")
                }
            }
        }

        match save_media(&self.audio_dir, media) {
            Ok(path) => println!("(reply audio saved to {})", path.display()),
            Err(e) => eprintln!("(could not save reply audio: {e})"),
        }
    }

    fn print_transcript(&self) {
        let transcript = self.session.transcript();
        if transcript.is_empty() {
            println!("Nothing said yet.");
            return;
        }
        for turn in transcript {
            let who = match turn.role {
                TurnRole::User => "you",
                TurnRole::Assistant => "bear",
            };
            println!("{who}: {}", turn.content);
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

fn default_audio_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".teddytalk")
        .join("audio")
}

/// Write a media string to a timestamped file and return its path. Bare
/// base64 (no data-URI envelope) is accepted too, with an opaque extension.
fn save_media(dir: &Path, media: &str) -> Result<PathBuf> {
    let (bytes, extension) = match DataUri::parse(media) {
        Ok(uri) => (uri.bytes().to_vec(), extension_for_mime(uri.mime())),
        Err(_) => (
            STANDARD
                .decode(media)
                .context("media is neither a data URI nor base64")?,
            "bin",
        ),
    };

    let name = format!(
        "reply-{}.{extension}",
        chrono::Local::now().format("%Y%m%d-%H%M%S%.3f")
    );
    let path = dir.join(name);
    std::fs::write(&path, bytes).with_context(|| format!("Failed to write {path:?}"))?;
    Ok(path)
}

fn mime_for_sample(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("webm") => "audio/webm",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        _ => "application/octet-stream",
    }
}

fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "audio/wav" | "audio/x-wav" => "wav",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/ogg" => "ogg",
        "audio/webm" => "webm",
        "audio/mp4" => "m4a",
        _ => "bin",
    }
}
