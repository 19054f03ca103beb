use anyhow::{Context, Result};
use arcana::live::{LiveConfig, LocalAudioTrack, SignalingSession};
use arcana::model::ORACLES;
use arcana::{Oracle, SessionStatus};
use bytes::Bytes;
use colored::*;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::LiveArgs;

/// One 20 ms Opus frame of silence.
const OPUS_SILENCE: [u8; 3] = [0xf8, 0xff, 0xfe];
const FRAME: Duration = Duration::from_millis(20);

pub fn list() {
    println!("{}", "🔮 Oracles awaiting your call:".magenta().bold());
    for oracle in ORACLES {
        println!("   {} {}", oracle.name.bold(), oracle.face_id.dimmed());
    }
}

pub async fn run(name: &str, args: LiveArgs) -> Result<()> {
    let oracle = Oracle::resolve(name).with_context(|| {
        format!(
            "choose one of: {}",
            Oracle::names().collect::<Vec<_>>().join(", ")
        )
    })?;

    let config = LiveConfig {
        rest_url: args.rest_url,
        ws_url: args.ws_url,
        ..LiveConfig::with_api_key(args.api_key)
    };
    let session = SignalingSession::with_defaults(config)?;
    let mut status_rx = session.on_status_change();

    println!(
        "{}",
        format!("🕯️  Invoking {}...", oracle.name).magenta().bold()
    );
    if let Err(e) = session.start(oracle.name).await {
        println!("{}", e.user_message().red());
        return Err(e.into());
    }

    let feeder = session
        .local_stream()
        .and_then(|stream| stream.first_audio_track().cloned())
        .map(|track| tokio::spawn(feed_silence(track)));

    println!("{}", "   Press m + Enter to mute, Ctrl-C to end the ritual.".dimmed());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut failure = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = *status_rx.borrow_and_update();
                print_status(status);
                if status.is_finished() {
                    if status == SessionStatus::Failed {
                        failure = session.last_error();
                        if let Some(err) = &failure {
                            println!("{}", err.user_message().red());
                        }
                    }
                    break;
                }
            }

            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().eq_ignore_ascii_case("m") => {
                    match session.toggle_mute() {
                        Some(true) => println!("{}", "🎙️  Unmuted".green()),
                        Some(false) => println!("{}", "🔇 Muted".yellow()),
                        None => println!("{}", "No microphone to mute".dimmed()),
                    }
                }
                Ok(Some(_)) => {}
                Ok(None) | Err(_) => stdin_open = false,
            },
        }
    }

    session.stop().await;
    if let Some(feeder) = feeder {
        feeder.abort();
    }
    println!("{}", "✨ The ritual has ended.".magenta());

    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn print_status(status: SessionStatus) {
    let line = match status {
        SessionStatus::Connecting => "… connecting".cyan(),
        SessionStatus::Connected => "🌙 The oracle is with you".green().bold(),
        SessionStatus::Failed => "✖ The connection failed".red().bold(),
        SessionStatus::Closed => "· closed".dimmed(),
    };
    println!("{}", line);
}

/// Keeps the outbound audio track flowing until it is stopped.
async fn feed_silence(track: LocalAudioTrack) {
    let mut ticker = tokio::time::interval(FRAME);
    while track.is_live() {
        ticker.tick().await;
        match track
            .write_sample(Bytes::from_static(&OPUS_SILENCE), FRAME)
            .await
        {
            Ok(_) => {}
            Err(e) => {
                warn!("Audio feed stopped: {:#}", e);
                break;
            }
        }
    }
    debug!("Audio feed finished");
}
