//! Print playback events for one Spotify Connect device
//!
//! Reads the bearer token from `SPOTIFY_TOKEN` and the device from
//! `SPOTIFY_DEVICE_ID`. Set `SPOTIFY_LOG_MODE=development` to see the
//! poller's own logs.
//!
//! Run with: cargo run -p spotify-sdk --example now_playing

use spotify_sdk::{logging, PlaybackEvent, SdkError, SpotifyPlayer, StaticToken};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging_from_env()?;

    let token = std::env::var("SPOTIFY_TOKEN").map_err(|_| "SPOTIFY_TOKEN is not set")?;
    let device_id = std::env::var("SPOTIFY_DEVICE_ID").unwrap_or_default();

    let player = match SpotifyPlayer::builder(device_id, StaticToken::new(token))
        .start_polling(false)
        .build()
    {
        Ok(player) => player,
        Err(SdkError::MissingDeviceId) => {
            println!("Set SPOTIFY_DEVICE_ID to the id of an active device");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut events = player.subscribe();
    player.start()?;
    println!("Watching device {} (Ctrl+C to stop)", player.device_id());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Some(PlaybackEvent::NewPlaybackState(_)) => {}
                Some(PlaybackEvent::IsPlayingChanged(playing)) => {
                    println!("{}", if playing { "Playing" } else { "Paused" });
                }
                Some(PlaybackEvent::ProgressMsChanged(Some(progress))) => {
                    println!("  at {}:{:02}", progress / 60_000, (progress / 1000) % 60);
                }
                Some(PlaybackEvent::ProgressMsChanged(None)) => {}
                Some(PlaybackEvent::TrackFinished(status)) => {
                    let name = status
                        .item
                        .as_ref()
                        .and_then(|track| track.name.clone())
                        .unwrap_or_else(|| "unknown track".to_string());
                    println!("Finished: {}", name);
                }
                None => break,
            },
        }
    }

    if let Err(e) = player.shutdown().await {
        println!("Polling ended with an error: {}", e);
    }
    Ok(())
}
