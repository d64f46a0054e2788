use std::io::Cursor;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use gridcaster::core::world::FrameEvents;

fn load_bytes_any(paths: &[&str]) -> Option<Arc<Vec<u8>>> {
    paths.iter().find_map(|p| std::fs::read(p).ok()).map(Arc::new)
}

/// Sound effects for weapon and movement events. Missing files are silent.
pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    foot_sink: Sink,
    fire: Option<Arc<Vec<u8>>>,
    dry_fire: Option<Arc<Vec<u8>>>,
    reload: Option<Arc<Vec<u8>>>,
    hit: Option<Arc<Vec<u8>>>,
    player_step: Option<Arc<Vec<u8>>>,
    last_player_step: Instant,
    step_interval_walk: Duration,
    step_interval_sprint: Duration,
}

impl AudioManager {
    pub fn new() -> Option<Self> {
        let (_stream, handle) = OutputStream::try_default().ok()?;
        let foot_sink = Sink::try_new(&handle).ok()?;
        Some(Self {
            _stream,
            handle,
            foot_sink,
            fire: None,
            dry_fire: None,
            reload: None,
            hit: None,
            player_step: None,
            last_player_step: Instant::now(),
            step_interval_walk: Duration::from_millis(260),
            step_interval_sprint: Duration::from_millis(170),
        })
    }

    pub fn load_sfx_auto(&mut self) {
        self.fire = load_bytes_any(&["res/sounds/shotgun.wav", "res/sounds/fire.wav"]);
        self.dry_fire = load_bytes_any(&["res/sounds/dry_fire.wav", "res/sounds/click.wav"]);
        self.reload = load_bytes_any(&["res/sounds/reload.wav"]);
        self.hit = load_bytes_any(&["res/sounds/hit.wav", "res/sounds/hurt.wav"]);
        self.player_step = load_bytes_any(&["res/sounds/step.wav", "res/sounds/footstep.wav"]);
    }

    pub fn play_events(&mut self, events: &FrameEvents) {
        if events.fired {
            self.play_detached(&self.fire, 1.0);
        }
        if events.dry_fire {
            self.play_detached(&self.dry_fire, 1.0);
        }
        if events.reload_started {
            self.play_detached(&self.reload, 0.8);
        }
        if events.enemies_hit > 0 {
            self.play_detached(&self.hit, 0.7);
        }
    }

    pub fn play_player_step(&mut self, sprinting: bool) {
        let interval = if sprinting { self.step_interval_sprint } else { self.step_interval_walk };
        if self.last_player_step.elapsed() >= interval {
            self.last_player_step = Instant::now();
            if let Some(dec) = decode(&self.player_step) {
                self.foot_sink.append(dec);
            }
        }
    }

    // own sink per shot so overlapping effects all play
    fn play_detached(&self, data: &Option<Arc<Vec<u8>>>, volume: f32) {
        let Some(dec) = decode(data) else {
            return;
        };
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(dec.amplify(volume));
            sink.detach();
        }
    }
}

fn decode(data: &Option<Arc<Vec<u8>>>) -> Option<Decoder<Cursor<Vec<u8>>>> {
    let bytes = data.as_ref()?;
    Decoder::new(Cursor::new(bytes.as_ref().clone())).ok()
}
