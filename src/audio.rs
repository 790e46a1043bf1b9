//! Sound cues and the background music loop
//!
//! Every sound is synthesized at startup as a small PCM WAV, so the
//! game carries no audio asset files. If the audio device or decoder
//! fails, the affected slot stays empty and the game runs silent.

use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound, stop_sound};

use crate::settings::Settings;
use crate::sim::GameEvent;

const SAMPLE_RATE: u32 = 44_100;

/// Owns the synthesized sounds and the music playback flag.
///
/// The backend has no "is this sound playing" query, so the manager
/// tracks the music state itself; `start_music`/`stop_music` are
/// no-ops when already in the requested state.
pub struct AudioManager {
    collect: Option<Sound>,
    explode: Option<Sound>,
    music: Option<Sound>,
    music_playing: bool,
    sfx_volume: f32,
    music_volume: f32,
}

impl AudioManager {
    /// Synthesize and decode all cues. Failures are logged and leave
    /// the corresponding slot silent.
    pub async fn load(settings: &Settings) -> Self {
        let collect = load_sound_from_bytes(&collect_chime()).await.ok();
        let explode = load_sound_from_bytes(&explosion_burst()).await.ok();
        let music = load_sound_from_bytes(&music_loop()).await.ok();
        if collect.is_none() || explode.is_none() || music.is_none() {
            log::warn!("audio unavailable, running silent");
        }

        Self {
            collect,
            explode,
            music,
            music_playing: false,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        }
    }

    /// Perform one queued simulation effect
    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::Collect => self.play_collect(),
            GameEvent::Explosion => self.play_explosion(),
            GameEvent::MusicStart => self.start_music(),
            GameEvent::MusicStop => self.stop_music(),
        }
    }

    pub fn play_collect(&self) {
        self.play_once(&self.collect);
    }

    pub fn play_explosion(&self) {
        self.play_once(&self.explode);
    }

    pub fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        if let Some(music) = &self.music {
            play_sound(
                music,
                PlaySoundParams {
                    looped: true,
                    volume: self.music_volume,
                },
            );
            self.music_playing = true;
        }
    }

    pub fn stop_music(&mut self) {
        if !self.music_playing {
            return;
        }
        if let Some(music) = &self.music {
            stop_sound(music);
        }
        self.music_playing = false;
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    fn play_once(&self, slot: &Option<Sound>) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        if let Some(sound) = slot {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume: self.sfx_volume,
                },
            );
        }
    }
}

// === Synthesis ===

/// Bright two-note blip for a successful catch
fn collect_chime() -> Vec<u8> {
    let mut samples = tone(880.0, 0.07, 0.5);
    samples.extend(tone(1318.5, 0.09, 0.45));
    wav_bytes(&samples)
}

/// Low rumble with decaying noise for the dynamite hit
fn explosion_burst() -> Vec<u8> {
    let total = (0.45 * SAMPLE_RATE as f32) as usize;
    let mut noise_state: u32 = 0x1234_5678;
    let mut samples = Vec::with_capacity(total);
    for i in 0..total {
        let t = i as f32 / SAMPLE_RATE as f32;
        let envelope = (1.0 - i as f32 / total as f32).powi(2);
        let rumble = (2.0 * std::f32::consts::PI * 65.0 * t).sin();
        // Cheap LCG noise, no RNG crate needed at this layer
        noise_state = noise_state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let noise = (noise_state >> 16) as f32 / 32_768.0 - 1.0;
        let s = ((0.6 * rumble + 0.4 * noise) * 0.6 * envelope).clamp(-1.0, 1.0);
        samples.push((s * i16::MAX as f32) as i16);
    }
    wav_bytes(&samples)
}

/// Soft detuned drone, looped by the playback layer
fn music_loop() -> Vec<u8> {
    let total = (4.0 * SAMPLE_RATE as f32) as usize;
    let mut samples = Vec::with_capacity(total);
    for i in 0..total {
        let t = i as f32 / SAMPLE_RATE as f32;
        let a = (2.0 * std::f32::consts::PI * 110.0 * t).sin();
        let b = (2.0 * std::f32::consts::PI * 164.8 * t).sin();
        let c = (2.0 * std::f32::consts::PI * 220.9 * t).sin();
        let s = (a + 0.6 * b + 0.3 * c) * 0.18;
        samples.push((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16);
    }
    wav_bytes(&samples)
}

/// A single sine note with a short attack/release envelope
fn tone(freq: f32, secs: f32, gain: f32) -> Vec<i16> {
    let total = (secs * SAMPLE_RATE as f32) as usize;
    let ramp = (0.005 * SAMPLE_RATE as f32) as usize;
    let mut samples = Vec::with_capacity(total);
    for i in 0..total {
        let t = i as f32 / SAMPLE_RATE as f32;
        let mut envelope = 1.0;
        if i < ramp {
            envelope = i as f32 / ramp as f32;
        } else if i + ramp >= total {
            envelope = (total - i) as f32 / ramp as f32;
        }
        let s = (2.0 * std::f32::consts::PI * freq * t).sin() * gain * envelope;
        samples.push((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16);
    }
    samples
}

/// Wrap mono 16-bit PCM samples in a RIFF/WAVE header
fn wav_bytes(samples: &[i16]) -> Vec<u8> {
    let channels = 1u16;
    let bits = 16u16;
    let byte_rate = SAMPLE_RATE * channels as u32 * bits as u32 / 8;
    let block_align = channels * bits / 8;
    let data_len = (samples.len() * 2) as u32;

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_header() {
        let bytes = wav_bytes(&[0, 1000, -1000]);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(bytes.len(), 44 + 6);
        let data_len = u32::from_le_bytes(bytes[40..44].try_into().unwrap());
        assert_eq!(data_len, 6);
    }

    #[test]
    fn test_tone_length_and_bounds() {
        let samples = tone(440.0, 0.1, 0.5);
        assert_eq!(samples.len(), 4410);
        // Half gain never clips
        assert!(samples.iter().all(|s| s.unsigned_abs() <= i16::MAX as u16 / 2 + 1));
    }

    #[test]
    fn test_cues_are_valid_wavs() {
        for bytes in [collect_chime(), explosion_burst(), music_loop()] {
            assert_eq!(&bytes[0..4], b"RIFF");
            assert!(bytes.len() > 44);
            assert_eq!(bytes.len() % 2, 0);
        }
    }
}
