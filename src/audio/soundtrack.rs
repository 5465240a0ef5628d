//! Soundtrack sources: a decoded WAV file or the procedural Glicol fallback.

use glicol::Engine;
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::SampleTap;
use crate::error::AudioError;
use crate::params::audio_constants::{BLOCK_SIZE, OUTPUT_LIMIT};

/// Glicol composition (procedural synthwave loop)
const GLICOL_COMPOSITION: &str = r#"
~gate: speed 4.0 >> seq 45 _45 57 _45 52 _52 57 _50
~amp: ~gate >> envperc 0.002 0.2
~pit: ~gate >> mul 261.63
~bass: saw ~pit >> mul ~amp >> lpf ~sweep 4.0 >> mul 0.12
~sweep: sin 0.1 >> mul 900 >> add 1200
~pad: squ 110 >> lpf 700 1.0 >> mul 0.03
o: mix ~bass ~pad >> plate 0.15
"#;

/// Where the soundtrack comes from
#[derive(Debug, Clone, Default)]
pub enum SoundtrackSource {
    /// Procedural Glicol loop
    #[default]
    Synth,

    /// Looping WAV file
    Wav(PathBuf),
}

impl SoundtrackSource {
    /// Open the source for playback at `output_rate` Hz
    pub fn load(&self, output_rate: u32) -> Result<Soundtrack, AudioError> {
        let (voice, label) = match self {
            Self::Synth => (
                Voice::Synth(SynthTrack::new(output_rate)?),
                "glicol synth".to_string(),
            ),
            Self::Wav(path) => {
                let reader = hound::WavReader::open(path)?;
                (
                    Voice::Wav(WavTrack::from_reader(reader, output_rate)?),
                    path.display().to_string(),
                )
            }
        };
        Ok(Soundtrack {
            voice,
            tap: None,
            label,
        })
    }
}

/// Stereo frame source
enum Voice {
    Wav(WavTrack),
    Synth(SynthTrack),
}

impl Voice {
    fn next_frame(&mut self) -> [f32; 2] {
        match self {
            Self::Wav(track) => track.next_frame(),
            Self::Synth(track) => track.next_frame(),
        }
    }
}

/// Playing soundtrack with an optional analysis tap on its output
pub struct Soundtrack {
    voice: Voice,
    tap: Option<Arc<Mutex<SampleTap>>>,
    label: String,
}

impl Soundtrack {
    /// Route output into an analysis tap holding `capacity` samples
    ///
    /// Attaching is once-only: later calls return the tap already in place.
    pub fn attach_tap(&mut self, capacity: usize) -> Arc<Mutex<SampleTap>> {
        let tap = self
            .tap
            .get_or_insert_with(|| Arc::new(Mutex::new(SampleTap::new(capacity))));
        Arc::clone(tap)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Fill an interleaved output buffer
    ///
    /// Channels beyond the first two are silent; mono devices get the mix.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let mut tap = self.tap.as_ref().and_then(|tap| tap.lock().ok());

        for frame in out.chunks_mut(channels) {
            let [left, right] = self.voice.next_frame();
            // Safety limiter: hard clip everything sent to the speakers
            let left = left.clamp(-OUTPUT_LIMIT, OUTPUT_LIMIT);
            let right = right.clamp(-OUTPUT_LIMIT, OUTPUT_LIMIT);
            let mono = 0.5 * (left + right);

            match frame {
                [only] => *only = mono,
                [l, r, rest @ ..] => {
                    *l = left;
                    *r = right;
                    rest.fill(0.0);
                }
                [] => {}
            }

            if let Some(tap) = tap.as_mut() {
                tap.push(mono);
            }
        }
    }

    /// Fill the buffer with silence while paused
    ///
    /// The tap still sees the zeros so the spectrum decays.
    pub fn render_silence(&mut self, out: &mut [f32], channels: usize) {
        out.fill(0.0);
        if let Some(mut tap) = self.tap.as_ref().and_then(|tap| tap.lock().ok()) {
            for _ in 0..out.len() / channels.max(1) {
                tap.push(0.0);
            }
        }
    }
}

/// Decoded WAV data looped at the output rate
pub struct WavTrack {
    frames: Vec<[f32; 2]>,

    /// Source frames advanced per output frame
    step: f64,

    cursor: f64,
}

impl WavTrack {
    pub fn from_reader<R: Read>(
        reader: hound::WavReader<R>,
        output_rate: u32,
    ) -> Result<Self, AudioError> {
        let spec = reader.spec();
        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()?
            }
        };

        let channels = spec.channels.max(1) as usize;
        let frames: Vec<[f32; 2]> = samples
            .chunks_exact(channels)
            .map(|frame| match frame {
                [mono] => [*mono, *mono],
                [left, right, ..] => [*left, *right],
                [] => [0.0, 0.0],
            })
            .collect();

        if frames.is_empty() {
            return Err(AudioError::EmptySoundtrack);
        }

        log::info!(
            "Decoded soundtrack: {} frames, {} ch @ {}Hz",
            frames.len(),
            spec.channels,
            spec.sample_rate
        );

        Ok(Self {
            frames,
            step: spec.sample_rate as f64 / output_rate.max(1) as f64,
            cursor: 0.0,
        })
    }

    /// Next output frame, linearly interpolated and looping
    pub fn next_frame(&mut self) -> [f32; 2] {
        let len = self.frames.len();
        let index = self.cursor as usize % len;
        let next = (index + 1) % len;
        let frac = self.cursor.fract() as f32;

        let [l0, r0] = self.frames[index];
        let [l1, r1] = self.frames[next];
        let frame = [l0 + (l1 - l0) * frac, r0 + (r1 - r0) * frac];

        self.cursor = (self.cursor + self.step) % len as f64;
        frame
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Glicol engine rendered block by block
pub struct SynthTrack {
    engine: Engine<BLOCK_SIZE>,
    block: [[f32; 2]; BLOCK_SIZE],
    next: usize,
}

impl SynthTrack {
    pub fn new(sample_rate: u32) -> Result<Self, AudioError> {
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate as usize);
        engine.update_with_code(GLICOL_COMPOSITION);
        engine
            .update()
            .map_err(|e| AudioError::Synth(format!("{:?}", e)))?;

        Ok(Self {
            engine,
            block: [[0.0; 2]; BLOCK_SIZE],
            next: BLOCK_SIZE,
        })
    }

    pub fn next_frame(&mut self) -> [f32; 2] {
        if self.next >= BLOCK_SIZE {
            let (buffers, _) = self.engine.next_block(vec![]);
            for (i, frame) in self.block.iter_mut().enumerate() {
                *frame = [buffers[0][i], buffers[1][i]];
            }
            self.next = 0;
        }
        let frame = self.block[self.next];
        self.next += 1;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wav_bytes(spec: hound::WavSpec, samples: &[i16]) -> Cursor<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.set_position(0);
        cursor
    }

    fn mono_spec(sample_rate: u32) -> hound::WavSpec {
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        }
    }

    fn soundtrack(track: WavTrack) -> Soundtrack {
        Soundtrack {
            voice: Voice::Wav(track),
            tap: None,
            label: "test".to_string(),
        }
    }

    #[test]
    fn test_wav_loops_at_matching_rate() {
        let data = [0, 8192, -8192, 4096];
        let reader = hound::WavReader::new(wav_bytes(mono_spec(48000), &data)).unwrap();
        let mut track = WavTrack::from_reader(reader, 48000).unwrap();
        assert_eq!(track.len(), 4);

        let expected = [0.0, 0.25, -0.25, 0.125];
        for round in 0..2 {
            for (i, &value) in expected.iter().enumerate() {
                let [l, r] = track.next_frame();
                assert!((l - value).abs() < 1e-6, "round {round} frame {i}");
                assert_eq!(l, r);
            }
        }
    }

    #[test]
    fn test_wav_rate_conversion_interpolates() {
        let data = [0, 16384];
        let reader = hound::WavReader::new(wav_bytes(mono_spec(22050), &data)).unwrap();
        let mut track = WavTrack::from_reader(reader, 44100).unwrap();

        assert_eq!(track.next_frame()[0], 0.0);
        assert!((track.next_frame()[0] - 0.25).abs() < 1e-6);
        assert!((track.next_frame()[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_empty_wav_is_rejected() {
        let reader = hound::WavReader::new(wav_bytes(mono_spec(44100), &[])).unwrap();
        assert!(matches!(
            WavTrack::from_reader(reader, 44100),
            Err(AudioError::EmptySoundtrack)
        ));
    }

    #[test]
    fn test_render_clips_and_fills_channels() {
        let spec = hound::WavSpec {
            channels: 2,
            ..mono_spec(44100)
        };
        let data = [i16::MAX, i16::MIN];
        let reader = hound::WavReader::new(wav_bytes(spec, &data)).unwrap();
        let mut track = soundtrack(WavTrack::from_reader(reader, 44100).unwrap());

        let mut out = [1.0f32; 8];
        track.render(&mut out, 4);
        assert_eq!(out[0], OUTPUT_LIMIT);
        assert_eq!(out[1], -OUTPUT_LIMIT);
        assert_eq!(&out[2..4], &[0.0, 0.0]);
    }

    #[test]
    fn test_tap_attaches_once() {
        let reader = hound::WavReader::new(wav_bytes(mono_spec(44100), &[8192])).unwrap();
        let mut track = soundtrack(WavTrack::from_reader(reader, 44100).unwrap());

        let first = track.attach_tap(32);
        let second = track.attach_tap(64);
        assert!(Arc::ptr_eq(&first, &second));

        let mut out = [0.0f32; 6];
        track.render(&mut out, 2);
        assert_eq!(first.lock().unwrap().len(), 3);

        let mut window = [0.0; 3];
        first.lock().unwrap().copy_latest(&mut window);
        assert!(window.iter().all(|&s| (s - 0.25).abs() < 1e-6));
    }

    #[test]
    fn test_silence_still_feeds_tap() {
        let reader = hound::WavReader::new(wav_bytes(mono_spec(44100), &[8192])).unwrap();
        let mut track = soundtrack(WavTrack::from_reader(reader, 44100).unwrap());
        let tap = track.attach_tap(8);

        let mut out = [1.0f32; 8];
        track.render_silence(&mut out, 2);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(tap.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_missing_file_fails_to_load() {
        let source = SoundtrackSource::Wav(PathBuf::from("/nonexistent/soundtrack.wav"));
        assert!(matches!(source.load(44100), Err(AudioError::Decode(_))));
    }
}
