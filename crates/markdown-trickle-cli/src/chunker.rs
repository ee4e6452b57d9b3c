//! Random token-sized chunking, standing in for a model's output stream.

use markdown_trickle_config::{ConfigError, StreamSettings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct Chunker {
    rng: StdRng,
    seed: u64,
    min: usize,
    max: usize,
}

impl Chunker {
    /// Build a chunker from validated settings, drawing a seed if none is set.
    pub fn new(settings: &StreamSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        log::info!(
            "Chunking {}..={} chars with seed {seed}",
            settings.min_chunk,
            settings.max_chunk
        );
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            min: settings.min_chunk,
            max: settings.max_chunk,
        })
    }

    /// The seed in use; pass it back via `--seed` to replay a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split `text` into consecutive chunks of `min..=max` chars each. Only
    /// the last chunk may be shorter than `min`.
    pub fn split<'t>(&mut self, text: &'t str) -> Vec<&'t str> {
        let mut chunks = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let len = self.rng.random_range(self.min..=self.max);
            let end = rest
                .char_indices()
                .nth(len)
                .map_or(rest.len(), |(idx, _)| idx);
            let (chunk, tail) = rest.split_at(end);
            chunks.push(chunk);
            rest = tail;
        }
        chunks
    }
}
