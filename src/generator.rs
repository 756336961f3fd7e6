use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::{
    config::GenerationConfig,
    encode::png::{ImageEncoder, PngEncoder},
    foundation::error::{CaptchaError, CaptchaResult},
    glyph::source::GlyphSource,
    layout::plan::LayoutPlan,
    render::{
        canvas::Canvas, compositor::GlyphCompositor, noise::NoiseInjector, warp::WaveDistorter,
    },
};

/// Options for [`CaptchaGenerator::generate_batch`].
#[derive(Clone, Debug, Default)]
pub struct BatchOpts {
    /// Worker thread count; `None` uses rayon defaults, `Some(0)` is rejected.
    pub threads: Option<usize>,
    /// Base seed; item `i` uses `seed + i`. `None` draws from thread-local entropy.
    pub seed: Option<u64>,
}

/// Renders distorted code images from a fixed configuration.
///
/// Every call allocates its own canvases and takes its randomness from the caller, so one
/// generator can serve many threads at once.
pub struct CaptchaGenerator<G, E = PngEncoder> {
    config: GenerationConfig,
    glyphs: G,
    encoder: E,
    noise: NoiseInjector,
}

impl<G: GlyphSource> CaptchaGenerator<G, PngEncoder> {
    /// Generator producing PNG bytes.
    pub fn with_png(config: GenerationConfig, glyphs: G) -> CaptchaResult<Self> {
        Self::new(config, glyphs, PngEncoder)
    }
}

impl<G: GlyphSource, E: ImageEncoder> CaptchaGenerator<G, E> {
    /// Validate `config` and bind the glyph source and encoder.
    pub fn new(config: GenerationConfig, glyphs: G, encoder: E) -> CaptchaResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            glyphs,
            encoder,
            noise: NoiseInjector::default(),
        })
    }

    /// Replace the default noise amounts.
    pub fn with_noise(mut self, noise: NoiseInjector) -> Self {
        self.noise = noise;
        self
    }

    /// Configuration this generator was built with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Run the full pipeline except encoding.
    #[tracing::instrument(skip_all, fields(glyphs = code.chars().count()))]
    pub fn render<R: Rng>(&self, code: &str, rng: &mut R) -> CaptchaResult<Canvas> {
        let cfg = &self.config;
        let plan = LayoutPlan::compute(cfg.width, cfg.height, code.chars().count());

        let mut canvas = Canvas::new(cfg.width, cfg.height, cfg.background);
        GlyphCompositor::new(&self.glyphs, &plan, cfg.text_color, cfg.point_size)
            .compose(&mut canvas, code, rng)?;
        self.noise.apply(&mut canvas, rng);

        Ok(WaveDistorter::new(cfg.background).apply(canvas))
    }

    /// Render `code` and encode it.
    pub fn generate<R: Rng>(&self, code: &str, rng: &mut R) -> CaptchaResult<Vec<u8>> {
        let canvas = self.render(code, rng)?;
        self.encoder.encode(&canvas)
    }

    /// Reproducible [`generate`](Self::generate): same seed, same bytes.
    pub fn generate_seeded(&self, code: &str, seed: u64) -> CaptchaResult<Vec<u8>> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(code, &mut rng)
    }

    /// [`generate`](Self::generate) with the calling thread's entropy source.
    pub fn generate_random(&self, code: &str) -> CaptchaResult<Vec<u8>> {
        self.generate(code, &mut rand::rng())
    }

    /// Generate one image per code in parallel.
    ///
    /// Output order follows `codes`; the first failure is returned.
    pub fn generate_batch<S>(&self, codes: &[S], opts: &BatchOpts) -> CaptchaResult<Vec<Vec<u8>>>
    where
        S: AsRef<str> + Sync,
    {
        let pool = build_thread_pool(opts.threads)?;
        let rendered = pool.install(|| {
            codes
                .par_iter()
                .enumerate()
                .map(|(idx, code)| match opts.seed {
                    Some(seed) => self.generate_seeded(code.as_ref(), seed.wrapping_add(idx as u64)),
                    None => self.generate_random(code.as_ref()),
                })
                .collect::<Vec<_>>()
        });
        rendered.into_iter().collect()
    }
}

fn build_thread_pool(threads: Option<usize>) -> CaptchaResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CaptchaError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CaptchaError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/generator.rs"]
mod tests;
