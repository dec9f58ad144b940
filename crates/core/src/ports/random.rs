//! Uniform randomness used by the voting rule (empty-round fallback and
//! frequency tie-break). Injected so tests can pin the draw.
#[async_trait::async_trait]
pub trait RandomSource: Send + Sync {
    /// A uniform draw in `[0, 1)`.
    async fn next_f64(&self) -> f64;
}
