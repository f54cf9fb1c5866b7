//! Traits describing the engine's external collaborators.
//!
//! The RNG oracle supplies deterministic randomness and the progress oracle
//! persists cross-session progress. The [`Env`] aggregate bundles them so the
//! engine can access everything it needs without hard coupling to concrete
//! implementations.
mod error;
mod progress;
mod rng;

pub use error::OracleError;
pub use progress::{ProgressError, ProgressOracle};
pub use rng::{PcgRng, RngOracle, RngStream, RollSequence, compute_seed};

/// Aggregates the collaborators required by the engine.
pub struct Env<'a, R, P>
where
    R: RngOracle + ?Sized,
    P: ProgressOracle + ?Sized,
{
    rng: Option<&'a R>,
    progress: Option<&'a P>,
}

impl<R, P> Clone for Env<'_, R, P>
where
    R: RngOracle + ?Sized,
    P: ProgressOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, P> Copy for Env<'_, R, P>
where
    R: RngOracle + ?Sized,
    P: ProgressOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn RngOracle + 'a, dyn ProgressOracle + 'a>;

impl<'a, R, P> Env<'a, R, P>
where
    R: RngOracle + ?Sized,
    P: ProgressOracle + ?Sized,
{
    pub fn new(rng: Option<&'a R>, progress: Option<&'a P>) -> Self {
        Self { rng, progress }
    }

    pub fn with_all(rng: &'a R, progress: &'a P) -> Self {
        Self::new(Some(rng), Some(progress))
    }

    pub fn empty() -> Self {
        Self {
            rng: None,
            progress: None,
        }
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the ProgressOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ProgressNotAvailable` if no progress oracle was provided.
    pub fn progress(&self) -> Result<&'a P, OracleError> {
        self.progress.ok_or(OracleError::ProgressNotAvailable)
    }
}

impl<'a, R, P> Env<'a, R, P>
where
    R: RngOracle + 'a,
    P: ProgressOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (consumes self).
    pub fn into_game_env(self) -> GameEnv<'a> {
        self.as_game_env()
    }

    /// Converts this environment into a trait-object based `GameEnv` (borrows self).
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        let progress: Option<&'a dyn ProgressOracle> = self.progress.map(|progress| progress as _);
        Env::new(rng, progress)
    }
}
