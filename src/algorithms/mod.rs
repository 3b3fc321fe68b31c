//! The computational core: unavailable-period resolution and schedule
//! synthesis.

pub mod overrides;
pub mod synthesis;

pub use overrides::UnavailablePeriodResolver;
pub use synthesis::{ScheduleSynthesizer, SynthesisError};
