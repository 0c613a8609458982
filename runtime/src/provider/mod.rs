mod two_phase;

pub use two_phase::{module_for, DataGeneration, ProviderPhase, TwoPhaseProvider};
