//! Epidemic engines operating on a `ContactGraph`.
//!
//! Both engines own their random number generator, which is injected at construction. Runs are
//! fully determined by the graph, the parameters and the state of that generator.

mod multistrain;
mod outcome;
mod sir;

pub use multistrain::{MultiStrainSimulation, Resolution, check_window, resolve_candidates};
pub use outcome::{MultiStrainOutcome, RunOutcome, SirOutcome, Termination, WindowViolation};
pub use sir::SirSimulation;

#[cfg(test)]
pub(crate) mod testing {
    use rand::RngCore;
    use std::collections::VecDeque;

    /// Generator replaying a fixed sequence of uniform draws in `[0, 1)`.
    pub struct ScriptedRng {
        draws: VecDeque<f64>,
    }

    impl ScriptedRng {
        pub fn new(draws: &[f64]) -> Self {
            Self {
                draws: draws.iter().copied().collect(),
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let draw = self.draws.pop_front().expect("Scripted draws exhausted");
            // floats are sampled from the upper 53 bits
            ((draw * (1u64 << 53) as f64) as u64) << 11
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }
}
