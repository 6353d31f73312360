//! Structural faults in a [`crate::Program`] — this crate's share of
//! §8 invariant 6 ("the compiler produces only in-range jumps").

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProgramError {
    #[error("state {index} has no states at all")]
    Empty { index: usize },

    #[error("state {index}'s `{label}` jump ({offset:+}) targets {target}, out of range [0, {len})")]
    OffsetOutOfRange {
        index: usize,
        label: &'static str,
        offset: i32,
        target: i64,
        len: usize,
    },
}
