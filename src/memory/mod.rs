pub mod best_fit;
pub mod first_fit;
pub mod manager;
pub mod state;
pub mod worst_fit;

pub use best_fit::BestFit;
pub use first_fit::FirstFit;
pub use manager::{AllocEvent, MemoryManager};
pub use state::{AllocationMap, BlockId, Bytes, MemoryBlock, MemoryCtx, MemoryProcess};
pub use worst_fit::WorstFit;

/// Picks a block for one process. Allocators hold no state between calls;
/// the manager only offers blocks that are still free, in storage order.
pub trait Allocator {
    fn name(&self) -> &'static str;

    fn select<'a, I>(&self, free: I, process: &MemoryProcess) -> Option<BlockId>
    where
        I: Iterator<Item = (BlockId, &'a MemoryBlock)>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitPolicy {
    FirstFit,
    BestFit,
    WorstFit,
}

impl FitPolicy {
    pub const ALL: [FitPolicy; 3] = [FitPolicy::FirstFit, FitPolicy::BestFit, FitPolicy::WorstFit];
}

impl Allocator for FitPolicy {
    fn name(&self) -> &'static str {
        match self {
            Self::FirstFit => FirstFit.name(),
            Self::BestFit => BestFit.name(),
            Self::WorstFit => WorstFit.name(),
        }
    }

    fn select<'a, I>(&self, free: I, process: &MemoryProcess) -> Option<BlockId>
    where
        I: Iterator<Item = (BlockId, &'a MemoryBlock)>,
    {
        match self {
            Self::FirstFit => FirstFit.select(free, process),
            Self::BestFit => BestFit.select(free, process),
            Self::WorstFit => WorstFit.select(free, process),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::{BlockId, MemoryBlock, MemoryCtx, MemoryProcess};

    /// The five-block layout used throughout the allocator tests.
    pub fn textbook_blocks() -> (MemoryCtx, Vec<BlockId>) {
        let mut ctx = MemoryCtx::new();
        let ids: Vec<_> = [("b1", 100), ("b2", 500), ("b3", 200), ("b4", 300), ("b5", 600)]
            .into_iter()
            .map(|(name, size)| ctx.create_block(MemoryBlock::new(name, size)))
            .collect();
        (ctx, ids)
    }

    pub fn process(size: u64) -> MemoryProcess {
        MemoryProcess::new("p", size)
    }
}
