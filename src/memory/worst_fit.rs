use super::{Allocator, BlockId, MemoryBlock, MemoryProcess};

/// Largest free block that fits; the earliest one wins a tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFit;

impl Allocator for WorstFit {
    fn name(&self) -> &'static str {
        "WorstFit"
    }

    fn select<'a, I>(&self, free: I, process: &MemoryProcess) -> Option<BlockId>
    where
        I: Iterator<Item = (BlockId, &'a MemoryBlock)>,
    {
        // max_by_key would return the last of equal maxima
        free.filter(|(_, block)| block.fits(process))
            .fold(None::<(BlockId, &'a MemoryBlock)>, |best, candidate| match best {
                Some((_, kept)) if kept.size >= candidate.1.size => best,
                _ => Some(candidate),
            })
            .map(|(id, _)| id)
    }
}
