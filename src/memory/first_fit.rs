use super::{Allocator, BlockId, MemoryBlock, MemoryProcess};

/// First free block, in storage order, large enough for the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl Allocator for FirstFit {
    fn name(&self) -> &'static str {
        "FirstFit"
    }

    fn select<'a, I>(&self, mut free: I, process: &MemoryProcess) -> Option<BlockId>
    where
        I: Iterator<Item = (BlockId, &'a MemoryBlock)>,
    {
        free.find(|(_, block)| block.fits(process)).map(|(id, _)| id)
    }
}
