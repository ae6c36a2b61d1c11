use super::{Allocator, BlockId, MemoryBlock, MemoryProcess};

/// Smallest free block that fits; the earliest one wins a tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFit;

impl Allocator for BestFit {
    fn name(&self) -> &'static str {
        "BestFit"
    }

    fn select<'a, I>(&self, free: I, process: &MemoryProcess) -> Option<BlockId>
    where
        I: Iterator<Item = (BlockId, &'a MemoryBlock)>,
    {
        // min_by_key keeps the first of equal minima
        free.filter(|(_, block)| block.fits(process))
            .min_by_key(|(_, block)| block.size)
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{
        MemoryCtx,
        test_util::{process, textbook_blocks},
    };

    #[test]
    fn takes_tightest_block() {
        let (ctx, ids) = textbook_blocks();
        assert_eq!(BestFit.select(ctx.blocks(), &process(212)), Some(ids[3]));
        assert_eq!(BestFit.select(ctx.blocks(), &process(417)), Some(ids[1]));
        assert_eq!(BestFit.select(ctx.blocks(), &process(1000)), None);
    }

    #[test]
    fn tie_goes_to_first_block() {
        let mut ctx = MemoryCtx::new();
        let first = ctx.create_block(MemoryBlock::new("x", 50));
        ctx.create_block(MemoryBlock::new("y", 50));
        assert_eq!(BestFit.select(ctx.blocks(), &process(10)), Some(first));
    }
}
