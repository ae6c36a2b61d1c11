use log::{Level, log, warn};
use std::fmt;

use super::{
    Allocator, FitPolicy,
    state::{AllocationMap, BlockId, Bytes, MemoryBlock, MemoryCtx, MemoryProcess},
};
use crate::core::SimError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocEvent {
    Allocated {
        process: String,
        size: Bytes,
        block: String,
        // Position of the block in storage order
        block_index: usize,
        block_size: Bytes,
    },
    Unallocated {
        process: String,
        size: Bytes,
    },
}

impl fmt::Display for AllocEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocated {
                process,
                size,
                block_index,
                block_size,
                ..
            } => write!(
                f,
                "Process {process} ({size}) allocated to Block {block_index} ({block_size})"
            ),
            Self::Unallocated { process, size } => {
                write!(f, "Process {process} ({size}) left unallocated")
            }
        }
    }
}

/// One contiguous-allocation simulation: blocks, processes, and the
/// allocation map of the last run.
pub struct MemoryManager<A: Allocator> {
    pub ctx: MemoryCtx,
    pub allocator: A,
}

impl MemoryManager<FitPolicy> {
    pub fn with_policy(policy: FitPolicy) -> Self {
        Self::new(policy)
    }
}

impl<A: Allocator> MemoryManager<A> {
    pub fn new(allocator: A) -> Self {
        Self {
            ctx: MemoryCtx::new(),
            allocator,
        }
    }

    pub fn create_block(&mut self, name: impl Into<String>, size: Bytes) -> BlockId {
        self.ctx.create_block(MemoryBlock::new(name, size))
    }

    /// Registers a process. A duplicate name is logged and skipped.
    pub fn create_process(&mut self, name: impl Into<String>, size: Bytes) -> Result<(), SimError> {
        self.ctx
            .create_process(MemoryProcess::new(name, size))
            .inspect_err(|err| warn!("{}: {err}", self.allocator.name()))
    }

    pub fn reset(&mut self) {
        self.ctx.reset();
    }

    /// Walks the job queue in insertion order and gives each process a block
    /// chosen by the allocator. A block serves at most one process; a process
    /// nothing fits is recorded as unallocated.
    pub fn allocate_processes(&mut self, verbose: bool) -> Vec<AllocEvent> {
        let level = if verbose { Level::Info } else { Level::Debug };
        log!(
            level,
            "{} placing {} processes into {} blocks",
            self.allocator.name(),
            self.ctx.job_queue.len(),
            self.ctx.block_order.len()
        );

        self.ctx.allocated.clear();
        let mut events = Vec::with_capacity(self.ctx.job_queue.len());

        for process in &self.ctx.job_queue {
            let choice = self.allocator.select(self.ctx.free_blocks(), process);
            self.ctx.allocated.insert(&process.name, choice);

            let event = match choice {
                Some(id) => {
                    let block = &self.ctx.blocks[id];
                    AllocEvent::Allocated {
                        process: process.name.clone(),
                        size: process.size,
                        block: block.name.clone(),
                        block_index: self
                            .ctx
                            .block_order
                            .iter()
                            .position(|b| *b == id)
                            .unwrap_or_default(),
                        block_size: block.size,
                    }
                }
                None => AllocEvent::Unallocated {
                    process: process.name.clone(),
                    size: process.size,
                },
            };
            log!(level, "{event}");
            events.push(event);
        }

        events
    }

    pub fn job_queue(&self) -> &[MemoryProcess] {
        &self.ctx.job_queue
    }

    pub fn blocks(&self) -> Vec<&MemoryBlock> {
        self.ctx.blocks().map(|(_, block)| block).collect()
    }

    pub fn allocated(&self) -> &AllocationMap {
        &self.ctx.allocated
    }

    /// `(process, block)` pairs from the last run, in job-queue order.
    pub fn allocations(&self) -> impl Iterator<Item = (&str, Option<&MemoryBlock>)> {
        self.ctx
            .allocated
            .iter()
            .map(|(process, block)| (process, block.map(|id| self.ctx.block(id))))
    }

    /// The block `process` got in the last run, if any.
    pub fn block_of(&self, process: &str) -> Option<&MemoryBlock> {
        self.ctx.allocated.get(process).flatten().map(|id| self.ctx.block(id))
    }

    pub fn unallocated(&self) -> Vec<&str> {
        self.ctx
            .allocated
            .iter()
            .filter(|(_, block)| block.is_none())
            .map(|(process, _)| process)
            .collect()
    }

    pub fn process_by_name(&self, name: &str) -> Option<&MemoryProcess> {
        self.ctx.process_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{BestFit, FirstFit, WorstFit};

    fn textbook<A: Allocator>(allocator: A) -> MemoryManager<A> {
        let mut manager = MemoryManager::new(allocator);
        for (name, size) in [("b1", 100), ("b2", 500), ("b3", 200), ("b4", 300), ("b5", 600)] {
            manager.create_block(name, size);
        }
        for (name, size) in [("p1", 212), ("p2", 417), ("p3", 112), ("p4", 426)] {
            manager.create_process(name, size).unwrap();
        }
        manager
    }

    fn placement<A: Allocator>(manager: &MemoryManager<A>) -> Vec<(String, Option<String>)> {
        manager
            .allocations()
            .map(|(p, b)| (p.to_string(), b.map(|b| b.name.clone())))
            .collect()
    }

    fn expect(pairs: &[(&str, Option<&str>)]) -> Vec<(String, Option<String>)> {
        pairs
            .iter()
            .map(|(p, b)| (p.to_string(), b.map(str::to_string)))
            .collect()
    }

    #[test]
    fn first_fit_textbook() {
        let mut manager = textbook(FirstFit);
        let events = manager.allocate_processes(false);
        assert_eq!(
            placement(&manager),
            expect(&[("p1", Some("b2")), ("p2", Some("b5")), ("p3", Some("b3")), ("p4", None)])
        );
        assert_eq!(events[0].to_string(), "Process p1 (212) allocated to Block 1 (500)");
        assert_eq!(manager.unallocated(), ["p4"]);
    }

    #[test]
    fn best_fit_textbook() {
        let mut manager = textbook(BestFit);
        manager.allocate_processes(false);
        assert_eq!(
            placement(&manager),
            expect(&[
                ("p1", Some("b4")),
                ("p2", Some("b2")),
                ("p3", Some("b3")),
                ("p4", Some("b5"))
            ])
        );
    }

    #[test]
    fn worst_fit_textbook() {
        let mut manager = textbook(WorstFit);
        manager.allocate_processes(true);
        assert_eq!(
            placement(&manager),
            expect(&[("p1", Some("b5")), ("p2", Some("b2")), ("p3", Some("b4")), ("p4", None)])
        );
        assert_eq!(manager.block_of("p3").map(|b| b.size), Some(300));
        assert!(manager.block_of("p4").is_none());
    }

    #[test]
    fn rerun_starts_from_empty_map() {
        let mut manager = textbook(FitPolicy::FirstFit);
        manager.allocate_processes(false);
        let first = placement(&manager);
        manager.allocate_processes(false);
        assert_eq!(placement(&manager), first);
    }

    #[test]
    fn empty_job_queue_allocates_nothing() {
        let mut manager = MemoryManager::with_policy(FitPolicy::BestFit);
        manager.create_block("b1", 10);
        assert!(manager.allocate_processes(false).is_empty());
        assert!(manager.allocated().is_empty());
    }

    #[test]
    fn duplicate_process_keeps_original() {
        let mut manager = textbook(FitPolicy::WorstFit);
        assert!(manager.create_process("p1", 1).is_err());
        assert_eq!(manager.process_by_name("p1").map(|p| p.size), Some(212));
        assert_eq!(manager.job_queue().len(), 4);
    }
}
