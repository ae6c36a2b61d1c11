use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

use crate::core::SimError;

pub type Bytes = u64;

new_key_type! {
    pub struct BlockId;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub name: String,
    pub size: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryProcess {
    pub name: String,
    pub size: Bytes,
}

impl MemoryBlock {
    pub fn new(name: impl Into<String>, size: Bytes) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    pub fn fits(&self, process: &MemoryProcess) -> bool {
        process.size <= self.size
    }
}

impl MemoryProcess {
    pub fn new(name: impl Into<String>, size: Bytes) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Result of one allocation run: every process maps to a block or to
/// nothing. Iterates in job-queue order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationMap {
    entries: Vec<(String, Option<BlockId>)>,
    index: FxHashMap<String, usize>,
    taken: FxHashSet<BlockId>,
}

impl AllocationMap {
    pub fn insert(&mut self, process: &str, block: Option<BlockId>) {
        if let Some(block) = block {
            let fresh = self.taken.insert(block);
            debug_assert!(fresh, "Block assigned to {process} is already taken");
        }

        match self.index.get(process) {
            Some(&i) => self.entries[i].1 = block,
            None => {
                self.index.insert(process.to_string(), self.entries.len());
                self.entries.push((process.to_string(), block));
            }
        }
    }

    /// `None` if the process was not part of the run, `Some(None)` if it
    /// got no block.
    pub fn get(&self, process: &str) -> Option<Option<BlockId>> {
        self.index.get(process).map(|i| self.entries[*i].1)
    }

    pub fn is_taken(&self, block: BlockId) -> bool {
        self.taken.contains(&block)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<BlockId>)> {
        self.entries.iter().map(|(name, block)| (name.as_str(), *block))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.taken.clear();
    }
}

/// All state owned by one memory simulation instance.
#[derive(Debug, Default)]
pub struct MemoryCtx {
    pub blocks: SlotMap<BlockId, MemoryBlock>,
    // Storage order; allocators scan blocks in this order.
    pub block_order: Vec<BlockId>,
    pub job_queue: Vec<MemoryProcess>,
    pub allocated: AllocationMap,
}

impl MemoryCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_block(&mut self, block: MemoryBlock) -> BlockId {
        let id = self.blocks.insert(block);
        self.block_order.push(id);
        id
    }

    pub fn create_process(&mut self, process: MemoryProcess) -> Result<(), SimError> {
        if self.process_by_name(&process.name).is_some() {
            return Err(SimError::DuplicateProcess { name: process.name });
        }
        self.job_queue.push(process);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn block(&self, id: BlockId) -> &MemoryBlock {
        &self.blocks[id]
    }

    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &MemoryBlock)> {
        self.block_order.iter().map(|id| (*id, &self.blocks[*id]))
    }

    /// Blocks not handed out yet in this run, in storage order.
    pub fn free_blocks(&self) -> impl Iterator<Item = (BlockId, &MemoryBlock)> {
        self.blocks().filter(|(id, _)| !self.allocated.is_taken(*id))
    }

    pub fn process_by_name(&self, name: &str) -> Option<&MemoryProcess> {
        self.job_queue.iter().find(|process| process.name == name)
    }
}
