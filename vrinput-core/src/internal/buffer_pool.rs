use vrinput_types::record::ActiveRecord;

use super::types::HashMap;

/// Submission buffers keyed by their exact length, at most one per length
#[derive(Debug, Default)]
pub struct BufferPool {
    buffers: HashMap<usize, Box<[ActiveRecord]>>,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self, len: usize) -> Box<[ActiveRecord]> {
        self.buffers
            .remove(&len)
            .unwrap_or_else(|| vec![ActiveRecord::default(); len].into_boxed_slice())
    }

    /// Keeps `buffer` for later unless one of the same length is already pooled
    pub fn release(&mut self, buffer: Box<[ActiveRecord]>) {
        self.buffers.entry(buffer.len()).or_insert(buffer);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }
}
