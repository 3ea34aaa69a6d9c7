use ls8_instructions::MEMORY_SIZE;
use thiserror::Error;


#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    #[error("address {address:#x} out of bounds for memory of size {:#x}", MEMORY_SIZE)]
    OutOfBounds { address: usize },
}

/// Flat byte-addressed memory. Addresses are `usize` so that a program counter or operand
/// address that has run past the end is reported instead of wrapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }

    pub fn read(&self, address: usize) -> Result<u8, MemoryError> {
        self.cells
            .get(address)
            .copied()
            .ok_or(MemoryError::OutOfBounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(MemoryError::OutOfBounds { address })?;
        *cell = value;
        Ok(())
    }

    /// Writes `bytes` starting at `start`. Nothing is written if the image does not fit; the
    /// error names the first address past the end of memory.
    pub fn load(&mut self, start: usize, bytes: &[u8]) -> Result<(), MemoryError> {
        let end = start.saturating_add(bytes.len());
        if end > MEMORY_SIZE {
            return Err(MemoryError::OutOfBounds {
                address: start.max(MEMORY_SIZE),
            });
        }
        for (offset, &byte) in bytes.iter().enumerate() {
            self.write(start + offset, byte)?;
        }
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub fn size(&self) -> usize {
        MEMORY_SIZE
    }
}
