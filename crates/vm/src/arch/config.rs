use derive_new::new;
use serde::{Deserialize, Serialize};

/// Machine-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(default)]
pub struct MachineConfig {
    /// Address the program image is written to. Execution starts here.
    pub load_address: u8,
    /// Emit a `TRACE:` line with the pc, upcoming bytes and registers before every cycle.
    pub trace: bool,
}

impl MachineConfig {
    pub fn with_load_address(mut self, load_address: u8) -> Self {
        self.load_address = load_address;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
