//! Per-session configuration. No process-wide globals.

use crate::target::LaunchPolicy;
use serde::{Deserialize, Serialize};

/// When the relaunch-retry path may restart an unavailable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelaunchMode {
    Never,
    /// Only for the reserved launch-like opcodes (no-op launch and
    /// open-application).
    LaunchOpcodesOnly,
    Always,
}

/// A text-matching aspect the target may consider or ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consideration {
    Case,
    Diacritic,
    WhiteSpace,
    Hyphens,
    Expansion,
    Punctuation,
    NumericStrings,
}

impl Consideration {
    /// The aspect's bit in the low half of the wire mask.
    fn bit(self) -> u32 {
        match self {
            Consideration::Case => 1 << 0,
            Consideration::Diacritic => 1 << 1,
            Consideration::WhiteSpace => 1 << 2,
            Consideration::Hyphens => 1 << 3,
            Consideration::Expansion => 1 << 4,
            Consideration::Punctuation => 1 << 5,
            Consideration::NumericStrings => 1 << 7,
        }
    }
}

/// The considered/ignored aspect sets, packed to one u32 attribute:
/// consider bits occupy the low 16 bits, ignore bits the high 16.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Considerations {
    consider: Vec<Consideration>,
    ignore: Vec<Consideration>,
}

impl Considerations {
    /// No aspects set; the target applies its own defaults.
    pub fn none() -> Self {
        Self {
            consider: Vec::new(),
            ignore: Vec::new(),
        }
    }

    pub fn considering(mut self, aspect: Consideration) -> Self {
        self.consider.push(aspect);
        self
    }

    pub fn ignoring(mut self, aspect: Consideration) -> Self {
        self.ignore.push(aspect);
        self
    }

    /// Packs both sets into the wire mask.
    pub fn mask(&self) -> u32 {
        let consider = self.consider.iter().fold(0u32, |acc, a| acc | a.bit());
        let ignore = self.ignore.iter().fold(0u32, |acc, a| acc | a.bit());
        consider | (ignore << 16)
    }
}

impl Default for Considerations {
    /// Ignore letter case, consider everything else.
    fn default() -> Self {
        Considerations::none().ignoring(Consideration::Case)
    }
}

/// Session-level knobs with protocol-defined defaults. The unavailable
/// code set and timeout are environment constants, not semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Applied when a request carries no explicit timeout. Hard-coded
    /// here because transport "default timeout" sentinels are
    /// unreliable.
    pub default_timeout_ticks: i64,
    /// Transport codes meaning the target process is gone.
    pub unavailable_codes: Vec<i32>,
    pub relaunch: RelaunchMode,
    pub launch: LaunchPolicy,
    pub considerations: Considerations,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            default_timeout_ticks: 120,
            unavailable_codes: vec![-600, -609],
            relaunch: RelaunchMode::LaunchOpcodesOnly,
            launch: LaunchPolicy::IfNeeded,
            considerations: Considerations::default(),
        }
    }
}
