//! Selector words passed to the host alongside a syscall number.

/// Size of the stack buffer used to probe resources of unknown length.
pub const BUF_SIZE: usize = 1024;

/// Exit code used by [`crate::panic`].
pub const PANIC_EXIT_CODE: i8 = -1;
/// Exit code used by [`crate::abort`].
pub const ABORT_EXIT_CODE: i8 = -2;

/// Where a transaction resource comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum Source {
    Input = 1,
    Output = 2,
    CellDep = 3,
    HeaderDep = 4,
    /// Inputs sharing the running script.
    GroupInput = 0x0100000000000001,
    /// Outputs sharing the running script.
    GroupOutput = 0x0100000000000002,
}

/// Sub-fields of a cell that can be loaded on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum CellField {
    Capacity = 0,
    DataHash = 1,
    Lock = 2,
    LockHash = 3,
    Type = 4,
    TypeHash = 5,
    OccupiedCapacity = 6,
}

/// Sub-fields of a header that can be loaded on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum HeaderField {
    EpochNumber = 0,
    EpochStartBlockNumber = 1,
    EpochLength = 2,
}

/// Sub-fields of an input that can be loaded on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum InputField {
    OutPoint = 0,
    Since = 1,
}

/// Which part of a cell `exec` reads the new program from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum Place {
    CellData = 0,
    Witness = 1,
}

/// A byte window passed to `exec`, packed into one word as `offset << 32 | length`.
///
/// A `length` of zero reads to the end of the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub offset: u32,
    pub length: u32,
}

impl Bounds {
    pub fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    /// The whole item.
    pub fn whole() -> Self {
        Self::default()
    }

    pub fn to_word(self) -> u64 {
        (u64::from(self.offset) << 32) | u64::from(self.length)
    }

    pub fn from_word(word: u64) -> Self {
        Self {
            offset: (word >> 32) as u32,
            length: word as u32,
        }
    }
}
