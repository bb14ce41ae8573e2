//! Errors returned by the host through the syscall result register.
use core::fmt;

use ckb_sys::{
    CKB_INDEX_OUT_OF_BOUND, CKB_ITEM_MISSING, CKB_SLICE_OUT_OF_BOUND, CKB_SUCCESS,
    CKB_WRONG_FORMAT,
};

use crate::abort;

/// The closed set of errors the host reports. A successful call never maps to a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SysError {
    /// The source or field selector is not recognized.
    IndexOutOfBound,
    /// The requested item does not exist.
    ItemMissing,
    /// The requested range lies outside the item.
    SliceOutOfBound,
    /// The item exists but does not support the requested field.
    WrongFormat,
}

impl SysError {
    /// Returns the raw code the host uses for this error.
    pub fn code(&self) -> u64 {
        match self {
            SysError::IndexOutOfBound => CKB_INDEX_OUT_OF_BOUND,
            SysError::ItemMissing => CKB_ITEM_MISSING,
            SysError::SliceOutOfBound => CKB_SLICE_OUT_OF_BOUND,
            SysError::WrongFormat => CKB_WRONG_FORMAT,
        }
    }
}

impl fmt::Display for SysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SysError::IndexOutOfBound => "index out of bound",
            SysError::ItemMissing => "item missing",
            SysError::SliceOutOfBound => "slice out of bound",
            SysError::WrongFormat => "wrong format",
        };
        f.write_str(msg)
    }
}

/// Decodes the raw value returned by a syscall.
///
/// Codes outside the documented set mean the host broke the ABI, so execution is aborted
/// instead of returning a recoverable error.
pub(crate) fn decode(ret: u64) -> Result<(), SysError> {
    match ret {
        CKB_SUCCESS => Ok(()),
        CKB_INDEX_OUT_OF_BOUND => Err(SysError::IndexOutOfBound),
        CKB_ITEM_MISSING => Err(SysError::ItemMissing),
        CKB_SLICE_OUT_OF_BOUND => Err(SysError::SliceOutOfBound),
        CKB_WRONG_FORMAT => Err(SysError::WrongFormat),
        _ => abort(),
    }
}
