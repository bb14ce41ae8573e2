//! Loaders that return owned, exactly sized values.
//!
//! Items of unknown length go through one probe-then-complete helper, so a loader here costs
//! one syscall when the item fits in [`crate::constants::BUF_SIZE`] bytes and two otherwise.
use alloc::vec::Vec;

use ckb_sys::*;

use crate::abort;
use crate::constants::{CellField, HeaderField, InputField, Source};
use crate::error::SysError;
use crate::syscalls::{self, load_exact, load_unbounded};
use crate::types::Byte32;

/// Returns the serialized running script.
pub fn load_script() -> Result<Vec<u8>, SysError> {
    load_unbounded(SYS_LOAD_SCRIPT, 0, 0, 0)
}

/// Returns the serialized transaction being verified.
pub fn load_transaction() -> Result<Vec<u8>, SysError> {
    load_unbounded(SYS_LOAD_TRANSACTION, 0, 0, 0)
}

/// Returns the serialized cell at `index` of `source`.
pub fn load_cell(index: usize, source: Source) -> Result<Vec<u8>, SysError> {
    load_unbounded(SYS_LOAD_CELL, index as u64, source as u64, 0)
}

/// Returns the serialized input at `index` of `source`.
pub fn load_input(index: usize, source: Source) -> Result<Vec<u8>, SysError> {
    load_unbounded(SYS_LOAD_INPUT, index as u64, source as u64, 0)
}

/// Returns the serialized header at `index` of `source`.
pub fn load_header(index: usize, source: Source) -> Result<Vec<u8>, SysError> {
    load_unbounded(SYS_LOAD_HEADER, index as u64, source as u64, 0)
}

/// Returns the witness at `index` of `source`.
pub fn load_witness(index: usize, source: Source) -> Result<Vec<u8>, SysError> {
    load_unbounded(SYS_LOAD_WITNESS, index as u64, source as u64, 0)
}

/// Returns the data of the cell at `index` of `source`.
pub fn load_cell_data(index: usize, source: Source) -> Result<Vec<u8>, SysError> {
    load_unbounded(SYS_LOAD_CELL_DATA, index as u64, source as u64, 0)
}

/// Returns the serialized lock script of a cell.
pub fn load_cell_lock(index: usize, source: Source) -> Result<Vec<u8>, SysError> {
    load_unbounded(
        SYS_LOAD_CELL_BY_FIELD,
        index as u64,
        source as u64,
        CellField::Lock as u64,
    )
}

/// Returns the capacity of a cell in shannons.
pub fn load_cell_capacity(index: usize, source: Source) -> Result<u64, SysError> {
    load_exact::<8>(|buf| syscalls::load_cell_by_field(buf, 0, index, source, CellField::Capacity))
        .map(u64::from_le_bytes)
}

/// Returns the capacity a cell occupies with its lock, type and data.
pub fn load_cell_occupied_capacity(index: usize, source: Source) -> Result<u64, SysError> {
    load_exact::<8>(|buf| {
        syscalls::load_cell_by_field(buf, 0, index, source, CellField::OccupiedCapacity)
    })
    .map(u64::from_le_bytes)
}

/// Returns the lock script hash of a cell.
pub fn load_cell_lock_hash(index: usize, source: Source) -> Result<Byte32, SysError> {
    load_cell_hash(index, source, CellField::LockHash)
}

/// Returns the type script hash of a cell.
///
/// `ItemMissing` is returned both for a cell without a type script and for an index past the
/// last cell.
pub fn load_cell_type_hash(index: usize, source: Source) -> Result<Byte32, SysError> {
    load_cell_hash(index, source, CellField::TypeHash)
}

/// Returns the hash of a cell's data.
pub fn load_cell_data_hash(index: usize, source: Source) -> Result<Byte32, SysError> {
    load_cell_hash(index, source, CellField::DataHash)
}

fn load_cell_hash(index: usize, source: Source, field: CellField) -> Result<Byte32, SysError> {
    load_exact::<32>(|buf| syscalls::load_cell_by_field(buf, 0, index, source, field))
        .map(Byte32::from)
}

/// Returns the `since` value of an input.
pub fn load_input_since(index: usize, source: Source) -> Result<u64, SysError> {
    load_exact::<8>(|buf| syscalls::load_input_by_field(buf, 0, index, source, InputField::Since))
        .map(u64::from_le_bytes)
}

/// Returns the serialized out point an input spends.
pub fn load_input_out_point(index: usize, source: Source) -> Result<Vec<u8>, SysError> {
    load_unbounded(
        SYS_LOAD_INPUT_BY_FIELD,
        index as u64,
        source as u64,
        InputField::OutPoint as u64,
    )
}

pub fn load_header_epoch_number(index: usize, source: Source) -> Result<u64, SysError> {
    load_header_u64(index, source, HeaderField::EpochNumber)
}

pub fn load_header_epoch_start_block_number(
    index: usize,
    source: Source,
) -> Result<u64, SysError> {
    load_header_u64(index, source, HeaderField::EpochStartBlockNumber)
}

pub fn load_header_epoch_length(index: usize, source: Source) -> Result<u64, SysError> {
    load_header_u64(index, source, HeaderField::EpochLength)
}

fn load_header_u64(index: usize, source: Source, field: HeaderField) -> Result<u64, SysError> {
    load_exact::<8>(|buf| syscalls::load_header_by_field(buf, 0, index, source, field))
        .map(u64::from_le_bytes)
}

/// Returns the index of the first cell in `source` whose data hash is `data_hash`.
pub fn find_cell_by_data_hash(data_hash: &Byte32, source: Source) -> Option<usize> {
    QueryIter::new(load_cell_data_hash, source).position(|hash| &hash == data_hash)
}

/// Walks `query_fn(0, source)`, `query_fn(1, source)`, ... until the host reports
/// `ItemMissing`.
///
/// Any other error aborts execution. Since `ItemMissing` ends the walk, fields that can be
/// absent on a single item (such as a type hash) stop iteration at the first such item.
///
/// # Example
/// ```ignore
/// use ckb_sdk::{constants::Source, high_level::{load_cell_capacity, QueryIter}};
///
/// let total: u64 = QueryIter::new(load_cell_capacity, Source::GroupInput).sum();
/// ```
pub struct QueryIter<F> {
    query_fn: F,
    index: usize,
    source: Source,
}

impl<F> QueryIter<F> {
    pub fn new(query_fn: F, source: Source) -> Self {
        QueryIter {
            query_fn,
            index: 0,
            source,
        }
    }
}

impl<T, F> Iterator for QueryIter<F>
where
    F: Fn(usize, Source) -> Result<T, SysError>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match (self.query_fn)(self.index, self.source) {
            Ok(item) => {
                self.index += 1;
                Some(item)
            }
            Err(SysError::ItemMissing) => None,
            Err(_) => abort(),
        }
    }
}
