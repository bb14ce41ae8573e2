//! Raw syscalls over caller-owned buffers.
//!
//! Every loader follows one protocol: the caller's buffer capacity goes to the host in a length
//! cell, the host copies at most that many bytes starting at `offset`, and then overwrites the
//! cell with the full length of the item. The returned length can therefore be larger than the
//! buffer, which is how callers detect truncation. Calling with an empty buffer probes the size.
use alloc::vec;
use alloc::vec::Vec;
use core::ffi::{c_char, CStr};

use ckb_sys::*;

use crate::abort;
use crate::constants::{Bounds, CellField, HeaderField, InputField, Place, Source, BUF_SIZE};
use crate::error::{decode, SysError};
use crate::types::Byte32;

#[cfg(not(test))]
#[inline(always)]
unsafe fn syscall(a0: u64, a1: u64, a2: u64, a3: u64, a4: u64, a5: u64, number: u64) -> u64 {
    ckb_sys::syscall(a0, a1, a2, a3, a4, a5, number)
}

#[cfg(test)]
unsafe fn syscall(a0: u64, a1: u64, a2: u64, a3: u64, a4: u64, a5: u64, number: u64) -> u64 {
    crate::mock::syscall(a0, a1, a2, a3, a4, a5, number)
}

fn load(
    buf: &mut [u8],
    offset: usize,
    a3: u64,
    a4: u64,
    a5: u64,
    number: u64,
) -> Result<usize, SysError> {
    let mut len = buf.len() as u64;
    // The host writes at most `len` bytes into `buf` and one word into `len`.
    let ret = unsafe {
        syscall(
            buf.as_mut_ptr() as u64,
            &mut len as *mut u64 as u64,
            offset as u64,
            a3,
            a4,
            a5,
            number,
        )
    };
    decode(ret)?;
    Ok(len as usize)
}

/// Runs `load_fn` against an `N`-byte buffer. An item of any other length means the host broke
/// the ABI and execution is aborted.
pub(crate) fn load_exact<const N: usize>(
    load_fn: impl FnOnce(&mut [u8]) -> Result<usize, SysError>,
) -> Result<[u8; N], SysError> {
    let mut buf = [0u8; N];
    let len = load_fn(&mut buf)?;
    if len != N {
        abort();
    }
    Ok(buf)
}

/// Loads an item of unknown length into an exactly sized vector.
///
/// Probes with a [`BUF_SIZE`] stack buffer first. Items that do not fit are completed with a
/// second call starting at `BUF_SIZE`, which must report the same length as the probe.
pub(crate) fn load_unbounded(number: u64, a3: u64, a4: u64, a5: u64) -> Result<Vec<u8>, SysError> {
    let mut probe = [0u8; BUF_SIZE];
    let len = load(&mut probe, 0, a3, a4, a5, number)?;
    let mut data = vec![0u8; len];
    let prefix = len.min(BUF_SIZE);
    data[..prefix].copy_from_slice(&probe[..prefix]);
    if len > BUF_SIZE {
        let reloaded = load(&mut data[BUF_SIZE..], BUF_SIZE, a3, a4, a5, number)?;
        if reloaded != len {
            abort();
        }
    }
    Ok(data)
}

/// Exits the program with `code`. `0` means the script verified the transaction.
pub fn exit(code: i8) -> ! {
    unsafe { syscall(code as u64, 0, 0, 0, 0, 0, SYS_EXIT) };
    loop {
        core::hint::spin_loop()
    }
}

/// Returns the hash of the transaction being verified.
pub fn load_tx_hash() -> Result<Byte32, SysError> {
    load_exact::<32>(|buf| load(buf, 0, 0, 0, 0, SYS_LOAD_TX_HASH)).map(Byte32::from)
}

/// Returns the hash of the running script.
pub fn load_script_hash() -> Result<Byte32, SysError> {
    load_exact::<32>(|buf| load(buf, 0, 0, 0, 0, SYS_LOAD_SCRIPT_HASH)).map(Byte32::from)
}

/// Loads the serialized cell at `index` of `source`.
pub fn load_cell(
    buf: &mut [u8],
    offset: usize,
    index: usize,
    source: Source,
) -> Result<usize, SysError> {
    load(buf, offset, index as u64, source as u64, 0, SYS_LOAD_CELL)
}

/// Loads the serialized input at `index` of `source`.
pub fn load_input(
    buf: &mut [u8],
    offset: usize,
    index: usize,
    source: Source,
) -> Result<usize, SysError> {
    load(buf, offset, index as u64, source as u64, 0, SYS_LOAD_INPUT)
}

/// Loads the serialized header at `index` of `source`.
pub fn load_header(
    buf: &mut [u8],
    offset: usize,
    index: usize,
    source: Source,
) -> Result<usize, SysError> {
    load(buf, offset, index as u64, source as u64, 0, SYS_LOAD_HEADER)
}

/// Loads the witness at `index` of `source`.
pub fn load_witness(
    buf: &mut [u8],
    offset: usize,
    index: usize,
    source: Source,
) -> Result<usize, SysError> {
    load(buf, offset, index as u64, source as u64, 0, SYS_LOAD_WITNESS)
}

/// Loads the serialized transaction being verified.
pub fn load_transaction(buf: &mut [u8], offset: usize) -> Result<usize, SysError> {
    load(buf, offset, 0, 0, 0, SYS_LOAD_TRANSACTION)
}

/// Loads the serialized running script.
///
/// Use [`crate::high_level::load_script`] when the script length is not known in advance.
pub fn load_script(buf: &mut [u8], offset: usize) -> Result<usize, SysError> {
    load(buf, offset, 0, 0, 0, SYS_LOAD_SCRIPT)
}

/// Loads one field of a cell.
///
/// Returns `ItemMissing` when the cell does not carry the field, such as a missing type script.
pub fn load_cell_by_field(
    buf: &mut [u8],
    offset: usize,
    index: usize,
    source: Source,
    field: CellField,
) -> Result<usize, SysError> {
    load(
        buf,
        offset,
        index as u64,
        source as u64,
        field as u64,
        SYS_LOAD_CELL_BY_FIELD,
    )
}

/// Loads one field of a header.
///
/// Returns `WrongFormat` when the header does not carry the requested field.
pub fn load_header_by_field(
    buf: &mut [u8],
    offset: usize,
    index: usize,
    source: Source,
    field: HeaderField,
) -> Result<usize, SysError> {
    load(
        buf,
        offset,
        index as u64,
        source as u64,
        field as u64,
        SYS_LOAD_HEADER_BY_FIELD,
    )
}

/// Loads one field of an input.
pub fn load_input_by_field(
    buf: &mut [u8],
    offset: usize,
    index: usize,
    source: Source,
    field: InputField,
) -> Result<usize, SysError> {
    load(
        buf,
        offset,
        index as u64,
        source as u64,
        field as u64,
        SYS_LOAD_INPUT_BY_FIELD,
    )
}

/// Loads the data of the cell at `index` of `source`.
pub fn load_cell_data(
    buf: &mut [u8],
    offset: usize,
    index: usize,
    source: Source,
) -> Result<usize, SysError> {
    load(buf, offset, index as u64, source as u64, 0, SYS_LOAD_CELL_DATA)
}

/// Loads `content_size` bytes of cell data starting at `content_offset` into `buf` as
/// executable code. The rest of `buf` is zero-filled by the host.
///
/// On a real VM `buf` must be page aligned and a whole number of pages long. The window must
/// lie inside the cell data and fit into `buf`, otherwise `SliceOutOfBound` is returned.
pub fn load_cell_data_as_code(
    buf: &mut [u8],
    content_offset: usize,
    content_size: usize,
    index: usize,
    source: Source,
) -> Result<(), SysError> {
    let ret = unsafe {
        syscall(
            buf.as_mut_ptr() as u64,
            buf.len() as u64,
            content_offset as u64,
            content_size as u64,
            index as u64,
            source as u64,
            SYS_LOAD_CELL_DATA_AS_CODE,
        )
    };
    decode(ret)
}

/// Returns the revision of the running VM.
pub fn vm_version() -> u64 {
    unsafe { syscall(0, 0, 0, 0, 0, 0, SYS_VM_VERSION) }
}

/// Returns the cycles consumed so far, including the cost of this call.
pub fn current_cycles() -> u64 {
    unsafe { syscall(0, 0, 0, 0, 0, 0, SYS_CURRENT_CYCLES) }
}

/// Replaces the running program with the one found at `index` of `source`.
///
/// `place` chooses between the cell data and the witness, `bounds` selects the byte window.
/// Register and memory state are discarded, consumed cycles are kept. The call only returns
/// when the new program cannot be located or loaded.
pub fn exec(index: usize, source: Source, place: Place, bounds: Bounds, argv: &[&CStr]) -> SysError {
    let argv_ptrs: Vec<*const c_char> = argv.iter().map(|arg| arg.as_ptr()).collect();
    let ret = unsafe {
        syscall(
            index as u64,
            source as u64,
            place as u64,
            bounds.to_word(),
            argv_ptrs.len() as u64,
            argv_ptrs.as_ptr() as u64,
            SYS_EXEC,
        )
    };
    match decode(ret) {
        Err(err) => err,
        Ok(()) => abort(),
    }
}

/// Prints `message` through the host debug channel. NUL bytes are replaced with `?`.
pub fn debug(message: &str) {
    let mut c_message: Vec<u8> = message
        .bytes()
        .map(|b| if b == 0 { b'?' } else { b })
        .collect();
    c_message.push(0);
    unsafe { syscall(c_message.as_ptr() as u64, 0, 0, 0, 0, 0, SYS_DEBUG) };
}
