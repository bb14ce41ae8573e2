//! An in-memory host that stands in for the VM while unit tests run.
//!
//! The syscall boundary in [`crate::syscalls`] routes here under `cfg(test)`. The host side of
//! the ABI is implemented for real: destination addresses and length cells passed by the
//! caller are written through, so tests exercise the same protocol code a contract runs.
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::string::{String, ToString};
use std::vec::Vec;

use ckb_sys::*;

use crate::constants::{Bounds, Place};

std::thread_local! {
    static MOCK_DATA: RefCell<MockData> = RefCell::new(MockData::new());
}

/// Cycles charged for every syscall.
pub const CYCLES_PER_SYSCALL: u64 = 500;

/// One cell, input or header of the mocked transaction.
#[derive(Debug, Clone, Default)]
pub struct MockItem {
    pub bytes: Vec<u8>,
    pub data: Vec<u8>,
    pub fields: HashMap<u64, Vec<u8>>,
}

impl MockItem {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            ..Default::default()
        }
    }

    pub fn with_data(mut self, data: &[u8]) -> Self {
        self.data = data.to_vec();
        self
    }

    pub fn with_field(mut self, field: u64, value: &[u8]) -> Self {
        self.fields.insert(field, value.to_vec());
        self
    }
}

/// Arguments seen by a mocked `exec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCall {
    pub index: u64,
    pub source: u64,
    pub place: u64,
    pub bounds: Bounds,
    pub argv: Vec<String>,
}

pub struct MockData {
    pub tx_hash: Vec<u8>,
    pub script_hash: Vec<u8>,
    pub script: Vec<u8>,
    pub transaction: Vec<u8>,
    pub cells: HashMap<u64, Vec<MockItem>>,
    pub inputs: HashMap<u64, Vec<MockItem>>,
    pub headers: HashMap<u64, Vec<MockItem>>,
    pub witnesses: HashMap<u64, Vec<Vec<u8>>>,
    pub vm_version: u64,
    pub cycles: u64,
    pub messages: Vec<String>,
    pub calls: Vec<u64>,
    pub exec_calls: Vec<ExecCall>,
    /// Returned verbatim by the next syscall instead of serving it.
    pub forced_result: Option<u64>,
    /// Replaces the script once the next `LOAD_SCRIPT` has been served.
    pub script_after_load: Option<Vec<u8>>,
}

impl MockData {
    pub fn new() -> Self {
        Self {
            tx_hash: [0x11; 32].to_vec(),
            script_hash: [0x22; 32].to_vec(),
            script: Vec::new(),
            transaction: Vec::new(),
            cells: HashMap::new(),
            inputs: HashMap::new(),
            headers: HashMap::new(),
            witnesses: HashMap::new(),
            vm_version: 1,
            cycles: 0,
            messages: Vec::new(),
            calls: Vec::new(),
            exec_calls: Vec::new(),
            forced_result: None,
            script_after_load: None,
        }
    }

    pub fn push_cell(&mut self, source: u64, cell: MockItem) {
        self.cells.entry(source).or_default().push(cell);
    }

    pub fn push_input(&mut self, source: u64, input: MockItem) {
        self.inputs.entry(source).or_default().push(input);
    }

    pub fn push_header(&mut self, source: u64, header: MockItem) {
        self.headers.entry(source).or_default().push(header);
    }

    pub fn push_witness(&mut self, source: u64, witness: &[u8]) {
        self.witnesses
            .entry(source)
            .or_default()
            .push(witness.to_vec());
    }

    fn serve(&mut self, a0: u64, a1: u64, a2: u64, a3: u64, a4: u64, a5: u64, n: u64) -> u64 {
        let item = |items: &HashMap<u64, Vec<MockItem>>| -> Option<MockItem> {
            items.get(&a4).and_then(|v| v.get(a3 as usize)).cloned()
        };
        match n {
            SYS_LOAD_TX_HASH => write_partial(a0, a1, a2, &self.tx_hash),
            SYS_LOAD_SCRIPT_HASH => write_partial(a0, a1, a2, &self.script_hash),
            SYS_LOAD_TRANSACTION => write_partial(a0, a1, a2, &self.transaction),
            SYS_LOAD_SCRIPT => {
                let ret = write_partial(a0, a1, a2, &self.script);
                if let Some(next) = self.script_after_load.take() {
                    self.script = next;
                }
                ret
            }
            SYS_LOAD_CELL => match item(&self.cells) {
                Some(cell) => write_partial(a0, a1, a2, &cell.bytes),
                None => CKB_ITEM_MISSING,
            },
            SYS_LOAD_CELL_DATA => match item(&self.cells) {
                Some(cell) => write_partial(a0, a1, a2, &cell.data),
                None => CKB_ITEM_MISSING,
            },
            SYS_LOAD_INPUT => match item(&self.inputs) {
                Some(input) => write_partial(a0, a1, a2, &input.bytes),
                None => CKB_ITEM_MISSING,
            },
            SYS_LOAD_HEADER => match item(&self.headers) {
                Some(header) => write_partial(a0, a1, a2, &header.bytes),
                None => CKB_ITEM_MISSING,
            },
            SYS_LOAD_WITNESS => match self.witnesses.get(&a4).and_then(|v| v.get(a3 as usize)) {
                Some(witness) => write_partial(a0, a1, a2, witness),
                None => CKB_ITEM_MISSING,
            },
            SYS_LOAD_CELL_BY_FIELD => match item(&self.cells) {
                Some(cell) => match cell.fields.get(&a5) {
                    Some(value) => write_partial(a0, a1, a2, value),
                    None => CKB_ITEM_MISSING,
                },
                None => CKB_ITEM_MISSING,
            },
            SYS_LOAD_INPUT_BY_FIELD => match item(&self.inputs) {
                Some(input) => match input.fields.get(&a5) {
                    Some(value) => write_partial(a0, a1, a2, value),
                    None => CKB_ITEM_MISSING,
                },
                None => CKB_ITEM_MISSING,
            },
            SYS_LOAD_HEADER_BY_FIELD => match item(&self.headers) {
                Some(header) => match header.fields.get(&a5) {
                    Some(value) => write_partial(a0, a1, a2, value),
                    None => CKB_WRONG_FORMAT,
                },
                None => CKB_ITEM_MISSING,
            },
            SYS_LOAD_CELL_DATA_AS_CODE => {
                let (memory_size, content_offset, content_size) =
                    (a1 as usize, a2 as usize, a3 as usize);
                let data = match self.cells.get(&a5).and_then(|v| v.get(a4 as usize)) {
                    Some(cell) => &cell.data,
                    None => return CKB_ITEM_MISSING,
                };
                let end = match content_offset.checked_add(content_size) {
                    Some(end) if end <= data.len() && content_size <= memory_size => end,
                    _ => return CKB_SLICE_OUT_OF_BOUND,
                };
                unsafe {
                    let dst = a0 as *mut u8;
                    core::ptr::copy_nonoverlapping(data[content_offset..end].as_ptr(), dst, content_size);
                    core::ptr::write_bytes(dst.add(content_size), 0, memory_size - content_size);
                }
                CKB_SUCCESS
            }
            SYS_VM_VERSION => self.vm_version,
            SYS_CURRENT_CYCLES => self.cycles,
            SYS_DEBUG => {
                let message = unsafe { CStr::from_ptr(a0 as *const c_char) };
                self.messages.push(message.to_string_lossy().to_string());
                CKB_SUCCESS
            }
            SYS_EXEC => {
                let argv = (0..a4 as usize)
                    .map(|i| unsafe {
                        let arg = *(a5 as *const *const c_char).add(i);
                        CStr::from_ptr(arg).to_string_lossy().to_string()
                    })
                    .collect();
                let bounds = Bounds::from_word(a3);
                self.exec_calls.push(ExecCall {
                    index: a0,
                    source: a1,
                    place: a2,
                    bounds,
                    argv,
                });
                let target = if a2 == Place::Witness as u64 {
                    self.witnesses.get(&a1).and_then(|v| v.get(a0 as usize)).cloned()
                } else {
                    self.cells
                        .get(&a1)
                        .and_then(|v| v.get(a0 as usize))
                        .map(|cell| cell.data.clone())
                };
                let Some(target) = target else {
                    return CKB_ITEM_MISSING;
                };
                let end = if bounds.length == 0 {
                    Some(target.len())
                } else {
                    (bounds.offset as usize).checked_add(bounds.length as usize)
                };
                match end {
                    Some(end) if bounds.offset as usize <= end && end <= target.len() => {
                        std::panic!("Mocked exec called")
                    }
                    _ => CKB_SLICE_OUT_OF_BOUND,
                }
            }
            SYS_EXIT => std::panic!("Mocked exit called with code {}", a0 as i8),
            _ => std::panic!("Mocked host got unknown syscall number {}", n),
        }
    }
}

/// Copies the part of `item` starting at `offset` into `a0`, bounded by the capacity stored in
/// the length cell at `a1`, then overwrites the length cell with the full length of `item`.
fn write_partial(a0: u64, a1: u64, offset: u64, item: &[u8]) -> u64 {
    let len_cell = a1 as *mut u64;
    let offset = offset as usize;
    unsafe {
        let capacity = *len_cell as usize;
        if offset < item.len() {
            let n = capacity.min(item.len() - offset);
            core::ptr::copy_nonoverlapping(item[offset..].as_ptr(), a0 as *mut u8, n);
        }
        *len_cell = item.len() as u64;
    }
    CKB_SUCCESS
}

pub fn syscall(a0: u64, a1: u64, a2: u64, a3: u64, a4: u64, a5: u64, n: u64) -> u64 {
    MOCK_DATA.with(|data| {
        let mut mock = data.borrow_mut();
        mock.calls.push(n);
        mock.cycles += CYCLES_PER_SYSCALL;
        if let Some(ret) = mock.forced_result.take() {
            return ret;
        }
        mock.serve(a0, a1, a2, a3, a4, a5, n)
    })
}

pub fn with_mock<R>(f: impl FnOnce(&mut MockData) -> R) -> R {
    MOCK_DATA.with(|data| f(&mut data.borrow_mut()))
}

pub fn get_mock_msgs() -> Vec<String> {
    with_mock(|mock| mock.messages.clone())
}

/// Syscall numbers issued so far, oldest first.
pub fn get_mock_calls() -> Vec<u64> {
    with_mock(|mock| mock.calls.clone())
}

pub fn clear_mock_calls() {
    with_mock(|mock| mock.calls.clear())
}
