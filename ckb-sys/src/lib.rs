#![no_std]

// Every host operation takes six word-sized operands and returns one word.
type Word = u64;
type SyscallNumber = u64;

/*
 * Control API
 */
pub const SYS_EXIT: SyscallNumber = 93;
pub const SYS_VM_VERSION: SyscallNumber = 2041;
pub const SYS_CURRENT_CYCLES: SyscallNumber = 2042;
pub const SYS_EXEC: SyscallNumber = 2043;
/*
 * Transaction API
 */
pub const SYS_LOAD_TRANSACTION: SyscallNumber = 2051;
pub const SYS_LOAD_SCRIPT: SyscallNumber = 2052;
pub const SYS_LOAD_TX_HASH: SyscallNumber = 2061;
pub const SYS_LOAD_SCRIPT_HASH: SyscallNumber = 2062;
pub const SYS_LOAD_CELL: SyscallNumber = 2071;
pub const SYS_LOAD_HEADER: SyscallNumber = 2072;
pub const SYS_LOAD_INPUT: SyscallNumber = 2073;
pub const SYS_LOAD_WITNESS: SyscallNumber = 2074;
pub const SYS_LOAD_CELL_BY_FIELD: SyscallNumber = 2081;
pub const SYS_LOAD_HEADER_BY_FIELD: SyscallNumber = 2082;
pub const SYS_LOAD_INPUT_BY_FIELD: SyscallNumber = 2083;
pub const SYS_LOAD_CELL_DATA_AS_CODE: SyscallNumber = 2091;
pub const SYS_LOAD_CELL_DATA: SyscallNumber = 2092;
/*
 * Misc API
 */
pub const SYS_DEBUG: SyscallNumber = 2177;

/*
 * Result codes written to `a0` by the host
 */
pub const CKB_SUCCESS: Word = 0;
pub const CKB_INDEX_OUT_OF_BOUND: Word = 1;
pub const CKB_ITEM_MISSING: Word = 2;
pub const CKB_SLICE_OUT_OF_BOUND: Word = 3;
pub const CKB_WRONG_FORMAT: Word = 4;

/// Traps into the VM with operands in `a0..a5` and the syscall number in `a7`.
///
/// # Safety
///
/// Operands are passed to the host verbatim. Any operand the host treats as an address must
/// point to memory that is valid for the access the syscall performs.
#[cfg(target_arch = "riscv64")]
#[inline(always)]
pub unsafe fn syscall(
    a0: Word,
    a1: Word,
    a2: Word,
    a3: Word,
    a4: Word,
    a5: Word,
    number: SyscallNumber,
) -> Word {
    let mut ret = a0;
    core::arch::asm!(
        "ecall",
        inout("a0") ret,
        in("a1") a1,
        in("a2") a2,
        in("a3") a3,
        in("a4") a4,
        in("a5") a5,
        in("a7") number,
    );
    ret
}

#[cfg(not(target_arch = "riscv64"))]
extern "C" {
    // Supplied by a simulator when a contract is built for the host architecture.
    #[link_name = "ckb_syscall"]
    pub fn syscall(
        a0: Word,
        a1: Word,
        a2: Word,
        a3: Word,
        a4: Word,
        a5: Word,
        number: SyscallNumber,
    ) -> Word;
}
