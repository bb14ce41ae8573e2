//! Contract-side interface to the CKB-VM host.
//!
//! [`syscalls`] wraps each host operation over caller-owned buffers, [`high_level`] returns
//! owned values sized to the loaded item.
#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub use ckb_sys as sys;

pub mod constants;
pub mod error;
pub mod high_level;
pub mod syscalls;
pub mod types;

#[cfg(test)]
mod mock;

pub use error::SysError;

#[doc(hidden)]
pub mod __private {
    pub use alloc::format;
}

/// Prints a formatted message through the host debug channel.
///
/// Expands to nothing unless the contract is built with `debug_assertions`.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        $crate::syscalls::debug(&$crate::__private::format!($($arg)*));
    }};
}

/// Aborts the current contract execution without a custom message.
/// To include a message, use [`crate::panic`].
pub fn abort() -> ! {
    syscalls::exit(constants::ABORT_EXIT_CODE)
}

/// Terminates the execution of the program with the message.
pub fn panic(message: &str) -> ! {
    syscalls::debug(message);
    syscalls::exit(constants::PANIC_EXIT_CODE)
}
