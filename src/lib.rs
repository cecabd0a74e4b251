#![no_std]

//! An incremental, allocation-free decoder for the Intel HEX format.
//!
//! Ihexline accepts text a byte (or a slice) at a time, buffering one record
//! line in a fixed-size region and decoding it in place. It is aimed at
//! bootloaders and host tooling that stream firmware images without holding
//! the whole file in memory.
//!
//! Most users should begin with the functions in the [`avec`] module, which
//! decode a slice or reader into a receiver of data records. Applications
//! needing control over buffering and flow (such as those running on embedded
//! systems) can drive the decoder in the [`sans`] module directly.
//!
//! Supported record types are Data (`00`), End Of File (`01`), Extended Linear
//! Address (`04`) and Start Linear Address (`05`, accepted and ignored).
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoder (default).
//! - `log`: emit decoder events through the `log` facade.
//! - `defmt`: emit decoder events through `defmt`, and derive `defmt::Format`
//! for public value types.

#[macro_use]
mod fmt;

pub mod avec;
pub mod sans;
