#![cfg_attr(target_arch = "spirv", no_std)]

pub mod constants;
pub mod gtao;
pub mod hilbert;
pub mod noise;
pub mod reference_rtao;
