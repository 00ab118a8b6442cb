pub use landmask_core::prelude::*;
