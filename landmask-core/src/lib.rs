mod geom;
pub mod prelude;
pub mod util;

pub use geom::*;
