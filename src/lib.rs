#![allow(clippy::many_single_char_names)]

mod prelude;
pub mod driver;
pub mod mask;
pub mod planner;
pub mod types;

pub use driver::{generate_mask_table, Outcome};
pub use types::*;

pub fn initialize_logger() {
    use std::time::Instant;

    lazy_static::lazy_static! {
        static ref START_TIMING: Instant = Instant::now();
    }

    let _ = *START_TIMING;

    env_logger::Builder::from_default_env()
        .format(|formatter, record| {
            use std::io::Write;
            let duration = START_TIMING.elapsed();

            writeln!(
                formatter,
                "[{} {:.06}] {}: {}",
                record.module_path().unwrap_or("?"),
                duration.as_secs_f64(),
                record.level(),
                record.args(),
            )
        })
        .init();
}
