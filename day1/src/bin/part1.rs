use day1::{max_total, INPUT_PATH};
use util::{init_tracing, read_input_file};

use anyhow::Result;

fn main() -> Result<()> {
    init_tracing();

    let input = read_input_file(INPUT_PATH)?;
    let total = max_total(input.lines())?;

    println!("{total}");

    Ok(())
}
