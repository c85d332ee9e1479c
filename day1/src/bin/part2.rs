use day1::{top_three_total, INPUT_PATH};
use util::{init_tracing, read_input_file};

use anyhow::Result;

fn main() -> Result<()> {
    init_tracing();

    let input = read_input_file(INPUT_PATH)?;
    let total = top_three_total(input.lines())?;

    println!("{total}");

    Ok(())
}
