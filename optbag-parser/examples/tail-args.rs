//! This example drives the parser by hand and collects everything that
//! follows the `--` terminator.
use optbag_parser::{Error, Parser};

fn main() -> Result<(), Error> {
    let mut parser = Parser::from_env();

    let opts = parser.collect_opts()?;
    for opt in &opts {
        match opt.value() {
            Some(value) => println!("option {:?} = {}", opt.name(), value),
            None => println!("option {:?}", opt.name()),
        }
    }

    let mut tail = Vec::new();
    while let Some(arg) = parser.raw_arg() {
        tail.push(arg);
    }
    println!("after --: {:?}", tail);

    Ok(())
}
