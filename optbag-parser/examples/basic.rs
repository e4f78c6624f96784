//! This is a basic example: parse the whole command line up front, then
//! look options up by name.
use optbag_parser::{parse, Error};

fn execute() -> Result<(), Error> {
    let parsed = parse(std::env::args_os())?;

    match parsed.find_long("test") {
        Some(opt) => println!("--test = {}", opt.value().unwrap_or("(no value)")),
        None => println!("--test not given"),
    }
    match parsed.find_short('t') {
        Some(opt) => println!("-t = {}", opt.value().unwrap_or("(no value)")),
        None => println!("-t not given"),
    }

    Ok(())
}

fn main() {
    if let Err(err) = execute() {
        eprintln!("error: {}", err);
        if let Some(value) = err.raw_value() {
            eprintln!("  value: {:?}", value.to_string_lossy());
        }
        std::process::exit(1);
    }
}
