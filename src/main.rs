use std::{env, io, process};

use shale_lang::shale;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut stdout = io::stdout();
    let mut shale = shale::new(&mut stdout);

    match args.len() {
        n if n > 2 => {
            eprintln!("usage:shale [script]");
            process::exit(1);
        },
        2 => shale.run_file(args[1].clone()),
        _ => shale.run_prompt(),
    };
}
