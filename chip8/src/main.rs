use std::env;
use std::path::Path;

mod run;

fn main() {
    env_logger::init();

    let args: Vec<_> = env::args_os().skip(1).collect();
    if args.len() != 1 {
        eprintln!("chip8emu (CHIP-8 interpreter)");
        eprintln!(" - requires one argument, the ROM image to load");
        return;
    }

    run::run(Path::new(&args[0]));
}
