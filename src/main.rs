use std::env;
use std::process;

use log::LevelFilter;

use sundog::Config;

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut builder = env_logger::Builder::new();
    builder.filter(None, level);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse(&filters);
    }
    builder.init();
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        print!("{}", sundog::USAGE);
        return;
    }

    let config = match Config::from_cmdline(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprint!("{}", sundog::USAGE);
            process::exit(2);
        }
    };

    init_logger(config.verbose);

    match sundog::run(config) {
        Err(e) => {
            if let Some(name) = e.name() {
                log::error!("Exit with {}: {}\n\nBACKTRACE:\n{}", name, e, e.backtrace());
            } else {
                log::error!(
                    "Exit with Unnamed Error: {}\n\nBACKTRACE: {}",
                    e,
                    e.backtrace()
                );
            }
            process::exit(1);
        }
        _ => {}
    }
}
