//! The daylog binary only invokes `cli::run()` and turns errors into an exit
//! status. Parsing, dispatch and printing live in `cli/`; the logic lives in
//! the library behind `daylog::api`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
