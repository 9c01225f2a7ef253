#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = fvcr_player::run_from_env() {
        eprintln!("fvcr: {error:#}");
        std::process::exit(1);
    }
}
