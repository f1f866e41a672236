//! poledet-train entry point.

fn main() {
    if let Err(e) = poledet::run_train() {
        poledet::error::report(&e);
        std::process::exit(1);
    }
}
