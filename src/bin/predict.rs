//! poledet-predict entry point.

fn main() {
    if let Err(e) = poledet::run_predict() {
        poledet::error::report(&e);
        std::process::exit(1);
    }
}
