fn main() {
    let args = std::env::args();

    match repobind::run(args) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(err) => {
            eprintln!("repobind error: {err:#}");
            std::process::exit(1);
        }
    }
}
