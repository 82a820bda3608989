fn main() {
    if let Err(e) = scan_filter::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
