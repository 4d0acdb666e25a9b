fn main() {
    if let Err(err) = dreamsong_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
