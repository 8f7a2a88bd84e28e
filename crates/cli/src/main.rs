fn main() -> Result<(), Box<dyn std::error::Error>> {
    mapperlens_cli::run()
}
