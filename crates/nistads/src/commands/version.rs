pub fn run() -> anyhow::Result<()> {
    println!("nistads {}", env!("CARGO_PKG_VERSION"));
    println!("Adsorption isotherm data collection from the NIST ISODB");
    Ok(())
}
