use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("m3uc version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
