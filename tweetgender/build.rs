use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    let out = env::var_os("OUT_DIR").ok_or("OUT_DIR is not set")?;
    nlprule_build::BinaryBuilder::new(&["en"], out)
        .build()?
        .validate()?;
    Ok(())
}
