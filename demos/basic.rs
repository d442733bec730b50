//! Basic example demonstrating the textproc bindings.
//!
//! Requires the native library; point `TEXTPROC_LIBRARY` at it if it is
//! not in the loader's default search path.
//!
//! Run with: cargo run --example basic

use textproc::{Error, NativeLibrary};

fn main() -> textproc::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "textproc=debug".into()),
        )
        .init();

    let lib = NativeLibrary::discover()?;

    println!("--- Scoped lifetime (recommended) ---");
    {
        let logger = lib.processor("[LOG]")?;
        println!("{}", logger.process("This is the first message")?);
        println!("{}", logger.process("This is the second message")?);
        // Destroyed automatically at the end of this block.
    }

    println!("\n--- Manual lifecycle ---");
    let mut manual = lib.processor("[MANUAL]")?;
    println!("{}", manual.process("Hello")?);
    manual.close();

    match manual.process("should fail") {
        Err(Error::UseAfterRelease) => println!("expected error: processor already released"),
        Err(e) => return Err(e),
        Ok(out) => println!("unexpected success: {out}"),
    }

    println!("\n--- Independent instances ---");
    let a = lib.processor("[A]")?;
    let b = lib.processor("[B]")?;
    println!("A: {}", a.process("alpha")?);
    println!("B: {}", b.process("beta")?);

    println!("\n--- Done ---");
    Ok(())
}
