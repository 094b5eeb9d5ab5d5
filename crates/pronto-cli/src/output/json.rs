use pronto_core::error::ProntoError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), ProntoError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
