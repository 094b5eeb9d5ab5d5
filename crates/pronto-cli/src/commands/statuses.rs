use pronto_core::error::ProntoError;
use pronto_core::model::Status;

pub fn list() -> Result<(), ProntoError> {
    println!("Attendance status codes:\n");
    for status in Status::ALL {
        println!("  {:<4} {:<24} {}", status.code(), status.label(), status.color());
    }
    println!();
    println!("Imports write P for a clock-in time, FE/F/D/AT for the report keywords");
    println!("FÉRIAS/FALTA/LICENÇA/ATESTADO, and clear the day for FOLGA or empty cells.");
    Ok(())
}
