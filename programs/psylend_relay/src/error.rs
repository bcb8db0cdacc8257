use anchor_lang::prelude::*;

/// Failures raised by the relay itself. A failing lending-program instruction is not mapped
/// here: its `ProgramError` is returned unchanged, custom code included.
#[error_code]
pub enum RelayError {
    #[msg("No bump seed produced a valid program address for the supplied seeds")]
    SeedDerivationExhausted,
    #[msg("Supplied account or bump does not match the derived program address")]
    AccountMismatch,
    #[msg("Lending program account does not match the configured network")]
    InvalidLendingProgram,
    #[msg("Dummy program account does not match the configured network")]
    InvalidDummyProgram,
    #[msg("Owner account neither signed nor is the relay authority for the market")]
    MissingOwnerSignature,
    #[msg("Account data is shorter than the expected layout")]
    InvalidAccountLayout,
    #[msg("Math overflow")]
    MathOverflow,
}
