//! Error types for the mock FHE coprocessor.

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CoprocessorError {
    /// Coprocessor has already been initialized
    AlreadyInitialized = 1,
    /// Protocol id not set - call initialize first
    NotInitialized = 2,
    /// Proof does not bind the handle to this contract and user
    InvalidInputProof = 3,
    /// No ciphertext is stored under the handle
    UnknownHandle = 4,
    /// Operand has the wrong encrypted type
    TypeMismatch = 5,
    /// Account holds no grant on the handle
    AccessDenied = 6,
    /// Handle was never marked for public decryption
    NotPubliclyDecryptable = 7,
    /// Decryption request is outside its validity window
    InvalidDecryptWindow = 8,
}
