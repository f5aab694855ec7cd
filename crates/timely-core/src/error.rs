// crates/timely-core/src/error.rs
//
// Error taxonomy for the Timely Reward engine.
//
// The `Display` strings of the action-level variants are part of the observable
// interface: callers and tests match on them verbatim, so they must not change.

use thiserror::Error;

use crate::name::AccountName;

/// Errors produced by the Timely Reward engine and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelyError {
    /// An administrative action was not authorized by the contract account.
    #[error("this action is restricted to admin only")]
    Unauthorized,

    /// A self-authorized action (claim) was not authorized by the user.
    #[error("user ({0}) has not authorized this action")]
    UserNotAuthorized(AccountName),

    /// Issuance or claim attempted while the contract is paused.
    #[error("contract is paused")]
    ContractPaused,

    /// `addreward` called with no recipients.
    #[error("you must add at least 1 reward recipient")]
    EmptyRecipientList,

    /// Quantity magnitude outside the representable range, or invalid symbol.
    #[error("invalid quantity")]
    InvalidQuantity,

    /// Zero or negative issuance amount.
    #[error("quantity amount must be positive")]
    NegativeQuantity,

    /// Unlock start is not strictly after the current time.
    #[error("unlock start must be in the future")]
    UnlockInPast,

    /// Unlock period of zero days.
    #[error("unlock period must be a positive integer")]
    InvalidPeriod,

    /// Issued quantity does not use the configured reward token symbol.
    #[error("token symbol mismatch")]
    SymbolMismatch,

    /// A schedule already exists for the recipient.
    #[error("recipient ({0}) already has rewards configured")]
    DuplicateRecipient(AccountName),

    /// No schedule exists for the user.
    #[error("user ({0}) has no rewards to claim")]
    NoRewards(AccountName),

    /// Claim attempted before the schedule's unlock start.
    #[error("rewards for user ({0}) are not unlocked yet")]
    NotYetUnlocked(AccountName),

    /// The token contract account does not exist.
    #[error("contract account does not exist")]
    UnknownContract,

    /// The token contract has no stat row for the requested symbol.
    #[error("token symbol does not exist")]
    UnknownSymbol,

    /// The external token ledger rejected a transfer request.
    #[error("token transfer failed: {0}")]
    TransferFailed(String),

    /// Arithmetic between quantities of different precision or code.
    #[error("attempt to operate on quantities with different symbols: {left} and {right}")]
    IncompatibleDenomination { left: String, right: String },

    /// Quantity arithmetic left the representable range.
    #[error("quantity arithmetic overflow")]
    QuantityOverflow,

    /// Textual quantity could not be parsed.
    #[error("malformed quantity: {0}")]
    MalformedQuantity(String),

    /// Textual symbol could not be parsed.
    #[error("malformed symbol: {0}")]
    MalformedSymbol(String),

    /// Account name violates the naming rules.
    #[error("invalid account name: {0}")]
    InvalidName(String),

    /// Textual timestamp could not be parsed.
    #[error("malformed time point: {0}")]
    MalformedTime(String),

    /// Storage layer error (RocksDB, in-memory tables).
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of [`TimelyError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong caller for an administrative or self-authorized action.
    Authorization,
    /// Malformed or out-of-range input.
    Validation,
    /// The current state does not permit the action.
    StateConflict,
    /// A referenced external contract or symbol does not exist.
    ExternalReference,
    /// The external token ledger rejected a request.
    ExternalCall,
    /// Storage or serialization failure below the engine.
    Infrastructure,
}

impl TimelyError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TimelyError::Unauthorized | TimelyError::UserNotAuthorized(_) => {
                ErrorKind::Authorization
            }
            TimelyError::EmptyRecipientList
            | TimelyError::InvalidQuantity
            | TimelyError::NegativeQuantity
            | TimelyError::UnlockInPast
            | TimelyError::InvalidPeriod
            | TimelyError::SymbolMismatch
            | TimelyError::IncompatibleDenomination { .. }
            | TimelyError::QuantityOverflow
            | TimelyError::MalformedQuantity(_)
            | TimelyError::MalformedSymbol(_)
            | TimelyError::InvalidName(_)
            | TimelyError::MalformedTime(_) => ErrorKind::Validation,
            TimelyError::ContractPaused
            | TimelyError::DuplicateRecipient(_)
            | TimelyError::NoRewards(_)
            | TimelyError::NotYetUnlocked(_) => ErrorKind::StateConflict,
            TimelyError::UnknownContract | TimelyError::UnknownSymbol => {
                ErrorKind::ExternalReference
            }
            TimelyError::TransferFailed(_) => ErrorKind::ExternalCall,
            TimelyError::Storage(_) | TimelyError::Serialization(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<serde_json::Error> for TimelyError {
    fn from(e: serde_json::Error) -> Self {
        TimelyError::Serialization(e.to_string())
    }
}
