use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CardManagerError {
    /// Indicates the caller is not the main contract.
    Unauthorized = 1,
    /// Indicates the main contract was already set.
    AlreadyLinked = 2,
    /// Indicates a value set at construction is missing.
    NotInitialized = 4,
    /// Indicates the card is already defined.
    DuplicateCard = 10,
    /// Indicates a non-existent card.
    CardNotFound = 11,
    /// Indicates minting would go above the card's total supply.
    SupplyExceeded = 12,
    /// Indicates the holder owns fewer copies than requested.
    InsufficientHolding = 13,
    /// Indicates a zero quantity or supply.
    InvalidQuantity = 14,
    /// Indicates a negative price.
    InvalidPrice = 15,
    /// Indicates overflow when adding two values
    MathOverflow = 30,
}
