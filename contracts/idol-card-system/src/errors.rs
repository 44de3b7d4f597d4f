use soroban_sdk::contracterror;

/// Error codes are shared with the card manager and trade manager, so a
/// failure raised by either keeps its meaning when it surfaces here.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum IdolCardSystemError {
    /// Indicates the caller lacks the required authority.
    Unauthorized = 1,
    /// Indicates the managers were already linked.
    AlreadyLinked = 2,
    /// Indicates the managers are not linked yet.
    NotLinked = 3,
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
    /// Indicates a non-existent offer.
    OfferNotFound = 20,
    /// Indicates the offer was already filled or cancelled.
    NotOpen = 21,
    /// Indicates the requester is not the seller of the offer.
    NotSeller = 22,
    /// Indicates the payment differs from the offer's total price.
    PriceMismatch = 23,
    /// Indicates an arithmetic overflow.
    MathOverflow = 30,
    /// Indicates the trade manager reads holdings from another card manager.
    ManagerMismatch = 31,
}
