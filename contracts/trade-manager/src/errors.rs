use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TradeManagerError {
    /// Indicates the caller is not the main contract.
    Unauthorized = 1,
    /// Indicates the main contract was already set.
    AlreadyLinked = 2,
    /// Indicates a value set at construction is missing.
    NotInitialized = 4,
    /// Indicates the seller no longer holds the listed quantity.
    InsufficientHolding = 13,
    /// Indicates a zero quantity.
    InvalidQuantity = 14,
    /// Indicates a negative unit price.
    InvalidPrice = 15,
    /// Indicates a non-existent offer.
    OfferNotFound = 20,
    /// Indicates the offer was already filled or cancelled.
    NotOpen = 21,
    /// Indicates the requester is not the seller of the offer.
    NotSeller = 22,
    /// Indicates the payment differs from the offer's total price.
    PriceMismatch = 23,
    /// Indicates overflow when multiplying quantity and unit price.
    MathOverflow = 30,
}
