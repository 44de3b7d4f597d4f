#![no_std]
#![allow(dead_code)]

use soroban_sdk::{contract, contractmeta, contracttype, Address, BytesN, Env, String};

contractmeta!(key = "Description", val = "Idol Card Trade Manager");

mod catalog;
mod contract;

pub mod errors;
mod events;

pub use errors::TradeManagerError;

#[contract]
pub struct TradeManager;

/// Identity of a card, as defined by the card manager.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardKey {
    pub group: String,
    pub member: String,
    pub serial_number: String,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OfferStatus {
    Open,
    Filled,
    Cancelled,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Offer {
    pub seller: Address,
    pub card: CardKey,
    pub quantity: u32,
    pub unit_price: i128,
    pub status: OfferStatus,
}

/// Outcome of a settled offer, for the main contract to carry out the holding
/// transfer and route `amount` to `seller`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settlement {
    pub offer_id: u64,
    pub seller: Address,
    pub buyer: Address,
    pub card: CardKey,
    pub quantity: u32,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Linkage {
    Unlinked,
    Linked(Address),
}

pub trait TradeManagerTrait {

    fn __constructor(e: &Env, owner: Address, card_manager: Address);

    fn upgrade(e: &Env, wasm_hash: BytesN<32>);

    /// Registers the main contract, the only caller allowed to list, cancel
    /// and settle offers. Can only succeed once.
    ///
    /// # Events
    ///
    /// * topics - `["main_contract_set", main: Address]`
    fn set_main_contract(e: &Env, main: Address) -> Result<(), TradeManagerError>;

    fn main_contract(e: &Env) -> Option<Address>;

    /// Opens an offer from `seller` for `quantity` copies of `card` at
    /// `unit_price` each and returns its id.
    ///
    /// The seller's holding is not checked here; [`TradeManagerTrait::settle_offer`]
    /// checks it when the offer is bought.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Acting address, must be the main contract.
    /// * `seller` - Account selling the copies.
    /// * `card` - Identity of the card.
    /// * `quantity` - Number of copies, all sold together.
    /// * `unit_price` - Price per copy.
    ///
    /// # Events
    ///
    /// * topics - `["offer_listed", seller: Address, offer_id: u64]`
    /// * data - `[card: CardKey, quantity: u32, unit_price: i128]`
    fn list_offer(
        e: &Env,
        caller: Address,
        seller: Address,
        card: CardKey,
        quantity: u32,
        unit_price: i128,
    ) -> Result<u64, TradeManagerError>;

    /// Cancels an open offer on behalf of `requester`, who must be its seller.
    ///
    /// # Events
    ///
    /// * topics - `["offer_cancelled", seller: Address, offer_id: u64]`
    fn cancel_offer(e: &Env, caller: Address, offer_id: u64, requester: Address) -> Result<(), TradeManagerError>;

    /// Fills an open offer for `buyer`.
    ///
    /// `payment` must equal `quantity * unit_price`, and the seller must still
    /// hold the listed quantity according to the card manager. Either the offer
    /// becomes `Filled` and a [`Settlement`] is returned, or nothing changes.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Acting address, must be the main contract.
    /// * `offer_id` - Offer to fill.
    /// * `buyer` - Account buying the copies.
    /// * `payment` - Amount attached by the buyer.
    ///
    /// # Events
    ///
    /// * topics - `["offer_filled", seller: Address, buyer: Address]`
    /// * data - `[offer_id: u64, amount: i128]`
    fn settle_offer(
        e: &Env,
        caller: Address,
        offer_id: u64,
        buyer: Address,
        payment: i128,
    ) -> Result<Settlement, TradeManagerError>;

    fn offer(e: &Env, offer_id: u64) -> Result<Offer, TradeManagerError>;

    /// Number of offers ever listed, which is also the next offer id.
    fn offer_count(e: &Env) -> u64;

    fn card_manager(e: &Env) -> Address;

    fn owner(e: &Env) -> Address;
}
