#![no_std]
#![allow(dead_code)]

use soroban_sdk::{contract, contractmeta, contracttype, Address, BytesN, Env, String};

contractmeta!(key = "Description", val = "Idol Card System");

mod catalog;
mod contract;
mod ledger;

mod errors;
mod events;

pub use errors::IdolCardSystemError;

#[contract]
pub struct IdolCardSystem;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardKey {
    pub group: String,
    pub member: String,
    pub serial_number: String,
}

/// Receipt of a purchase, as settled by the trade manager.
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
pub struct Managers {
    pub card_manager: Address,
    pub trade_manager: Address,
}

/// `Unlinked` until the owner wires both managers, then `Linked` for good.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Linkage {
    Unlinked,
    Linked(Managers),
}

pub trait IdolCardSystemTrait {

    fn __constructor(e: &Env, owner: Address, payment_token: Address);

    fn upgrade(e: &Env, wasm_hash: BytesN<32>);

    /// Wires the card manager and trade manager to this contract.
    ///
    /// Stores both addresses and registers this contract as the main
    /// contract of each manager. A manager whose owner already registered
    /// this contract is left as is. Nothing else is accepted before this
    /// runs, and it can only run once.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `card_manager` - Address of the deployed card manager.
    /// * `trade_manager` - Address of the deployed trade manager, built
    ///   against `card_manager`.
    ///
    /// # Errors
    ///
    /// * [`IdolCardSystemError::AlreadyLinked`] - If the managers are already
    ///   linked, or a manager already serves another main contract.
    /// * [`IdolCardSystemError::ManagerMismatch`] - If `trade_manager` reads
    ///   holdings from another card manager.
    ///
    /// # Events
    ///
    /// * topics - `["managers_linked"]`
    /// * data - `[card_manager: Address, trade_manager: Address]`
    fn link_managers(e: &Env, card_manager: Address, trade_manager: Address) -> Result<(), IdolCardSystemError>;

    /// Defines a card, or reprices it if it already exists.
    ///
    /// When the card exists, `supply` and `uri` are ignored.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Acting address, must be the owner.
    /// * `price` - Price in the smallest unit of the payment token.
    /// * `group` - Group of the idol.
    /// * `member` - Member of the group.
    /// * `serial_number` - Serial number of the card.
    /// * `supply` - Total supply, for a new card.
    /// * `uri` - Metadata URI, for a new card.
    ///
    /// # Errors
    ///
    /// * [`IdolCardSystemError::Unauthorized`] - If `caller` is not the owner.
    /// * [`IdolCardSystemError::NotLinked`] - If the managers are not linked.
    fn set_card_price(
        e: &Env,
        caller: Address,
        price: i128,
        group: String,
        member: String,
        serial_number: String,
        supply: u32,
        uri: String,
    ) -> Result<(), IdolCardSystemError>;

    /// Returns the price of a card.
    ///
    /// # Errors
    ///
    /// * [`IdolCardSystemError::CardNotFound`] - If the card is not defined.
    fn get_card_price(e: &Env, group: String, member: String, serial_number: String) -> Result<i128, IdolCardSystemError>;

    /// Issues `quantity` copies of a card to `to`. Owner only.
    fn mint_card(
        e: &Env,
        caller: Address,
        to: Address,
        group: String,
        member: String,
        serial_number: String,
        quantity: u32,
    ) -> Result<(), IdolCardSystemError>;

    /// Puts `quantity` copies of a card up for sale at `unit_price` each and
    /// returns the offer id.
    fn list_card(
        e: &Env,
        seller: Address,
        group: String,
        member: String,
        serial_number: String,
        quantity: u32,
        unit_price: i128,
    ) -> Result<u64, IdolCardSystemError>;

    fn cancel_listing(e: &Env, seller: Address, offer_id: u64) -> Result<(), IdolCardSystemError>;

    /// Buys an open offer.
    ///
    /// `payment` must equal the offer's quantity times its unit price. The
    /// copies move to `buyer` and `payment` moves from `buyer` to the seller
    /// in the payment token, or nothing happens at all.
    ///
    /// # Events
    ///
    /// * topics - `["purchase", buyer: Address, seller: Address]`
    /// * data - `[offer_id: u64, card: CardKey, quantity: u32, amount: i128]`
    fn buy_card(e: &Env, buyer: Address, offer_id: u64, payment: i128) -> Result<Settlement, IdolCardSystemError>;

    fn holding(
        e: &Env,
        owner: Address,
        group: String,
        member: String,
        serial_number: String,
    ) -> Result<u32, IdolCardSystemError>;

    fn card_manager(e: &Env) -> Result<Address, IdolCardSystemError>;

    fn trade_manager(e: &Env) -> Result<Address, IdolCardSystemError>;

    fn payment_token(e: &Env) -> Address;

    fn owner(e: &Env) -> Address;
}
