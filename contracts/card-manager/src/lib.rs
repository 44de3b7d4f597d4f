#![no_std]
#![allow(dead_code)]

use soroban_sdk::{contract, contractmeta, contracttype, Address, BytesN, Env, String};

contractmeta!(key = "Description", val = "Idol Card Manager");

mod contract;

#[cfg(test)]
mod test;
pub mod errors;
mod events;

pub use errors::CardManagerError;

#[contract]
pub struct CardManager;

/// Identity of a card: group, member and serial number.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardKey {
    pub group: String,
    pub member: String,
    pub serial_number: String,
}

/// Definition of a card as recorded by [`CardManagerTrait::define_card`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Card {
    pub price: i128,
    pub total_supply: u32,
    pub uri: String,
}

/// Which contract, if any, this catalog accepts mutations from.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Linkage {
    Unlinked,
    Linked(Address),
}

pub trait CardManagerTrait {

    fn __constructor(e: &Env, owner: Address, name: String, symbol: String);

    fn upgrade(e: &Env, wasm_hash: BytesN<32>);

    /// Registers the main contract, the only caller allowed to mutate cards
    /// and holdings.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `main` - Address of the main contract.
    ///
    /// # Errors
    ///
    /// * [`CardManagerError::AlreadyLinked`] - If a main contract was already set.
    ///
    /// # Events
    ///
    /// * topics - `["main_contract_set", main: Address]`
    fn set_main_contract(e: &Env, main: Address) -> Result<(), CardManagerError>;

    /// Returns the main contract, if linked.
    fn main_contract(e: &Env) -> Option<Address>;

    /// Creates a new card definition.
    ///
    /// `supply` becomes the mint ceiling for `card`: no amount of minting can
    /// push the cumulative issued quantity above it.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Acting address, must be the main contract.
    /// * `card` - Identity of the card.
    /// * `price` - Price in the smallest unit of the payment token.
    /// * `supply` - Total number of copies that can ever be minted.
    /// * `uri` - Metadata URI.
    ///
    /// # Errors
    ///
    /// * [`CardManagerError::Unauthorized`] - If `caller` is not the main contract.
    /// * [`CardManagerError::DuplicateCard`] - If `card` is already defined.
    /// * [`CardManagerError::InvalidPrice`] - If `price` is negative.
    /// * [`CardManagerError::InvalidQuantity`] - If `supply` is zero.
    ///
    /// # Events
    ///
    /// * topics - `["card_defined", card: CardKey]`
    /// * data - `[price: i128, total_supply: u32, uri: String]`
    fn define_card(
        e: &Env,
        caller: Address,
        card: CardKey,
        price: i128,
        supply: u32,
        uri: String,
    ) -> Result<(), CardManagerError>;

    /// Updates the price of an existing card.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Acting address, must be the main contract.
    /// * `card` - Identity of the card.
    /// * `price` - New price.
    ///
    /// # Errors
    ///
    /// * [`CardManagerError::Unauthorized`] - If `caller` is not the main contract.
    /// * [`CardManagerError::CardNotFound`] - If `card` is not defined.
    /// * [`CardManagerError::InvalidPrice`] - If `price` is negative.
    ///
    /// # Events
    ///
    /// * topics - `["price_updated", card: CardKey]`
    /// * data - `[old_price: i128, new_price: i128]`
    fn set_price(e: &Env, caller: Address, card: CardKey, price: i128) -> Result<(), CardManagerError>;

    /// Returns the price of `card`.
    ///
    /// # Errors
    ///
    /// * [`CardManagerError::CardNotFound`] - If `card` is not defined.
    fn price(e: &Env, card: CardKey) -> Result<i128, CardManagerError>;

    /// Returns the full definition of `card`.
    ///
    /// # Errors
    ///
    /// * [`CardManagerError::CardNotFound`] - If `card` is not defined.
    fn card(e: &Env, card: CardKey) -> Result<Card, CardManagerError>;

    fn has_card(e: &Env, card: CardKey) -> bool;

    /// Returns the number of defined cards.
    fn card_count(e: &Env) -> u32;

    /// Returns the `index`-th defined card, in definition order.
    ///
    /// # Errors
    ///
    /// * [`CardManagerError::CardNotFound`] - If `index` is not below
    ///   [`CardManagerTrait::card_count`].
    fn card_at(e: &Env, index: u32) -> Result<CardKey, CardManagerError>;

    /// Issues `quantity` new copies of `card` to `to`.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Acting address, must be the main contract.
    /// * `to` - Account receiving the copies.
    /// * `card` - Identity of the card.
    /// * `quantity` - Number of copies.
    ///
    /// # Errors
    ///
    /// * [`CardManagerError::Unauthorized`] - If `caller` is not the main contract.
    /// * [`CardManagerError::CardNotFound`] - If `card` is not defined.
    /// * [`CardManagerError::InvalidQuantity`] - If `quantity` is zero.
    /// * [`CardManagerError::SupplyExceeded`] - If the total minted would exceed
    ///   the card's supply.
    ///
    /// # Events
    ///
    /// * topics - `["minted", to: Address, card: CardKey]`
    /// * data - `[quantity: u32]`
    fn mint_to(e: &Env, caller: Address, to: Address, card: CardKey, quantity: u32) -> Result<(), CardManagerError>;

    /// Moves `quantity` copies of `card` from `from` to `to`.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - Acting address, must be the main contract.
    /// * `from` - Current holder.
    /// * `to` - New holder.
    /// * `card` - Identity of the card.
    /// * `quantity` - Number of copies.
    ///
    /// # Errors
    ///
    /// * [`CardManagerError::Unauthorized`] - If `caller` is not the main contract.
    /// * [`CardManagerError::CardNotFound`] - If `card` is not defined.
    /// * [`CardManagerError::InvalidQuantity`] - If `quantity` is zero.
    /// * [`CardManagerError::InsufficientHolding`] - If `from` holds fewer than
    ///   `quantity` copies.
    ///
    /// # Events
    ///
    /// * topics - `["holding_transferred", from: Address, to: Address]`
    /// * data - `[card: CardKey, quantity: u32]`
    fn transfer_holding(
        e: &Env,
        caller: Address,
        from: Address,
        to: Address,
        card: CardKey,
        quantity: u32,
    ) -> Result<(), CardManagerError>;

    /// Returns the number of copies of `card` held by `owner`, 0 if none.
    fn holding(e: &Env, owner: Address, card: CardKey) -> u32;

    /// Returns the number of copies of `card` minted so far.
    fn minted(e: &Env, card: CardKey) -> u32;

    fn owner(e: &Env) -> Address;

    fn name(e: &Env) -> String;

    fn symbol(e: &Env) -> String;
}
