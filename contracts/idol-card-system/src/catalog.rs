//! Client for the card manager.

use soroban_sdk::{contractclient, Address, Env, String};

use crate::CardKey;

#[contractclient(name = "Client")]
pub trait CardCatalog {
    fn set_main_contract(env: Env, main: Address);

    fn main_contract(env: Env) -> Option<Address>;

    fn has_card(env: Env, card: CardKey) -> bool;

    fn define_card(env: Env, caller: Address, card: CardKey, price: i128, supply: u32, uri: String);

    fn set_price(env: Env, caller: Address, card: CardKey, price: i128);

    fn price(env: Env, card: CardKey) -> i128;

    fn mint_to(env: Env, caller: Address, to: Address, card: CardKey, quantity: u32);

    fn transfer_holding(env: Env, caller: Address, from: Address, to: Address, card: CardKey, quantity: u32);

    fn holding(env: Env, owner: Address, card: CardKey) -> u32;
}
