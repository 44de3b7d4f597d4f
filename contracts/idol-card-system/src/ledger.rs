//! Client for the trade manager.

use soroban_sdk::{contractclient, Address, Env};

use crate::{CardKey, Settlement};

#[contractclient(name = "Client")]
pub trait TradeLedger {
    fn set_main_contract(env: Env, main: Address);

    fn main_contract(env: Env) -> Option<Address>;

    fn card_manager(env: Env) -> Address;

    fn list_offer(env: Env, caller: Address, seller: Address, card: CardKey, quantity: u32, unit_price: i128) -> u64;

    fn cancel_offer(env: Env, caller: Address, offer_id: u64, requester: Address);

    fn settle_offer(env: Env, caller: Address, offer_id: u64, buyer: Address, payment: i128) -> Settlement;
}
