//! Read access to the card manager.

use soroban_sdk::{contractclient, Address, Env};

use crate::CardKey;

#[contractclient(name = "Client")]
pub trait CardCatalog {
    fn holding(env: Env, owner: Address, card: CardKey) -> u32;
}
